//! Access to the host page's engines through `window.__spectro`.
//!
//! Every member of the host object is optional. Lookups return `None` and
//! calls become no-ops when something is missing, so the review page keeps
//! working (unfiltered, unmapped) before the host has finished loading.

use js_sys::{Array, Function, Object, Reflect};
use leptos::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use spectro_review_core::collab::{AudioEngine, DrawEngine};
use spectro_review_core::types::{AnnotationRecord, AnnotationTable, ColumnMapping};
use crate::state::RESUME;

const HOST_KEY: &str = "__spectro";

fn get(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn get_f64(target: &JsValue, key: &str) -> Option<f64> {
    get(target, key).and_then(|v| v.as_f64()).filter(|v| v.is_finite())
}

/// Call a zero-argument method; false when it is missing or threw.
fn call0(target: &JsValue, method: &str) -> bool {
    let Some(func) = get(target, method).and_then(|f| f.dyn_into::<Function>().ok()) else {
        return false;
    };
    match func.call0(target) {
        Ok(_) => true,
        Err(e) => {
            log::error!("host {method}(): {e:?}");
            false
        }
    }
}

fn host() -> Option<JsValue> {
    let window = web_sys::window()?;
    get(&window, HOST_KEY)
}

fn host_member(key: &str) -> Option<JsValue> {
    get(&host()?, key)
}

/// Cell values arrive as strings or numbers depending on the parser.
fn cell_text(v: &JsValue) -> String {
    if let Some(s) = v.as_string() {
        s
    } else if let Some(n) = v.as_f64() {
        n.to_string()
    } else if let Some(b) = v.as_bool() {
        b.to_string()
    } else {
        String::new()
    }
}

// ── Engines ──────────────────────────────────────────────────────────────────

/// Audio engine handle. Holds the play toggle label so a pause forced by a
/// viewport click shows up on the button.
pub struct JsAudioEngine {
    play_toggle_label: RwSignal<&'static str>,
}

impl JsAudioEngine {
    pub fn new(play_toggle_label: RwSignal<&'static str>) -> Self {
        Self { play_toggle_label }
    }

    fn handle() -> Option<JsValue> {
        host_member("audio")
    }
}

impl AudioEngine for JsAudioEngine {
    fn sample_rate(&self) -> Option<f64> {
        let ctx = get(&Self::handle()?, "ctx")?;
        get_f64(&ctx, "sampleRate")
    }

    fn is_playing(&self) -> bool {
        Self::handle()
            .and_then(|a| get(&a, "isPlaying"))
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    fn pause(&self) {
        let Some(audio) = Self::handle() else { return };
        if call0(&audio, "pause") {
            self.play_toggle_label.set(RESUME);
        }
    }

    fn has_buffer(&self) -> bool {
        Self::handle().and_then(|a| get(&a, "buffer")).is_some()
    }

    fn current_position(&self) -> f64 {
        let Some(audio) = Self::handle() else { return 0.0 };
        get(&audio, "currentTime")
            .and_then(|f| f.dyn_into::<Function>().ok())
            .and_then(|f| f.call0(&audio).ok())
            .and_then(|v| v.as_f64())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

pub struct JsDrawEngine;

impl DrawEngine for JsDrawEngine {
    fn total_columns(&self) -> Option<usize> {
        let cols = get_f64(&host_member("draw")?, "totalCols")?;
        (cols >= 0.0).then(|| cols.floor() as usize)
    }

    fn stop_loop(&self) {
        if let Some(draw) = host_member("draw") {
            call0(&draw, "stopLoop");
        }
    }

    fn restamp_annotations(&self) {
        if let Some(draw) = host_member("draw") {
            call0(&draw, "restampAnnotations");
        }
    }
}

// ── Transport ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
pub enum TransportCall {
    Toggle,
    Stop,
    PlayFromStart,
}

pub fn transport(call: TransportCall) {
    let Some(audio) = JsAudioEngine::handle() else {
        log::warn!("transport {call:?}: no audio engine");
        return;
    };
    let method = match call {
        TransportCall::Toggle => "toggle",
        TransportCall::Stop => "stop",
        TransportCall::PlayFromStart => "playFromStart",
    };
    if !call0(&audio, method) {
        log::warn!("transport {call:?}: host has no {method}()");
    }
}

// ── Annotations ──────────────────────────────────────────────────────────────

/// Identity of the host's annotation object, used to notice a new file.
#[derive(Clone, Debug)]
pub struct AnnotationStamp {
    object: JsValue,
    rows: u32,
}

impl AnnotationStamp {
    pub fn same_as(&self, other: &AnnotationStamp) -> bool {
        Object::is(&self.object, &other.object) && self.rows == other.rows
    }
}

pub fn annotation_stamp() -> Option<AnnotationStamp> {
    let object = host_member("annotations")?;
    let rows = get(&object, "rows")
        .and_then(|r| r.dyn_into::<Array>().ok())
        .map_or(0, |r| r.length());
    Some(AnnotationStamp { object, rows })
}

/// Copy the host's parsed annotation file. Values are keyed by header.
pub fn read_annotations() -> Option<AnnotationTable> {
    let object = host_member("annotations")?;
    let headers: Vec<String> = get(&object, "headers")
        .and_then(|h| h.dyn_into::<Array>().ok())?
        .iter()
        .map(|h| cell_text(&h))
        .collect();
    let rows = get(&object, "rows")
        .and_then(|r| r.dyn_into::<Array>().ok())
        .map(|rows| {
            rows.iter()
                .map(|row| {
                    headers
                        .iter()
                        .filter_map(|h| get(&row, h).map(|v| (h.clone(), cell_text(&v))))
                        .collect::<AnnotationRecord>()
                })
                .collect()
        })
        .unwrap_or_default();
    Some(AnnotationTable { headers, rows })
}

pub fn source_name() -> Option<String> {
    host_member("sourceName")
        .and_then(|v| v.as_string())
        .filter(|s| !s.is_empty())
        .or_else(annotation_file_name)
}

fn annotation_file_name() -> Option<String> {
    let input = document()
        .get_element_by_id(crate::ids::ANN_FILE)?
        .dyn_into::<web_sys::HtmlInputElement>()
        .ok()?;
    input.files()?.get(0).map(|f| f.name())
}

pub fn mapping() -> ColumnMapping {
    let Some(m) = host_member("mapping") else {
        return ColumnMapping::default();
    };
    let field = |key: &str| get(&m, key).and_then(|v| v.as_string()).unwrap_or_default();
    ColumnMapping {
        start: field("start"),
        end: field("end"),
        low: field("low"),
        high: field("high"),
        label: field("label"),
    }
}

/// Set the column the draw engine labels boxes with ("" for none).
pub fn set_label_column(label: &str) {
    let Some(host) = host() else { return };
    let mapping = match get(&host, "mapping") {
        Some(m) => m,
        None => {
            let m: JsValue = Object::new().into();
            if Reflect::set(&host, &JsValue::from_str("mapping"), &m).is_err() {
                log::error!("label column: cannot create host mapping");
                return;
            }
            m
        }
    };
    if let Err(e) = Reflect::set(&mapping, &JsValue::from_str("label"), &JsValue::from_str(label)) {
        log::error!("label column: {e:?}");
    }
}

/// Mirror the playback selection for the audio engine; -1 means none.
pub fn set_selected_row_index(index: Option<usize>) {
    let Some(host) = host() else { return };
    let value = index.map_or(-1.0, |i| i as f64);
    if let Err(e) = Reflect::set(&host, &JsValue::from_str("selectedRowIndex"), &JsValue::from_f64(value)) {
        log::error!("row selection: {e:?}");
    }
}
