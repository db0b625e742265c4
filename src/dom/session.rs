//! The page's single review session and the browser events feeding it.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MutationObserver, MutationObserverInit};
use spectro_review_core::collab::{AnnotationSource, Collaborators, ViewportReader};
use spectro_review_core::geometry::CanvasMetrics;
use spectro_review_core::prefs::ReviewPrefs;
use spectro_review_core::scale::ScaleSettings;
use spectro_review_core::session::{ReviewSession, SessionConfig};
use spectro_review_core::types::{AnnotationTable, ColumnMapping};
use crate::dom::bridge::{self, JsAudioEngine, JsDrawEngine};
use crate::dom::table::DomReviewTable;
use crate::dom::timers::BrowserTimers;
use crate::ids;
use crate::state::ReviewState;

pub type WebSession = ReviewSession<DomReviewTable>;

thread_local! {
    static SESSION: RefCell<Option<WebSession>> = RefCell::new(None);
    static OBSERVER: RefCell<Option<(MutationObserver, Closure<dyn FnMut(js_sys::Array, MutationObserver)>)>> =
        RefCell::new(None);
}

struct CanvasViewport {
    prefs: RwSignal<ReviewPrefs>,
}

impl ViewportReader for CanvasViewport {
    fn canvas_metrics(&self) -> Option<CanvasMetrics> {
        let canvas = document()
            .get_element_by_id(ids::CANVAS)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let device_pixel_ratio = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        Some(CanvasMetrics {
            client_width: canvas.client_width() as f64,
            client_height: canvas.client_height() as f64,
            backing_width: canvas.width(),
            backing_height: canvas.height(),
            device_pixel_ratio,
        })
    }

    fn scale_settings(&self) -> ScaleSettings {
        self.prefs.with_untracked(|p| p.scale)
    }
}

struct HostAnnotations {
    annotations: RwSignal<Option<Arc<AnnotationTable>>>,
}

impl AnnotationSource for HostAnnotations {
    fn annotations(&self) -> Option<Arc<AnnotationTable>> {
        self.annotations.get_untracked()
    }

    fn mapping(&self) -> ColumnMapping {
        bridge::mapping()
    }
}

/// Run `f` against the session. Events arriving while the session is busy
/// (re-entrant dispatch) or before `install` are dropped.
pub fn with_session<R>(f: impl FnOnce(&mut WebSession) -> R) -> Option<R> {
    SESSION.with(|cell| match cell.try_borrow_mut() {
        Ok(mut guard) => guard.as_mut().map(f),
        Err(_) => {
            log::warn!("review session busy, event dropped");
            None
        }
    })
}

/// Create the session and start watching the review table for rebuilds.
/// Call once, after the table frame is in the document.
pub fn install(state: ReviewState) {
    let collab = Collaborators {
        audio: Some(Rc::new(JsAudioEngine::new(state.play_toggle_label))),
        draw: Some(Rc::new(JsDrawEngine)),
        viewport: Rc::new(CanvasViewport { prefs: state.prefs }),
        annotations: Rc::new(HostAnnotations { annotations: state.annotations }),
        timers: Rc::new(BrowserTimers),
    };
    let session = ReviewSession::new(DomReviewTable, collab, SessionConfig::default());
    SESSION.with(|cell| *cell.borrow_mut() = Some(session));

    if let Err(e) = observe_table() {
        // Filtering still works; a rebuild just drops the filter visually
        log::warn!("table observer: {e:?}");
    }
    log::info!("review session installed");
}

fn observe_table() -> Result<(), JsValue> {
    let frame = document()
        .get_element_by_id(ids::REVIEW_TABLE_FRAME)
        .ok_or_else(|| JsValue::from_str("review table frame missing"))?;

    let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        move |_records: js_sys::Array, _observer: MutationObserver| {
            with_session(|s| s.on_table_changed());
        },
    );
    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
    let options = MutationObserverInit::new();
    options.set_child_list(true);
    options.set_subtree(true);
    observer.observe_with_options(&frame, &options)?;

    OBSERVER.with(|cell| {
        if let Some((old, _)) = cell.borrow_mut().replace((observer, callback)) {
            old.disconnect();
        }
    });
    Ok(())
}
