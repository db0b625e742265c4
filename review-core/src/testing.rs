//! In-memory collaborators for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;
use std::sync::Arc;

use crate::collab::{AnnotationSource, AudioEngine, Collaborators, DrawEngine, ViewportReader};
use crate::debounce::{Ticket, TimerQueue};
use crate::error::ReviewError;
use crate::geometry::CanvasMetrics;
use crate::scale::{ScaleSettings, YPreset};
use crate::session::{ReviewSession, SessionConfig};
use crate::table::{TableSurface, SELECTED_CLASS};
use crate::types::{AnnotationRecord, AnnotationTable, ColumnMapping};

pub fn record(pairs: &[(&str, &str)]) -> AnnotationRecord {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

// ── Review table ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct FakeRow {
    pub index: Option<usize>,
    pub visible: bool,
    pub classes: BTreeSet<String>,
    pub play: Option<bool>,
}

impl FakeRow {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

/// Table rows plus the table's own selection owner, which the filter must
/// never reach.
pub struct FakeTable {
    rows: RefCell<Vec<FakeRow>>,
    available: Cell<bool>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
    selected: Cell<Option<usize>>,
    notify_calls: Cell<usize>,
}

impl FakeTable {
    pub fn with_rows(n: usize) -> Rc<Self> {
        let table = Rc::new(Self {
            rows: RefCell::new(Vec::new()),
            available: Cell::new(true),
            fail_writes: Cell::new(false),
            writes: Cell::new(0),
            selected: Cell::new(None),
            notify_calls: Cell::new(0),
        });
        table.rebuild(n);
        table
    }

    /// Re-render from scratch, the way the table does when a file loads:
    /// every row visible, the selected row checked and highlighted.
    pub fn rebuild(&self, n: usize) {
        let selected = self.selected.get();
        *self.rows.borrow_mut() = (0..n)
            .map(|i| {
                let is_sel = selected == Some(i);
                FakeRow {
                    index: Some(i),
                    visible: true,
                    classes: if is_sel { [SELECTED_CLASS.to_string()].into() } else { BTreeSet::new() },
                    play: Some(is_sel),
                }
            })
            .collect();
    }

    pub fn push_unindexed_row(&self) {
        self.rows.borrow_mut().push(FakeRow {
            index: None,
            visible: true,
            classes: BTreeSet::new(),
            play: None,
        });
    }

    /// The reviewer ticks a play checkbox: the table's own change handler.
    pub fn user_select(&self, index: usize) {
        for row in self.rows.borrow_mut().iter_mut() {
            let on = row.index == Some(index);
            if row.play.is_some() {
                row.play = Some(on);
            }
            if on {
                row.classes.insert(SELECTED_CLASS.to_string());
            } else {
                row.classes.remove(SELECTED_CLASS);
            }
        }
        self.selected.set(Some(index));
        self.notify_calls.set(self.notify_calls.get() + 1);
    }

    pub fn row(&self, pos: usize) -> FakeRow {
        self.rows.borrow()[pos].clone()
    }

    pub fn snapshot(&self) -> Vec<FakeRow> {
        self.rows.borrow().clone()
    }

    pub fn visible_indices(&self) -> Vec<usize> {
        self.rows
            .borrow()
            .iter()
            .filter(|r| r.visible)
            .filter_map(|r| r.index)
            .collect()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected.get()
    }

    pub fn notify_calls(&self) -> usize {
        self.notify_calls.get()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn fail_writes(&self, on: bool) {
        self.fail_writes.set(on);
    }

    pub fn set_available(&self, on: bool) {
        self.available.set(on);
    }

    fn write(&self, pos: usize, f: impl FnOnce(&mut FakeRow)) -> Result<(), ReviewError> {
        let mut rows = self.rows.borrow_mut();
        let row = rows.get_mut(pos).ok_or_else(|| ReviewError::row_write(None, "row detached"))?;
        if self.fail_writes.get() {
            return Err(ReviewError::row_write(row.index, "write refused"));
        }
        f(row);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

impl TableSurface for FakeTable {
    type Row = usize;

    fn rows(&self) -> Result<Vec<usize>, ReviewError> {
        if !self.available.get() {
            return Err(ReviewError::TableUnavailable);
        }
        Ok((0..self.rows.borrow().len()).collect())
    }

    fn row_index(&self, row: &usize) -> Option<usize> {
        self.rows.borrow().get(*row).and_then(|r| r.index)
    }

    fn set_visible(&self, row: &usize, visible: bool) -> Result<(), ReviewError> {
        self.write(*row, |r| r.visible = visible)
    }

    fn is_visible(&self, row: &usize) -> bool {
        self.rows.borrow().get(*row).map_or(false, |r| r.visible)
    }

    fn set_class(&self, row: &usize, class: &str, on: bool) -> Result<(), ReviewError> {
        self.write(*row, |r| {
            if on {
                r.classes.insert(class.to_string());
            } else {
                r.classes.remove(class);
            }
        })
    }

    fn play_checkbox(&self, row: &usize) -> Option<bool> {
        self.rows.borrow().get(*row).and_then(|r| r.play)
    }

    fn uncheck_play_checkbox(&self, row: &usize) -> Result<(), ReviewError> {
        self.write(*row, |r| {
            if r.play.is_some() {
                r.play = Some(false);
            }
        })
    }
}

// ── Collaborators ────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeAudio {
    pub sample_rate: Cell<Option<f64>>,
    pub playing: Cell<bool>,
    pub pauses: Cell<usize>,
    pub buffer: Cell<bool>,
    pub position: Cell<f64>,
}

impl AudioEngine for FakeAudio {
    fn sample_rate(&self) -> Option<f64> {
        self.sample_rate.get()
    }

    fn is_playing(&self) -> bool {
        self.playing.get()
    }

    fn pause(&self) {
        self.playing.set(false);
        self.pauses.set(self.pauses.get() + 1);
    }

    fn has_buffer(&self) -> bool {
        self.buffer.get()
    }

    fn current_position(&self) -> f64 {
        self.position.get()
    }
}

#[derive(Default)]
pub struct FakeDraw {
    pub total_cols: Cell<Option<usize>>,
    pub stops: Cell<usize>,
    pub restamps: Cell<usize>,
}

impl DrawEngine for FakeDraw {
    fn total_columns(&self) -> Option<usize> {
        self.total_cols.get()
    }

    fn stop_loop(&self) {
        self.stops.set(self.stops.get() + 1);
    }

    fn restamp_annotations(&self) {
        self.restamps.set(self.restamps.get() + 1);
    }
}

pub struct FakeViewport {
    pub metrics: Cell<Option<CanvasMetrics>>,
    pub scale: Cell<ScaleSettings>,
}

impl ViewportReader for FakeViewport {
    fn canvas_metrics(&self) -> Option<CanvasMetrics> {
        self.metrics.get()
    }

    fn scale_settings(&self) -> ScaleSettings {
        self.scale.get()
    }
}

#[derive(Default)]
pub struct FakeAnnotations {
    pub table: RefCell<Option<Arc<AnnotationTable>>>,
    pub mapping: RefCell<ColumnMapping>,
}

impl AnnotationSource for FakeAnnotations {
    fn annotations(&self) -> Option<Arc<AnnotationTable>> {
        self.table.borrow().clone()
    }

    fn mapping(&self) -> ColumnMapping {
        self.mapping.borrow().clone()
    }
}

/// Timers on a virtual millisecond clock.
#[derive(Default)]
pub struct FakeTimers {
    now: Cell<u64>,
    pending: RefCell<Vec<(Ticket, u64)>>,
    started: Cell<usize>,
    cancelled: Cell<usize>,
}

impl FakeTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    /// Remove and return every ticket whose deadline has passed, earliest first.
    pub fn take_due(&self) -> Vec<Ticket> {
        let now = self.now.get();
        let mut pending = self.pending.borrow_mut();
        let mut due: Vec<(Ticket, u64)> = pending.iter().copied().filter(|(_, at)| *at <= now).collect();
        pending.retain(|(_, at)| *at > now);
        due.sort_by_key(|(_, at)| *at);
        due.into_iter().map(|(t, _)| t).collect()
    }

    pub fn started(&self) -> usize {
        self.started.get()
    }

    pub fn cancelled(&self) -> usize {
        self.cancelled.get()
    }
}

impl TimerQueue for FakeTimers {
    fn start(&self, ticket: Ticket, delay_ms: u32) {
        self.pending.borrow_mut().push((ticket, self.now.get() + delay_ms as u64));
        self.started.set(self.started.get() + 1);
    }

    fn cancel(&self, ticket: Ticket) {
        self.pending.borrow_mut().retain(|(t, _)| *t != ticket);
        self.cancelled.set(self.cancelled.get() + 1);
    }
}

// ── Session harness ──────────────────────────────────────────────────────────

/// A session over a 1064×448 canvas (1000 plot columns, 400 px plot height),
/// 5000 drawn columns at 0.01 s each and a 10 kHz ceiling.
pub struct Harness {
    pub session: ReviewSession<Rc<FakeTable>>,
    pub table: Rc<FakeTable>,
    pub audio: Rc<FakeAudio>,
    pub draw: Rc<FakeDraw>,
    pub viewport: Rc<FakeViewport>,
    pub annotations: Rc<FakeAnnotations>,
    pub timers: Rc<FakeTimers>,
}

impl Harness {
    /// Rows are (start, end, low, high) under the headers of the same names.
    pub fn new(rows: &[(&str, &str, &str, &str)]) -> Self {
        let mapping = ColumnMapping {
            start: "start".into(),
            end: "end".into(),
            low: "low".into(),
            high: "high".into(),
            label: String::new(),
        };
        Self::build(rows, mapping)
    }

    pub fn with_mapping(rows: &[(&str, &str, &str, &str)], mapping: ColumnMapping) -> Self {
        Self::build(rows, mapping)
    }

    pub fn without_audio_or_draw(rows: &[(&str, &str, &str, &str)]) -> Self {
        let mut h = Self::new(rows);
        let collab = Collaborators {
            audio: None,
            draw: None,
            viewport: h.viewport.clone(),
            annotations: h.annotations.clone(),
            timers: h.timers.clone(),
        };
        h.session = ReviewSession::new(h.table.clone(), collab, SessionConfig::default());
        h
    }

    fn build(rows: &[(&str, &str, &str, &str)], mapping: ColumnMapping) -> Self {
        let table = FakeTable::with_rows(rows.len());
        let audio = Rc::new(FakeAudio::default());
        let draw = Rc::new(FakeDraw::default());
        draw.total_cols.set(Some(5000));
        let viewport = Rc::new(FakeViewport {
            metrics: Cell::new(Some(CanvasMetrics {
                client_width: 1064.0,
                client_height: 448.0,
                backing_width: 1064,
                backing_height: 448,
                device_pixel_ratio: 1.0,
            })),
            scale: Cell::new(ScaleSettings { speed: 100.0 / 60.0, y_preset: YPreset::Hz(10_000.0) }),
        });
        let annotations = Rc::new(FakeAnnotations::default());
        *annotations.table.borrow_mut() = Some(Arc::new(AnnotationTable {
            headers: vec!["start".into(), "end".into(), "low".into(), "high".into()],
            rows: rows
                .iter()
                .map(|&(s, e, l, h)| record(&[("start", s), ("end", e), ("low", l), ("high", h)]))
                .collect(),
        }));
        *annotations.mapping.borrow_mut() = mapping;
        let timers = Rc::new(FakeTimers::new());

        let collab = Collaborators {
            audio: Some(audio.clone()),
            draw: Some(draw.clone()),
            viewport: viewport.clone(),
            annotations: annotations.clone(),
            timers: timers.clone(),
        };
        let session = ReviewSession::new(table.clone(), collab, SessionConfig::default());
        Self { session, table, audio, draw, viewport, annotations, timers }
    }

    /// Deliver every due timer to the session; returns how many fired.
    pub fn fire_due(&mut self) -> usize {
        let due = self.timers.take_due();
        for &ticket in &due {
            self.session.on_timer_fired(ticket);
        }
        due.len()
    }
}
