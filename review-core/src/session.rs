//! Event handlers wiring pointer, keyboard, transport and table-rebuild events
//! to the coordinate mapper, hit tester and filter controller.
//!
//! Handlers are the error boundary: they log failures and return normally, so
//! a broken row or a missing collaborator never aborts the host's event
//! dispatch.

use crate::collab::Collaborators;
use crate::debounce::{Debouncer, Ticket};
use crate::error::ReviewError;
use crate::filter::{FilterState, VisualFilterController};
use crate::geometry::{screen_to_time_freq, ViewportGeometry};
use crate::hit_test::find_matches;
use crate::scale::FALLBACK_NYQUIST_HZ;
use crate::table::TableSurface;
use crate::types::{CursorHint, PointerPosition, TimeFreq, ViewportRect};

/// Quiet period before a rebuilt table gets the filter re-applied.
pub const DEFAULT_REAPPLY_DELAY_MS: u32 = 140;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub reapply_delay_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { reapply_delay_ms: DEFAULT_REAPPLY_DELAY_MS }
    }
}

/// Transport controls that clear the visual filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    ResumePauseToggle,
    Stop,
    PlayFromStart,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Over the axis labels, or no canvas to map against.
    Unmapped,
    NoMatch,
    Filtered(Vec<usize>),
    Failed,
}

pub struct ReviewSession<T: TableSurface> {
    collab: Collaborators,
    filter: VisualFilterController<T>,
    reapply: Debouncer,
}

impl<T: TableSurface> ReviewSession<T> {
    pub fn new(table: T, collab: Collaborators, config: SessionConfig) -> Self {
        Self {
            collab,
            filter: VisualFilterController::new(table),
            reapply: Debouncer::new(config.reapply_delay_ms),
        }
    }

    pub fn filter_state(&self) -> &FilterState {
        self.filter.state()
    }

    pub fn table(&self) -> &T {
        self.filter.table()
    }

    fn nyquist_hz(&self) -> Option<f64> {
        self.collab.audio.as_ref().and_then(|a| a.nyquist_hz())
    }

    /// Pointer position → time/frequency, from freshly measured geometry.
    pub fn map_pointer(&self, pointer: PointerPosition) -> Option<TimeFreq> {
        let metrics = self.collab.viewport.canvas_metrics()?;
        let geom = ViewportGeometry::from_canvas(&metrics);
        let scale = self.collab.viewport.scale_settings().resolve(self.nyquist_hz());
        let total_cols = self
            .collab
            .draw
            .as_ref()
            .and_then(|d| d.total_columns())
            .unwrap_or(0);
        screen_to_time_freq(pointer, &geom, &scale, total_cols)
    }

    /// Annotation rows under the pointer, in table order.
    pub fn matches_at(&self, pointer: PointerPosition) -> Vec<usize> {
        self.map_pointer(pointer)
            .map(|point| self.matches_at_point(point))
            .unwrap_or_default()
    }

    fn matches_at_point(&self, point: TimeFreq) -> Vec<usize> {
        let table = self.collab.annotations.annotations();
        let mapping = self.collab.annotations.mapping();
        let nyquist = self.nyquist_hz().unwrap_or(FALLBACK_NYQUIST_HZ);
        find_matches(point, table.as_deref(), &mapping, nyquist)
    }

    pub fn on_pointer_move(&self, pointer: PointerPosition) -> CursorHint {
        if self.matches_at(pointer).is_empty() {
            CursorHint::Default
        } else {
            CursorHint::Pointer
        }
    }

    /// Filter the table to the annotations under the pointer.
    ///
    /// Order matters: an active filter is restored first, playback is paused,
    /// and only then is the new filter applied.
    pub fn on_click(&mut self, pointer: PointerPosition) -> ClickOutcome {
        let Some(point) = self.map_pointer(pointer) else {
            return ClickOutcome::Unmapped;
        };
        let matches = self.matches_at_point(point);
        if matches.is_empty() {
            return ClickOutcome::NoMatch;
        }
        match self.filter_to(&matches) {
            Ok(()) => ClickOutcome::Filtered(matches),
            Err(e) => {
                log::error!("viewport click: {e}");
                ClickOutcome::Failed
            }
        }
    }

    fn filter_to(&mut self, matches: &[usize]) -> Result<(), ReviewError> {
        if self.filter.is_active() {
            self.filter.restore()?;
        }
        self.pause_playback();
        self.filter.apply_filter(matches.iter().copied())?;
        Ok(())
    }

    fn pause_playback(&self) {
        let Some(audio) = &self.collab.audio else { return };
        if !audio.is_playing() {
            return;
        }
        audio.pause();
        if let Some(draw) = &self.collab.draw {
            draw.stop_loop();
        }
        log::debug!("viewport click: paused playback");
    }

    /// Enter/Space on the focused viewport clicks its center. Returns true when
    /// the key was handled (the caller should prevent the default action).
    pub fn on_key(&mut self, key: &str, rect: ViewportRect) -> bool {
        if key != "Enter" && key != " " {
            return false;
        }
        self.on_click(rect.center());
        true
    }

    /// Transport controls drop the filter, along with any reapply still
    /// waiting out a table rebuild.
    pub fn on_transport(&mut self, event: TransportEvent) {
        if self.reapply.is_pending() {
            self.reapply.cancel(self.collab.timers.as_ref());
            log::trace!("transport {event:?}: dropped pending filter reapply");
        }
        if !self.filter.is_active() {
            return;
        }
        if let Err(e) = self.filter.restore() {
            log::error!("transport {event:?}: {e}");
        }
    }

    /// The table was structurally rebuilt. While a filter is active this
    /// (re)starts the quiet period; otherwise it is ignored.
    pub fn on_table_changed(&mut self) {
        if !self.filter.is_active() {
            return;
        }
        let ticket = self.reapply.trigger(self.collab.timers.as_ref());
        log::trace!("filter reapply: scheduled ticket {ticket}");
    }

    /// A reapply timer fired.
    pub fn on_timer_fired(&mut self, ticket: Ticket) {
        if !self.reapply.fire(ticket) {
            return;
        }
        if let Err(e) = self.filter.reapply_last() {
            log::error!("filter reapply: {e}");
        }
    }
}
