//! Collaborators the review session talks to but does not own.
//!
//! All methods take `&self`: the real implementations are thin handles onto
//! browser objects, and every call must degrade quietly when the object behind
//! it is missing.

use std::rc::Rc;
use std::sync::Arc;
use crate::debounce::TimerQueue;
use crate::geometry::CanvasMetrics;
use crate::scale::ScaleSettings;
use crate::types::{AnnotationTable, ColumnMapping};

/// Audio playback engine.
pub trait AudioEngine {
    /// Sample rate of the current audio context, if one exists.
    fn sample_rate(&self) -> Option<f64>;
    fn is_playing(&self) -> bool;
    fn pause(&self);
    fn has_buffer(&self) -> bool;
    /// Playback position in seconds.
    fn current_position(&self) -> f64;

    fn nyquist_hz(&self) -> Option<f64> {
        self.sample_rate()
            .filter(|sr| sr.is_finite() && *sr > 0.0)
            .map(|sr| sr / 2.0)
    }
}

/// Spectrogram draw loop.
pub trait DrawEngine {
    /// Logical columns drawn so far.
    fn total_columns(&self) -> Option<usize>;
    fn stop_loop(&self);
    /// Clear stamped annotation boxes and redraw them at the current scale.
    fn restamp_annotations(&self);
}

/// Live view of the drawing surface and the scale selectors.
pub trait ViewportReader {
    /// `None` when the canvas is not in the document.
    fn canvas_metrics(&self) -> Option<CanvasMetrics>;
    fn scale_settings(&self) -> ScaleSettings;
}

/// Parsed annotation file and its column mapping.
pub trait AnnotationSource {
    fn annotations(&self) -> Option<Arc<AnnotationTable>>;
    fn mapping(&self) -> ColumnMapping;
}

/// Everything the session reaches out to, injected at construction.
#[derive(Clone)]
pub struct Collaborators {
    pub audio: Option<Rc<dyn AudioEngine>>,
    pub draw: Option<Rc<dyn DrawEngine>>,
    pub viewport: Rc<dyn ViewportReader>,
    pub annotations: Rc<dyn AnnotationSource>,
    pub timers: Rc<dyn TimerQueue>,
}
