use std::sync::Arc;
use leptos::prelude::*;
use spectro_review_core::controls::ControlState;
use spectro_review_core::prefs::ReviewPrefs;
use spectro_review_core::types::AnnotationTable;
use crate::dom::storage;

/// Reactive state of the review page. Everything else (audio, drawing,
/// annotation parsing) lives in the host page and is reached through
/// `dom::bridge`.
#[derive(Clone, Copy)]
pub struct ReviewState {
    pub annotations: RwSignal<Option<Arc<AnnotationTable>>>,
    /// File name the annotations were loaded from.
    pub source_name: RwSignal<Option<String>>,
    /// Row chosen for playback by its play checkbox.
    pub selected_row: RwSignal<Option<usize>>,
    pub prefs: RwSignal<ReviewPrefs>,
    pub controls: RwSignal<ControlState>,
    pub play_toggle_label: RwSignal<&'static str>,
}

impl ReviewState {
    pub fn new() -> Self {
        Self {
            annotations: RwSignal::new(None),
            source_name: RwSignal::new(None),
            selected_row: RwSignal::new(None),
            prefs: RwSignal::new(storage::load_prefs()),
            controls: RwSignal::new(ControlState::default()),
            play_toggle_label: RwSignal::new(PLAY),
        }
    }
}

pub const PLAY: &str = "Play";
pub const PAUSE: &str = "Pause";
pub const RESUME: &str = "Resume";
