//! Enabled/label state of the controls around the viewport.

use crate::collab::AudioEngine;
use crate::types::AnnotationTable;

const POSITION_EPSILON: f64 = 1e-9;

pub const PLAY_FROM_SELECTED: &str = "Play from selected";
pub const PLAY_FROM_START: &str = "Play from start";

/// Audio loaded, not playing, and rewound to the start.
pub fn is_stopped(audio: Option<&dyn AudioEngine>) -> bool {
    match audio {
        Some(a) if a.has_buffer() => !a.is_playing() && a.current_position().abs() < POSITION_EPSILON,
        _ => false,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlState {
    /// Zoom and Y preset can only change while stopped, since the draw
    /// engine cannot rescale columns it has already drawn.
    pub scale_selectors_enabled: bool,
    pub label_selector_enabled: bool,
    pub save_enabled: bool,
    pub play_label: &'static str,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            scale_selectors_enabled: false,
            label_selector_enabled: false,
            save_enabled: false,
            play_label: PLAY_FROM_START,
        }
    }
}

pub fn control_state(
    audio: Option<&dyn AudioEngine>,
    annotations: Option<&AnnotationTable>,
    selected_row: Option<usize>,
) -> ControlState {
    let has_headers = annotations.map_or(false, |t| !t.headers.is_empty());
    ControlState {
        scale_selectors_enabled: is_stopped(audio),
        label_selector_enabled: has_headers,
        save_enabled: has_headers && annotations.map_or(false, |t| !t.rows.is_empty()),
        play_label: if selected_row.is_some() { PLAY_FROM_SELECTED } else { PLAY_FROM_START },
    }
}
