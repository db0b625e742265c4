//! Periodic sync with the host page.
//!
//! The host has no change events for its annotation object or playback state,
//! so both are sampled on an interval.

use std::cell::RefCell;
use std::sync::Arc;
use std::time::Duration;
use leptos::prelude::*;
use spectro_review_core::collab::AudioEngine;
use spectro_review_core::columns::default_label_column;
use spectro_review_core::controls::{control_state, is_stopped};
use crate::dom::bridge::{self, AnnotationStamp, JsAudioEngine};
use crate::dom::storage;
use crate::state::{ReviewState, PAUSE, PLAY, RESUME};

const POLL_INTERVAL: Duration = Duration::from_millis(300);

thread_local! {
    static LAST_STAMP: RefCell<Option<AnnotationStamp>> = RefCell::new(None);
}

pub fn start(state: ReviewState) {
    tick(state);
    if let Err(e) = set_interval_with_handle(move || tick(state), POLL_INTERVAL) {
        log::error!("host poll: setInterval failed: {e:?}");
    }
}

fn tick(state: ReviewState) {
    sync_annotations(state);
    sync_controls(state);
}

fn sync_annotations(state: ReviewState) {
    let stamp = bridge::annotation_stamp();
    let changed = LAST_STAMP.with(|last| {
        let mut last = last.borrow_mut();
        let same = match (last.as_ref(), stamp.as_ref()) {
            (Some(a), Some(b)) => a.same_as(b),
            (None, None) => true,
            _ => false,
        };
        if !same {
            *last = stamp.clone();
        }
        !same
    });
    if !changed {
        return;
    }

    let table = bridge::read_annotations();
    log::info!(
        "annotations: {} row(s) from {:?}",
        table.as_ref().map_or(0, |t| t.rows.len()),
        bridge::source_name()
    );

    if let Some(t) = &table {
        let label = state
            .prefs
            .with_untracked(|p| p.label_column.clone())
            .filter(|l| t.headers.contains(l))
            .or_else(|| default_label_column(&t.headers));
        bridge::set_label_column(label.as_deref().unwrap_or(""));
        state.prefs.update(|p| p.label_column = label);
        state.prefs.with_untracked(storage::save_prefs);
    }

    // Indices refer to the previous file
    state.selected_row.set(None);
    bridge::set_selected_row_index(None);
    state.source_name.set(bridge::source_name());
    state.annotations.set(table.map(Arc::new));
}

fn sync_controls(state: ReviewState) {
    let audio = JsAudioEngine::new(state.play_toggle_label);
    let next = state.annotations.with_untracked(|t| {
        control_state(Some(&audio), t.as_deref(), state.selected_row.get_untracked())
    });
    if state.controls.get_untracked() != next {
        state.controls.set(next);
    }

    let label = if audio.is_playing() {
        PAUSE
    } else if is_stopped(Some(&audio)) || !audio.has_buffer() {
        PLAY
    } else {
        RESUME
    };
    if state.play_toggle_label.get_untracked() != label {
        state.play_toggle_label.set(label);
    }
}
