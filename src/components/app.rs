use leptos::prelude::*;
use crate::components::play_controls::PlayControls;
use crate::components::review_table::ReviewTable;
use crate::components::spectrogram::Spectrogram;
use crate::components::toolbar::{sync_host_scale, Toolbar};
use crate::dom::{poll, session};
use crate::state::ReviewState;

#[component]
pub fn App() -> impl IntoView {
    let state = ReviewState::new();
    provide_context(state);

    // Runs once the view is mounted, so the canvas and table frame exist
    Effect::new(move || {
        session::install(state);
        sync_host_scale(state);
        poll::start(state);
    });

    view! {
        <div class="app">
            <Toolbar />
            <div class="main">
                <Spectrogram />
                <PlayControls />
                <ReviewTable />
            </div>
        </div>
    }
}
