use leptos::prelude::*;
use spectro_review_core::session::TransportEvent;
use crate::dom::bridge::{self, TransportCall};
use crate::dom::session::with_session;
use crate::ids;
use crate::state::ReviewState;

/// Any transport action clears the visual filter before playback changes.
fn transport(event: TransportEvent) {
    with_session(|s| s.on_transport(event));
    let call = match event {
        TransportEvent::ResumePauseToggle => TransportCall::Toggle,
        TransportEvent::Stop => TransportCall::Stop,
        TransportEvent::PlayFromStart => TransportCall::PlayFromStart,
    };
    bridge::transport(call);
}

#[component]
pub fn PlayControls() -> impl IntoView {
    let state = expect_context::<ReviewState>();

    view! {
        <div class="play-controls">
            <button
                id=ids::PLAY_TOGGLE
                class="layer-btn"
                on:click=move |_| transport(TransportEvent::ResumePauseToggle)
                title="Pause or resume playback"
            >{move || state.play_toggle_label.get()}</button>
            <button
                id=ids::STOP
                class="layer-btn"
                on:click=move |_| transport(TransportEvent::Stop)
            >"Stop"</button>
            <button
                id=ids::PLAY_FROM_START
                class="layer-btn"
                on:click=move |_| transport(TransportEvent::PlayFromStart)
            >{move || state.controls.get().play_label}</button>
        </div>
    }
}
