use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};
use spectro_review_core::session::ClickOutcome;
use spectro_review_core::types::{CursorHint, PointerPosition, ViewportRect};
use crate::dom::session::with_session;
use crate::ids;

/// Pointer position relative to the canvas, in CSS px.
fn pointer_in_canvas(ev: &MouseEvent) -> Option<PointerPosition> {
    let canvas: HtmlCanvasElement = ev.current_target()?.dyn_into().ok()?;
    let rect = canvas.get_bounding_client_rect();
    Some(PointerPosition::new(
        ev.client_x() as f64 - rect.left(),
        ev.client_y() as f64 - rect.top(),
    ))
}

/// The spectrogram viewport. The host's draw engine paints into the canvas;
/// this component only turns pointer and keyboard input into review actions.
#[component]
pub fn Spectrogram() -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let cursor = RwSignal::new(CursorHint::Default);

    let on_mousemove = move |ev: MouseEvent| {
        let Some(pointer) = pointer_in_canvas(&ev) else { return };
        if let Some(hint) = with_session(|s| s.on_pointer_move(pointer)) {
            if cursor.get_untracked() != hint {
                cursor.set(hint);
            }
        }
    };

    let on_click = move |ev: MouseEvent| {
        let Some(pointer) = pointer_in_canvas(&ev) else { return };
        match with_session(|s| s.on_click(pointer)) {
            Some(ClickOutcome::Filtered(rows)) => {
                log::debug!("viewport click: {} annotation(s) under pointer", rows.len());
            }
            Some(outcome) => log::trace!("viewport click: {outcome:?}"),
            None => {}
        }
    };

    let on_keydown = move |ev: KeyboardEvent| {
        let Some(canvas_el) = canvas_ref.get() else { return };
        let canvas: &HtmlCanvasElement = canvas_el.as_ref();
        let rect = canvas.get_bounding_client_rect();
        let rect = ViewportRect { width: rect.width(), height: rect.height() };
        let key = ev.key();
        if with_session(|s| s.on_key(&key, rect)) == Some(true) {
            ev.prevent_default();
        }
    };

    view! {
        <div class="spectrogram-container">
            <canvas
                id=ids::CANVAS
                node_ref=canvas_ref
                tabindex="0"
                aria-label="Spectrogram. Press Enter to show the annotations at the center."
                style:cursor=move || cursor.get().css()
                on:mousemove=on_mousemove
                on:click=on_click
                on:keydown=on_keydown
            />
        </div>
    }
}
