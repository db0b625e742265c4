use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement, HtmlSelectElement};
use spectro_review_core::collab::DrawEngine;
use spectro_review_core::scale::{speed_from_select_value, YPreset, X_ZOOM_OPTIONS, Y_PRESET_OPTIONS};
use crate::dom::bridge::{self, JsDrawEngine};
use crate::dom::{download, storage};
use crate::ids;
use crate::state::ReviewState;

fn select_value(ev: &Event) -> Option<String> {
    ev.target()
        .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
        .map(|s| s.value())
}

/// Forward the zoom to the host's legacy `#speed` input, which the draw
/// engine listens to.
fn forward_speed(value: &str) {
    let Some(input) = document()
        .get_element_by_id(ids::SPEED)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    input.set_value(value);
    match Event::new("change") {
        Ok(ev) => {
            let _ = input.dispatch_event(&ev);
        }
        Err(e) => log::error!("x zoom: {e:?}"),
    }
}

/// Bring the host in line with the stored scale. The draw engine only learns
/// the zoom through `#speed`, and the viewport maps pointers with the stored
/// value, so the two must agree before the first click. The Y preset needs no
/// forwarding: the host reads `#yPreset`, which renders from the same prefs.
pub fn sync_host_scale(state: ReviewState) {
    let speed = state.prefs.with_untracked(|p| p.scale.speed);
    forward_speed(&speed.to_string());
    JsDrawEngine.restamp_annotations();
}

#[component]
pub fn Toolbar() -> impl IntoView {
    let state = expect_context::<ReviewState>();
    let scale_disabled = move || !state.controls.get().scale_selectors_enabled;

    let on_zoom_change = move |ev: Event| {
        let Some(value) = select_value(&ev) else { return };
        let speed = speed_from_select_value(&value);
        state.prefs.update(|p| p.scale.speed = speed);
        state.prefs.with_untracked(storage::save_prefs);
        forward_speed(&value);
        JsDrawEngine.restamp_annotations();
    };

    let on_preset_change = move |ev: Event| {
        let Some(value) = select_value(&ev) else { return };
        state.prefs.update(|p| p.scale.y_preset = YPreset::from_select_value(&value));
        state.prefs.with_untracked(storage::save_prefs);
        JsDrawEngine.restamp_annotations();
    };

    let on_label_change = move |ev: Event| {
        let Some(value) = select_value(&ev) else { return };
        bridge::set_label_column(&value);
        state.prefs.update(|p| p.label_column = (!value.is_empty()).then(|| value.clone()));
        state.prefs.with_untracked(storage::save_prefs);
        JsDrawEngine.restamp_annotations();
    };

    let on_save = move |_| {
        let source = state.source_name.get_untracked();
        state.annotations.with_untracked(|t| match t {
            Some(table) => download::save_reviewed(table, source.as_deref()),
            None => log::warn!("save review: no annotations loaded"),
        });
    };

    let speed_value = move || state.prefs.with(|p| p.scale.speed.to_string());
    let preset_value = move || state.prefs.with(|p| p.scale.y_preset.select_value());
    let label_value = move || state.prefs.with(|p| p.label_column.clone().unwrap_or_default());
    let headers = move || {
        state
            .annotations
            .with(|t| t.as_ref().map(|t| t.headers.clone()).unwrap_or_default())
    };

    view! {
        <div class="toolbar">
            <span class="toolbar-brand">"Annotation review"</span>
            <label class="setting-row">
                <span class="setting-label">"X zoom"</span>
                <select
                    id=ids::X_ZOOM
                    class="setting-select"
                    disabled=scale_disabled
                    prop:value=speed_value
                    on:change=on_zoom_change
                >
                    {X_ZOOM_OPTIONS.iter().map(|(value, label)| view! {
                        <option value=*value selected=move || speed_value() == *value>{*label}</option>
                    }).collect_view()}
                </select>
            </label>
            <label class="setting-row">
                <span class="setting-label">"Y range"</span>
                <select
                    id=ids::Y_PRESET
                    class="setting-select"
                    disabled=scale_disabled
                    prop:value=preset_value
                    on:change=on_preset_change
                >
                    {Y_PRESET_OPTIONS.iter().map(|(value, label)| view! {
                        <option value=*value selected=move || preset_value() == *value>{*label}</option>
                    }).collect_view()}
                </select>
            </label>
            <label class="setting-row">
                <span class="setting-label">"Label"</span>
                <select
                    id=ids::LABEL_COLUMN
                    class="setting-select"
                    disabled=move || !state.controls.get().label_selector_enabled
                    prop:value=label_value
                    on:change=on_label_change
                >
                    <option value="">"(none)"</option>
                    {move || headers().into_iter().map(|h| {
                        let selected = h.clone();
                        view! {
                            <option value=h.clone() selected=move || label_value() == selected>{h.clone()}</option>
                        }
                    }).collect_view()}
                </select>
            </label>

            <div style="flex: 1;"></div>

            <button
                id=ids::SAVE_REVIEW
                class="toolbar-save-btn"
                disabled=move || !state.controls.get().save_enabled
                on:click=on_save
                title="Download the table with review columns"
            >"Save review"</button>
        </div>
    }
}
