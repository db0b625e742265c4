use std::sync::Arc;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, KeyboardEvent};
use spectro_review_core::columns::{display_band, has_valid_start_end, resolve_keys, ResolvedKeys};
use spectro_review_core::types::{AnnotationRecord, AnnotationTable};
use crate::dom::{bridge, table};
use crate::ids;
use crate::state::ReviewState;

fn event_target_checked(ev: &web_sys::Event) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|el| el.checked())
        .unwrap_or(false)
}

/// The play checkboxes select at most one row for playback.
fn select_row(state: ReviewState, selected: Option<usize>) {
    if let Err(e) = table::mark_selected(selected) {
        log::error!("row selection: {e}");
    }
    state.selected_row.set(selected);
    bridge::set_selected_row_index(selected);
}

#[component]
pub fn ReviewTable() -> impl IntoView {
    let state = expect_context::<ReviewState>();

    view! {
        <div id=ids::REVIEW_TABLE_FRAME class="review-table-frame">
            {move || match state.annotations.get() {
                Some(t) if !t.is_empty() => view! { <AnnotationTableView table=t /> }.into_any(),
                _ => view! {
                    <div class="empty-state">"No annotations loaded"</div>
                }.into_any(),
            }}
        </div>
    }
}

/// Leading review columns, followed by every header of the annotation file.
const REVIEW_COLUMNS: &[&str] = &["Play", "Sr.", "Reviewed OK", "Rejection remarks"];

#[component]
fn AnnotationTableView(table: Arc<AnnotationTable>) -> impl IntoView {
    let keys = Arc::new(resolve_keys(&table.headers));
    let headers: Arc<[String]> = table.headers.clone().into();
    let playable = has_valid_start_end(&table);

    let header_cells = REVIEW_COLUMNS
        .iter()
        .map(|name| name.to_string())
        .chain(table.headers.iter().cloned())
        .map(|name| view! { <th title=name.clone()>{name.clone()}</th> })
        .collect_view();

    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            view! {
                <AnnotationRow
                    index=index
                    row=row.clone()
                    headers=headers.clone()
                    keys=keys.clone()
                    playable=playable
                />
            }
        })
        .collect_view();

    view! {
        <table class="review-table">
            <thead>
                <tr>{header_cells}</tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}

#[component]
fn AnnotationRow(
    index: usize,
    row: AnnotationRecord,
    headers: Arc<[String]>,
    keys: Arc<ResolvedKeys>,
    playable: bool,
) -> impl IntoView {
    let reviewed_ok = RwSignal::new(true);
    let remarks_ref = NodeRef::<leptos::html::Input>::new();
    let state = expect_context::<ReviewState>();

    // Band the host player filters to when this row is played
    let (low_hz, high_hz) = display_band(&row, &keys);

    let data_cells = headers
        .iter()
        .map(|h| {
            let value = row.get(h).cloned().unwrap_or_default();
            view! { <td title=value.clone()>{value.clone()}</td> }
        })
        .collect_view();

    let play_title = if playable { "Play this annotation" } else { "No valid start/end times" };

    let on_play_change = move |ev: web_sys::Event| {
        let selected = event_target_checked(&ev).then_some(index);
        select_row(state, selected);
    };

    let on_ok_change = move |ev: web_sys::Event| {
        let ok = event_target_checked(&ev);
        reviewed_ok.set(ok);
        if ok {
            if let Some(input) = remarks_ref.get() {
                input.set_value("");
            }
        }
    };

    // Tab out of the remarks goes back to the transport, not the next row
    let on_remarks_keydown = move |ev: KeyboardEvent| {
        if ev.key() != "Tab" || ev.shift_key() {
            return;
        }
        if let Some(btn) = document()
            .get_element_by_id(ids::PLAY_TOGGLE)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            ev.prevent_default();
            let _ = btn.focus();
        }
    };

    view! {
        <tr
            data-row-index=index.to_string()
            data-low-hz=low_hz.to_string()
            data-high-hz=high_hz.to_string()
        >
            <td class="play-cell">
                <input
                    type="checkbox"
                    class="play-checkbox"
                    disabled=!playable
                    title=play_title
                    on:change=on_play_change
                />
            </td>
            <td class="sr-cell">{index + 1}</td>
            <td class="reviewed-cell">
                <input
                    type="checkbox"
                    class="compact-checkbox"
                    prop:checked=true
                    on:change=on_ok_change
                />
            </td>
            <td>
                <input
                    type="text"
                    class="compact-input"
                    node_ref=remarks_ref
                    placeholder="Rejection remarks"
                    prop:disabled=move || reviewed_ok.get()
                    on:keydown=on_remarks_keydown
                />
            </td>
            {data_cells}
        </tr>
    }
}
