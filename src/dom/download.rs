//! Download of the reviewed annotation table.

use std::collections::HashMap;
use std::time::Duration;
use leptos::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};
use spectro_review_core::export::{reviewed_file_name, reviewed_tsv, ReviewMark};
use spectro_review_core::types::AnnotationTable;
use crate::dom::table::{row_index_of, row_input, table_rows};
use crate::ids;

const REVOKE_AFTER: Duration = Duration::from_secs(5);

/// Review marks as currently entered in the table rows.
fn read_marks() -> HashMap<usize, ReviewMark> {
    let Ok(rows) = table_rows() else {
        return HashMap::new();
    };
    rows.iter()
        .filter_map(|row| {
            let index = row_index_of(row)?;
            let ok = row_input(row, ids::REVIEWED_OK_SELECTOR).map_or(true, |cb| cb.checked());
            let remarks = row_input(row, ids::REMARKS_SELECTOR)
                .map(|input| input.value())
                .unwrap_or_default();
            Some((index, ReviewMark { ok, remarks }))
        })
        .collect()
}

pub fn save_reviewed(table: &AnnotationTable, source_name: Option<&str>) {
    let text = reviewed_tsv(table, &read_marks());
    let file_name = reviewed_file_name(source_name);
    match trigger_download(&text, &file_name) {
        Ok(()) => log::info!("save review: {file_name} ({} rows)", table.rows.len()),
        Err(e) => {
            log::error!("save review: {e:?}");
            if let Some(w) = web_sys::window() {
                let _ = w.alert_with_message("Could not save the reviewed table.");
            }
        }
    }
}

fn trigger_download(text: &str, file_name: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let options = BlobPropertyBag::new();
    options.set_type("text/plain;charset=utf-8");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let doc = document();
    let anchor: HtmlAnchorElement = doc.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    let body = doc.body().ok_or_else(|| JsValue::from_str("no document body"))?;
    body.append_child(&anchor)?;
    anchor.click();
    anchor.remove();

    set_timeout(
        move || {
            let _ = Url::revoke_object_url(&url);
        },
        REVOKE_AFTER,
    );
    Ok(())
}
