//! The rendered review table as a `TableSurface`.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement};
use spectro_review_core::error::ReviewError;
use spectro_review_core::table::{TableSurface, SELECTED_CLASS};
use crate::ids;

/// Rows are re-queried from the document on every call, so the surface stays
/// valid across table rebuilds.
pub struct DomReviewTable;

/// Current `<tr>` elements of the review table body.
pub fn table_rows() -> Result<Vec<HtmlElement>, ReviewError> {
    let frame = document()
        .get_element_by_id(ids::REVIEW_TABLE_FRAME)
        .ok_or(ReviewError::TableUnavailable)?;
    let list = frame
        .query_selector_all(ids::ROWS_SELECTOR)
        .map_err(|_| ReviewError::TableUnavailable)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

pub fn row_index_of(row: &HtmlElement) -> Option<usize> {
    row.get_attribute(ids::ROW_INDEX_ATTR)?.trim().parse().ok()
}

pub fn row_input(row: &HtmlElement, selector: &str) -> Option<HtmlInputElement> {
    row.query_selector(selector).ok().flatten()?.dyn_into::<HtmlInputElement>().ok()
}

fn write_error(row: &HtmlElement, what: &str, e: wasm_bindgen::JsValue) -> ReviewError {
    ReviewError::row_write(row_index_of(row), format!("{what}: {e:?}"))
}

impl TableSurface for DomReviewTable {
    type Row = HtmlElement;

    fn rows(&self) -> Result<Vec<HtmlElement>, ReviewError> {
        table_rows()
    }

    fn row_index(&self, row: &HtmlElement) -> Option<usize> {
        row_index_of(row)
    }

    fn set_visible(&self, row: &HtmlElement, visible: bool) -> Result<(), ReviewError> {
        let style = row.style();
        let result = if visible {
            style.remove_property("display").map(|_| ())
        } else {
            style.set_property("display", "none")
        };
        result.map_err(|e| write_error(row, "display", e))
    }

    fn is_visible(&self, row: &HtmlElement) -> bool {
        row.style()
            .get_property_value("display")
            .map_or(true, |d| d != "none")
    }

    fn set_class(&self, row: &HtmlElement, class: &str, on: bool) -> Result<(), ReviewError> {
        row.class_list()
            .toggle_with_force(class, on)
            .map(|_| ())
            .map_err(|e| write_error(row, class, e))
    }

    fn play_checkbox(&self, row: &HtmlElement) -> Option<bool> {
        row_input(row, ids::PLAY_CHECKBOX_SELECTOR).map(|cb| cb.checked())
    }

    fn uncheck_play_checkbox(&self, row: &HtmlElement) -> Result<(), ReviewError> {
        // Setting the property does not fire `change`
        let cb = row_input(row, ids::PLAY_CHECKBOX_SELECTOR)
            .ok_or_else(|| ReviewError::row_write(row_index_of(row), "no play checkbox"))?;
        cb.set_checked(false);
        Ok(())
    }
}

/// Make `selected` the only checked play checkbox and highlighted row.
/// This is the table's own selection handling; the visual filter never
/// selects rows.
pub fn mark_selected(selected: Option<usize>) -> Result<(), ReviewError> {
    for row in table_rows()? {
        let on = selected.is_some() && row_index_of(&row) == selected;
        if let Some(cb) = row_input(&row, ids::PLAY_CHECKBOX_SELECTOR) {
            cb.set_checked(on);
        }
        row.class_list()
            .toggle_with_force(SELECTED_CLASS, on)
            .map_err(|e| write_error(&row, SELECTED_CLASS, e))?;
    }
    Ok(())
}
