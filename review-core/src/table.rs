//! The review table as seen by the filter controller.

use std::rc::Rc;
use crate::error::ReviewError;

/// Marker class on rows matched by the active visual filter.
pub const MATCH_CLASS: &str = "annotation-selected";
/// Highlight class the table puts on the row selected for playback.
pub const SELECTED_CLASS: &str = "selected-row";

/// Visual surface of the review table: one row per annotation, each carrying
/// a stable row-index attribute.
///
/// Deliberately write-limited: the play checkbox can only be *unchecked*, and
/// only visually (no change event). Selecting a row for playback belongs to
/// the table's own checkbox handler and is not reachable through this trait.
pub trait TableSurface {
    type Row;

    /// Current rows, in DOM order. Re-queried on every call, since the table
    /// may have been rebuilt since the last one.
    fn rows(&self) -> Result<Vec<Self::Row>, ReviewError>;

    /// The row's stable annotation index, if it carries a valid one.
    fn row_index(&self, row: &Self::Row) -> Option<usize>;

    fn set_visible(&self, row: &Self::Row, visible: bool) -> Result<(), ReviewError>;

    fn is_visible(&self, row: &Self::Row) -> bool;

    fn set_class(&self, row: &Self::Row, class: &str, on: bool) -> Result<(), ReviewError>;

    /// `Some(checked)` for rows with a play checkbox, `None` otherwise.
    fn play_checkbox(&self, row: &Self::Row) -> Option<bool>;

    /// Clear the play checkbox without dispatching its change event.
    fn uncheck_play_checkbox(&self, row: &Self::Row) -> Result<(), ReviewError>;
}

impl<T: TableSurface + ?Sized> TableSurface for Rc<T> {
    type Row = T::Row;

    fn rows(&self) -> Result<Vec<Self::Row>, ReviewError> {
        (**self).rows()
    }

    fn row_index(&self, row: &Self::Row) -> Option<usize> {
        (**self).row_index(row)
    }

    fn set_visible(&self, row: &Self::Row, visible: bool) -> Result<(), ReviewError> {
        (**self).set_visible(row, visible)
    }

    fn is_visible(&self, row: &Self::Row) -> bool {
        (**self).is_visible(row)
    }

    fn set_class(&self, row: &Self::Row, class: &str, on: bool) -> Result<(), ReviewError> {
        (**self).set_class(row, class, on)
    }

    fn play_checkbox(&self, row: &Self::Row) -> Option<bool> {
        (**self).play_checkbox(row)
    }

    fn uncheck_play_checkbox(&self, row: &Self::Row) -> Result<(), ReviewError> {
        (**self).uncheck_play_checkbox(row)
    }
}
