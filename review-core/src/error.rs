use thiserror::Error;

/// Failures surfaced by the filter controller and the table surface.
///
/// None of these are fatal: the session logs them at the event boundary and
/// leaves the filter state as it was before the failed transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("review table is not available")]
    TableUnavailable,

    #[error("row {index:?}: {reason}")]
    RowWrite { index: Option<usize>, reason: String },

    #[error("filter requested with an empty match set")]
    EmptyMatchSet,
}

impl ReviewError {
    pub fn row_write(index: Option<usize>, reason: impl Into<String>) -> Self {
        ReviewError::RowWrite { index, reason: reason.into() }
    }
}
