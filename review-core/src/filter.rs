//! Visual filter over the review table.
//!
//! Filtering is display-only. It hides rows, marks matches, and clears the
//! play checkbox of rows it hides; it never selects anything and never
//! touches the shared selected-row index. Because the checkbox is cleared
//! without a change event, the table's selection state stays stale until the
//! reviewer next interacts with the table. That is intended.

use std::collections::BTreeSet;
use crate::error::ReviewError;
use crate::table::{TableSurface, MATCH_CLASS, SELECTED_CLASS};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FilterState {
    #[default]
    Unfiltered,
    /// Never empty.
    Filtered(BTreeSet<usize>),
}

impl FilterState {
    pub fn is_active(&self) -> bool {
        matches!(self, FilterState::Filtered(_))
    }

    pub fn matched(&self) -> Option<&BTreeSet<usize>> {
        match self {
            FilterState::Filtered(set) => Some(set),
            FilterState::Unfiltered => None,
        }
    }
}

/// What an apply did to the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub shown: usize,
    pub hidden: usize,
    /// Play checkboxes cleared because their row was hidden.
    pub unchecked: usize,
}

pub struct VisualFilterController<T: TableSurface> {
    table: T,
    state: FilterState,
}

impl<T: TableSurface> VisualFilterController<T> {
    pub fn new(table: T) -> Self {
        Self { table, state: FilterState::Unfiltered }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    /// Show exactly the rows whose index is in `matched`, hide the rest.
    ///
    /// The state only moves to `Filtered` once every row write succeeded.
    pub fn apply_filter<I>(&mut self, matched: I) -> Result<ApplyReport, ReviewError>
    where
        I: IntoIterator<Item = usize>,
    {
        let matched: BTreeSet<usize> = matched.into_iter().collect();
        if matched.is_empty() {
            return Err(ReviewError::EmptyMatchSet);
        }

        let rows = self.table.rows()?;
        let mut report = ApplyReport::default();

        for row in &rows {
            // Rows without a usable index are never filtered out
            let show = self.table.row_index(row).map_or(true, |i| matched.contains(&i));
            self.table.set_visible(row, show)?;
            let marked = show && self.table.row_index(row).is_some();
            self.table.set_class(row, MATCH_CLASS, marked)?;
            if show {
                report.shown += 1;
            } else {
                report.hidden += 1;
            }
        }

        for row in &rows {
            if self.table.row_index(row).is_none() || self.table.is_visible(row) {
                continue;
            }
            if self.table.play_checkbox(row) == Some(true) {
                self.table.uncheck_play_checkbox(row)?;
                self.table.set_class(row, SELECTED_CLASS, false)?;
                report.unchecked += 1;
            }
        }

        log::debug!(
            "filter: applied {} match(es): {} shown, {} hidden, {} play checkbox(es) cleared",
            matched.len(), report.shown, report.hidden, report.unchecked
        );
        self.state = FilterState::Filtered(matched);
        Ok(report)
    }

    /// Show every row and drop the match marker. Checkboxes are left alone.
    pub fn restore(&mut self) -> Result<(), ReviewError> {
        for row in self.table.rows()? {
            self.table.set_visible(&row, true)?;
            self.table.set_class(&row, MATCH_CLASS, false)?;
        }
        if self.state.is_active() {
            log::debug!("filter: restored unfiltered view");
        }
        self.state = FilterState::Unfiltered;
        Ok(())
    }

    /// Re-run the last filter against a (possibly rebuilt) table.
    ///
    /// Rows are matched by their index attribute, not by identity. Recorded
    /// indices missing from the new table are dropped; if none survive, the
    /// view is restored instead.
    pub fn reapply_last(&mut self) -> Result<(), ReviewError> {
        let Some(recorded) = self.state.matched() else { return Ok(()) };
        let present: BTreeSet<usize> = self
            .table
            .rows()?
            .iter()
            .filter_map(|row| self.table.row_index(row))
            .filter(|i| recorded.contains(i))
            .collect();

        if present.is_empty() {
            log::debug!("filter: matched rows gone after rebuild, restoring");
            self.restore()
        } else {
            self.apply_filter(present).map(|_| ())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{MATCH_CLASS, SELECTED_CLASS};
    use crate::testing::FakeTable;

    #[test]
    fn test_apply_shows_only_matches() {
        let table = FakeTable::with_rows(6);
        let mut f = VisualFilterController::new(table.clone());
        let report = f.apply_filter([1, 4]).unwrap();
        assert_eq!(report, ApplyReport { shown: 2, hidden: 4, unchecked: 0 });
        assert_eq!(table.visible_indices(), vec![1, 4]);
        assert!(table.row(1).has_class(MATCH_CLASS));
        assert!(!table.row(0).has_class(MATCH_CLASS));
        assert_eq!(f.state(), &FilterState::Filtered([1, 4].into_iter().collect()));
    }

    #[test]
    fn test_empty_apply_rejected() {
        let table = FakeTable::with_rows(3);
        let mut f = VisualFilterController::new(table.clone());
        assert_eq!(f.apply_filter(Vec::new()), Err(ReviewError::EmptyMatchSet));
        assert!(!f.is_active());
        assert_eq!(table.visible_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_hidden_checked_row_loses_checkbox_only() {
        let table = FakeTable::with_rows(4);
        table.user_select(2);
        let mut f = VisualFilterController::new(table.clone());

        let report = f.apply_filter([0, 1]).unwrap();
        assert_eq!(report.unchecked, 1);
        assert_eq!(table.row(2).play, Some(false));
        assert!(!table.row(2).has_class(SELECTED_CLASS));
        // The selection owner was not consulted: its index is now stale
        assert_eq!(table.selected(), Some(2));
        assert_eq!(table.notify_calls(), 1);
    }

    #[test]
    fn test_visible_checked_row_untouched() {
        let table = FakeTable::with_rows(4);
        table.user_select(1);
        let mut f = VisualFilterController::new(table.clone());
        let report = f.apply_filter([1, 3]).unwrap();
        assert_eq!(report.unchecked, 0);
        assert_eq!(table.row(1).play, Some(true));
        assert!(table.row(1).has_class(SELECTED_CLASS));
    }

    #[test]
    fn test_unindexed_rows_stay_visible() {
        let table = FakeTable::with_rows(3);
        table.push_unindexed_row();
        let mut f = VisualFilterController::new(table.clone());
        f.apply_filter([0]).unwrap();
        let extra = table.row(3);
        assert!(extra.visible);
        assert!(!extra.has_class(MATCH_CLASS));
    }

    #[test]
    fn test_restore_is_idempotent() {
        let table = FakeTable::with_rows(5);
        table.user_select(3);
        let mut f = VisualFilterController::new(table.clone());
        f.apply_filter([0]).unwrap();
        f.restore().unwrap();
        let once = table.snapshot();
        f.restore().unwrap();
        assert_eq!(table.snapshot(), once);
        assert_eq!(f.state(), &FilterState::Unfiltered);
        assert_eq!(table.visible_indices(), vec![0, 1, 2, 3, 4]);
        assert!((0..5).all(|i| !table.row(i).has_class(MATCH_CLASS)));
        // Restore does not re-check what the filter cleared
        assert_eq!(table.row(3).play, Some(false));
    }

    #[test]
    fn test_reapply_after_identical_rebuild() {
        let table = FakeTable::with_rows(10);
        let mut f = VisualFilterController::new(table.clone());
        f.apply_filter([2, 5]).unwrap();
        table.rebuild(10);
        assert_eq!(table.visible_indices().len(), 10);

        f.reapply_last().unwrap();
        assert_eq!(table.visible_indices(), vec![2, 5]);
        assert!(table.row(2).has_class(MATCH_CLASS) && table.row(5).has_class(MATCH_CLASS));
    }

    #[test]
    fn test_reapply_with_matches_gone_restores() {
        let table = FakeTable::with_rows(10);
        let mut f = VisualFilterController::new(table.clone());
        f.apply_filter([7, 8]).unwrap();
        table.rebuild(5);
        f.reapply_last().unwrap();
        assert!(!f.is_active());
        assert_eq!(table.visible_indices(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_reapply_keeps_surviving_matches() {
        let table = FakeTable::with_rows(10);
        let mut f = VisualFilterController::new(table.clone());
        f.apply_filter([1, 8]).unwrap();
        table.rebuild(4);
        f.reapply_last().unwrap();
        assert_eq!(f.state(), &FilterState::Filtered([1].into_iter().collect()));
        assert_eq!(table.visible_indices(), vec![1]);
    }

    #[test]
    fn test_reapply_when_unfiltered_is_noop() {
        let table = FakeTable::with_rows(3);
        let mut f = VisualFilterController::new(table.clone());
        f.reapply_last().unwrap();
        assert!(!f.is_active());
        assert_eq!(table.writes(), 0);
    }

    #[test]
    fn test_failed_write_leaves_state_unchanged() {
        let table = FakeTable::with_rows(4);
        let mut f = VisualFilterController::new(table.clone());
        f.apply_filter([0]).unwrap();

        table.fail_writes(true);
        assert!(f.apply_filter([2]).is_err());
        assert_eq!(f.state(), &FilterState::Filtered([0].into_iter().collect()));
        assert!(f.restore().is_err());
        assert!(f.is_active());

        table.set_available(false);
        assert_eq!(f.restore(), Err(ReviewError::TableUnavailable));
        assert!(f.is_active());
    }
}
