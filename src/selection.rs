// Checkbox selection over the rows of a filtered list

use crate::record::{Record, RecordId};
use std::collections::HashSet;

/// Selected record ids
///
/// Selection survives filtering; the "all" checks only look at the rows that
/// are currently visible to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection {
    selected: HashSet<RecordId>,
}

impl RowSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: &RecordId) {
        if !self.selected.remove(id) {
            self.selected.insert(id.clone());
        }
    }

    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.selected.contains(id)
    }

    /// Clear when every row is selected, otherwise select every row
    pub fn toggle_all<R: Record>(&mut self, rows: &[&R]) {
        if self.all_selected(rows) {
            self.selected.clear();
        } else {
            self.selected.extend(rows.iter().map(|r| r.id().clone()));
        }
    }

    /// True when there is at least one row and every row is selected
    pub fn all_selected<R: Record>(&self, rows: &[&R]) -> bool {
        !rows.is_empty() && rows.iter().all(|r| self.selected.contains(r.id()))
    }

    /// True when any row is selected
    pub fn some_selected<R: Record>(&self, rows: &[&R]) -> bool {
        rows.iter().any(|r| self.selected.contains(r.id()))
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_toggle_one() {
        let mut selection = RowSelection::new();
        let id = RecordId::Num(23487);
        selection.toggle(&id);
        assert!(selection.is_selected(&id));
        selection.toggle(&id);
        assert!(!selection.is_selected(&id));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all() {
        let payments = seed::payments();
        let rows: Vec<&_> = payments.iter().take(3).collect();
        let mut selection = RowSelection::new();

        selection.toggle(rows[1].id());
        assert!(selection.some_selected(&rows));
        assert!(!selection.all_selected(&rows));

        selection.toggle_all(&rows);
        assert!(selection.all_selected(&rows));
        assert_eq!(selection.len(), 3);

        selection.toggle_all(&rows);
        assert!(selection.is_empty());
        assert!(!selection.some_selected(&rows));
    }

    #[test]
    fn test_empty_rows_are_never_all_selected() {
        let selection = RowSelection::new();
        let rows: Vec<&crate::models::Payment> = Vec::new();
        assert!(!selection.all_selected(&rows));
        assert!(!selection.some_selected(&rows));
    }
}
