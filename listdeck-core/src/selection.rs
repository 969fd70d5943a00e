//! Row selection for bulk actions.

use crate::binding::RowId;

/// Identifiers of the rows currently marked for bulk action.
///
/// Insertion order is preserved so confirmation prompts list ids the way
/// the table shows them. The controller owns this set; the view mirrors
/// it but never holds its own copy of the truth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<RowId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with the rows currently checked in the view,
    /// dropping duplicates while keeping first-seen order.
    pub fn replace(&mut self, ids: Vec<RowId>) {
        self.ids.clear();
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[RowId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: RowId) -> bool {
        self.ids.contains(&id)
    }
}
