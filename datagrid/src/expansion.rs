//! Expanded rows.

use std::collections::HashSet;

use crate::row::RowId;

/// Set of expanded row IDs.
///
/// Independent of selection, and never cleared by sorting, filtering or
/// paging: a row filtered out and back in keeps its flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    expanded: HashSet<RowId>,
}

impl Expansion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the flag of `id`.
    pub fn toggle(&self, id: &RowId) -> Self {
        let mut expanded = self.expanded.clone();
        if !expanded.remove(id) {
            expanded.insert(id.clone());
        }
        Self { expanded }
    }

    pub fn is_expanded(&self, id: &RowId) -> bool {
        self.expanded.contains(id)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Expanded IDs in sorted order.
    pub fn ids(&self) -> Vec<RowId> {
        let mut ids: Vec<_> = self.expanded.iter().cloned().collect();
        ids.sort();
        ids
    }
}
