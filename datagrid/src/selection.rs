//! Row selection by identity.
//!
//! Selection is keyed by [`RowId`] so it stays stable when rows are sorted,
//! filtered or paged out of view.

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::row::RowId;

/// State of the "select all" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    Unchecked,
    Checked,
    /// Some, but not all, visible rows are selected.
    Indeterminate,
}

/// ID-based selection state.
///
/// Keeps selection order (the order rows were selected in) and never holds
/// the same ID twice. Operations return the new selection and leave the
/// current one untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    selected: Vec<RowId>,
}

impl Selection {
    /// Empty selection.
    pub fn none() -> Self {
        Self::default()
    }

    /// Selection of exactly the given IDs (duplicates dropped).
    pub fn all<I: IntoIterator<Item = RowId>>(ids: I) -> Self {
        let mut seen = HashSet::new();
        Self {
            selected: ids.into_iter().filter(|id| seen.insert(id.clone())).collect(),
        }
    }

    /// Add `id` if absent, remove it if present.
    pub fn toggle(&self, id: &RowId) -> Self {
        let mut selected = self.selected.clone();
        match selected.iter().position(|s| s == id) {
            Some(pos) => {
                selected.remove(pos);
            }
            None => selected.push(id.clone()),
        }
        Self { selected }
    }

    /// Check if an ID is selected.
    pub fn contains(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    /// Selected IDs in selection order.
    pub fn ids(&self) -> &[RowId] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Header checkbox state for the currently visible rows.
    ///
    /// Only selected IDs that are actually visible count.
    pub fn check_state(&self, visible: &[RowId]) -> CheckState {
        let selected: HashSet<&RowId> = self.selected.iter().collect();
        let visible_ids: HashSet<&RowId> = visible.iter().collect();
        let count = visible_ids.iter().filter(|id| selected.contains(*id)).count();
        if count == 0 {
            CheckState::Unchecked
        } else if count == visible_ids.len() {
            CheckState::Checked
        } else {
            CheckState::Indeterminate
        }
    }
}

impl From<Vec<RowId>> for Selection {
    fn from(ids: Vec<RowId>) -> Self {
        Self::all(ids)
    }
}

impl From<Selection> for Vec<RowId> {
    fn from(selection: Selection) -> Self {
        selection.selected
    }
}
