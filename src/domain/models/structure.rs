//! The compacted decision structure used as diagnosis input.

use serde::{Deserialize, Serialize};

use super::form::FormView;
use super::registry::CriterionId;

/// One non-empty criterion and its non-empty sub-items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureEntry {
    pub criterion_id: CriterionId,
    pub criterion: String,
    pub sub_items: Vec<String>,
}

/// Ordered `(criterion, sub-items)` pairs. Recomputed on every pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    pub entries: Vec<StructureEntry>,
}

impl Structure {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StructureEntry> {
        self.entries.iter()
    }

    /// Total number of sub-items across all criteria.
    pub fn sub_item_total(&self) -> usize {
        self.entries.iter().map(|e| e.sub_items.len()).sum()
    }

    /// Borrowed `(criterion, sub-items)` view, mostly for assertions.
    pub fn pairs(&self) -> Vec<(&str, Vec<&str>)> {
        self.entries
            .iter()
            .map(|e| {
                (
                    e.criterion.as_str(),
                    e.sub_items.iter().map(String::as_str).collect(),
                )
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Structure {
    type Item = &'a StructureEntry;
    type IntoIter = std::slice::Iter<'a, StructureEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Compacts a rendered form into a [`Structure`].
///
/// A criterion is kept iff its label is non-empty; sub-items follow the same
/// rule independently per criterion. Values are not trimmed, so a
/// whitespace-only string is kept verbatim. Order is preserved.
pub fn assemble(form: &FormView) -> Structure {
    let entries = form
        .filled_criteria()
        .map(|criterion| StructureEntry {
            criterion_id: criterion.id,
            criterion: criterion.slot.value.clone(),
            sub_items: criterion
                .sub_items
                .iter()
                .filter(|slot| !slot.value.is_empty())
                .map(|slot| slot.value.clone())
                .collect(),
        })
        .collect();

    Structure { entries }
}
