//! Field registry: how many input slots exist, at top level and per criterion.
//!
//! Criterion slots are identified by a synthetic [`CriterionId`] handed out when
//! the slot is created. Sub-item counts are keyed by that id rather than by the
//! criterion's label text, so renaming or clearing a criterion never orphans
//! its sub-item slots and two criteria that share a label never share counts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Stable identity of a criterion slot, independent of its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriterionId(u64);

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Session-scoped record of slot counts.
///
/// Both the criterion slot count and every sub-item slot count only ever grow.
/// Every grow action bumps [`FieldRegistry::revision`], which callers use as
/// the "re-render now" signal.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    criteria: Vec<CriterionId>,
    sub_slot_counts: HashMap<CriterionId, usize>,
    next_id: u64,
    revision: u64,
}

impl FieldRegistry {
    /// Registry with a single empty criterion slot and no sub-item registries.
    pub fn new() -> Self {
        let mut registry = Self {
            criteria: Vec::new(),
            sub_slot_counts: HashMap::new(),
            next_id: 0,
            revision: 0,
        };
        registry.push_criterion();
        registry
    }

    fn push_criterion(&mut self) -> CriterionId {
        let id = CriterionId(self.next_id);
        self.next_id += 1;
        self.criteria.push(id);
        id
    }

    /// Number of rendered top-level criterion slots (always at least 1).
    pub fn criterion_slot_count(&self) -> usize {
        self.criteria.len()
    }

    /// Ids of all criterion slots, in slot order.
    pub fn criterion_ids(&self) -> &[CriterionId] {
        &self.criteria
    }

    /// Id of the criterion slot at `index`, if that slot exists.
    pub fn criterion_id(&self, index: usize) -> Option<CriterionId> {
        self.criteria.get(index).copied()
    }

    /// Guarantees that slot `index` exists and returns its id.
    ///
    /// No-op when the slot is already present. Missing slots up to and
    /// including `index` are created in order.
    pub fn ensure_criterion_slot(&mut self, index: usize) -> CriterionId {
        while self.criteria.len() <= index {
            self.push_criterion();
        }
        self.criteria[index]
    }

    /// Appends one criterion slot and requests a re-render.
    pub fn grow_criterion_slots(&mut self) -> CriterionId {
        let id = self.push_criterion();
        self.revision += 1;
        id
    }

    /// Creates the sub-item registry for `id` with one slot if it is absent.
    ///
    /// Returns the current sub-item slot count for `id`.
    pub fn ensure_sub_registry_for(&mut self, id: CriterionId) -> usize {
        *self.sub_slot_counts.entry(id).or_insert(1)
    }

    /// Appends one sub-item slot under `id` and requests a re-render.
    pub fn grow_sub_slots(&mut self, id: CriterionId) -> usize {
        let count = self.sub_slot_counts.entry(id).or_insert(1);
        *count += 1;
        self.revision += 1;
        *count
    }

    /// Sub-item slot count for `id`, or `None` before its registry exists.
    pub fn sub_slot_count(&self, id: CriterionId) -> Option<usize> {
        self.sub_slot_counts.get(&id).copied()
    }

    /// Monotonic counter bumped by every grow action.
    pub const fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}
