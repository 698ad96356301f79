//! Form model: slot identifiers, the value store, and the render pass.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::registry::{CriterionId, FieldRegistry};

/// Stable identifier of a single input slot.
///
/// Identity is positional, never derived from what the user typed, so values
/// survive every re-render triggered by growth elsewhere in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKey {
    /// The single goal field.
    Goal,
    /// Top-level criterion slot, 0-indexed.
    Criterion(usize),
    /// Sub-item slot `index` (0-indexed) under a criterion.
    SubItem(CriterionId, usize),
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Goal => write!(f, "goal"),
            Self::Criterion(index) => write!(f, "main_{index}"),
            Self::SubItem(id, index) => write!(f, "sub_{id}_{index}"),
        }
    }
}

/// User-editable storage behind every slot.
///
/// Unset slots read as the empty string.
#[derive(Debug, Clone, Default)]
pub struct SlotValues {
    values: HashMap<SlotKey, String>,
}

impl SlotValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: SlotKey) -> &str {
        self.values.get(&key).map_or("", String::as_str)
    }

    pub fn set(&mut self, key: SlotKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }
}

/// Where the user currently is in building the structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    CollectingGoal,
    CollectingCriteria,
    CollectingSubItems,
    Diagnosing,
    DisplayingResults,
}

impl Phase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CollectingGoal => "collecting_goal",
            Self::CollectingCriteria => "collecting_criteria",
            Self::CollectingSubItems => "collecting_sub_items",
            Self::Diagnosing => "diagnosing",
            Self::DisplayingResults => "displaying_results",
        }
    }
}

/// One rendered input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub key: SlotKey,
    pub label: String,
    pub value: String,
}

/// A rendered criterion slot together with its sub-item slots.
///
/// `sub_items` is empty while the criterion itself is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionView {
    pub id: CriterionId,
    pub slot: SlotView,
    pub sub_items: Vec<SlotView>,
}

impl CriterionView {
    pub fn is_filled(&self) -> bool {
        !self.slot.value.is_empty()
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub goal: SlotView,
    pub criteria: Vec<CriterionView>,
    pub phase: Phase,
    pub revision: u64,
}

impl FormView {
    /// Criteria whose label is non-empty, in slot order.
    pub fn filled_criteria(&self) -> impl Iterator<Item = &CriterionView> {
        self.criteria.iter().filter(|c| c.is_filled())
    }
}

/// Produces the current set of labeled slots and reads their values.
///
/// Nothing past the goal is rendered until the goal is non-empty. Every
/// criterion slot renders regardless of which of them are empty. Sub-item
/// slots render only under non-empty criteria; the first time a criterion is
/// seen non-empty its sub-item registry is created with one slot.
pub fn render(registry: &mut FieldRegistry, values: &SlotValues) -> FormView {
    let goal = SlotView {
        key: SlotKey::Goal,
        label: "Goal".to_string(),
        value: values.get(SlotKey::Goal).to_string(),
    };

    if goal.value.is_empty() {
        return FormView {
            goal,
            criteria: Vec::new(),
            phase: Phase::CollectingGoal,
            revision: registry.revision(),
        };
    }

    let ids = registry.criterion_ids().to_vec();
    let mut criteria = Vec::with_capacity(ids.len());

    for (index, id) in ids.into_iter().enumerate() {
        let key = SlotKey::Criterion(index);
        let slot = SlotView {
            key,
            label: format!("Criterion {}", index + 1),
            value: values.get(key).to_string(),
        };

        let sub_items = if slot.value.is_empty() {
            Vec::new()
        } else {
            let count = registry.ensure_sub_registry_for(id);
            (0..count)
                .map(|j| {
                    let key = SlotKey::SubItem(id, j);
                    SlotView {
                        key,
                        label: format!("{} / sub-item {}", slot.value, j + 1),
                        value: values.get(key).to_string(),
                    }
                })
                .collect()
        };

        criteria.push(CriterionView { id, slot, sub_items });
    }

    let phase = if criteria.iter().any(CriterionView::is_filled) {
        Phase::CollectingSubItems
    } else {
        Phase::CollectingCriteria
    };

    FormView {
        goal,
        criteria,
        phase,
        revision: registry.revision(),
    }
}
