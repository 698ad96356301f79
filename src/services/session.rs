//! Interactive session: form state plus the diagnosis action.
//!
//! A session owns one [`FieldRegistry`] and one [`SlotValues`] store. Every
//! query re-renders from those two, so the structure handed to diagnosis is
//! always computed fresh from what is currently typed.

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::models::{
    assemble, render, CriterionId, DiagnosisReport, FieldRegistry, FormView, Phase, SlotKey, SlotValues,
    Structure, StructureDocument,
};
use crate::services::dispatcher::DiagnosisDispatcher;

/// Rejected session actions.
///
/// Variants hold 0-indexed positions; messages show them 1-based.
/// These mirror inputs that would not be on screen: a slot that was never
/// rendered, or a run before there is anything to diagnose.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("criterion {n} does not exist (there are {count} criterion slots)", n = .0 + 1, count = .1)]
    UnknownCriterion(usize, usize),

    #[error("criterion {n} is empty; enter it before adding sub-items", n = .0 + 1)]
    EmptyCriterion(usize),

    #[error("sub-item {m} of criterion {n} does not exist (there are {count} sub-item slots)", n = .0 + 1, m = .1 + 1, count = .2)]
    UnknownSubItem(usize, usize, usize),

    #[error("enter a goal first")]
    GoalMissing,

    #[error("enter at least one criterion first")]
    NoCriteria,
}

/// One user's form-building session.
#[derive(Debug, Default)]
pub struct Session {
    registry: FieldRegistry,
    values: SlotValues,
    last_report: Option<DiagnosisReport>,
    diagnosing: bool,
    rendered_revision: Option<u64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a session by replaying the edits a user would make for `doc`.
    ///
    /// Items listed under an empty criterion name are ignored, just as the
    /// form never shows sub-item slots for an empty criterion.
    pub fn from_document(doc: &StructureDocument) -> Self {
        let mut session = Self::new();
        session.set_goal(doc.goal.clone());

        for (i, criterion) in doc.criteria.iter().enumerate() {
            if i > 0 {
                session.add_criterion_slot();
            }
            session.values.set(SlotKey::Criterion(i), criterion.name.clone());
            if criterion.name.is_empty() {
                continue;
            }

            for (j, item) in criterion.items.iter().enumerate() {
                if j > 0 && session.add_sub_item_slot(i).is_err() {
                    break;
                }
                if session.set_sub_item(i, j, item.clone()).is_err() {
                    break;
                }
            }
        }

        session
    }

    pub const fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub const fn values(&self) -> &SlotValues {
        &self.values
    }

    /// Report of the most recent run, cleared by any later edit.
    pub const fn last_report(&self) -> Option<&DiagnosisReport> {
        self.last_report.as_ref()
    }

    /// Run one render pass.
    pub fn render(&mut self) -> FormView {
        let view = render(&mut self.registry, &self.values);
        self.rendered_revision = Some(view.revision);
        view
    }

    /// Whether a grow action happened since the last render pass.
    pub fn needs_render(&self) -> bool {
        self.rendered_revision != Some(self.registry.revision())
    }

    /// Current position in the goal → criteria → sub-items → results flow.
    pub fn phase(&mut self) -> Phase {
        if self.diagnosing {
            Phase::Diagnosing
        } else if self.last_report.is_some() {
            Phase::DisplayingResults
        } else {
            self.render().phase
        }
    }

    /// The compacted structure of what is currently typed.
    pub fn structure(&mut self) -> Structure {
        assemble(&self.render())
    }

    pub fn goal(&self) -> &str {
        self.values.get(SlotKey::Goal)
    }

    pub fn set_goal(&mut self, value: impl Into<String>) {
        self.edit(SlotKey::Goal, value.into());
    }

    /// Set criterion `index` (0-indexed).
    pub fn set_criterion(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.check_criterion(index)?;
        self.edit(SlotKey::Criterion(index), value.into());
        Ok(())
    }

    /// Set sub-item `sub_index` of criterion `index` (both 0-indexed).
    pub fn set_sub_item(
        &mut self,
        index: usize,
        sub_index: usize,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        let id = self.filled_criterion_id(index)?;
        let count = self.registry.ensure_sub_registry_for(id);
        if sub_index >= count {
            return Err(SessionError::UnknownSubItem(index, sub_index, count));
        }
        self.edit(SlotKey::SubItem(id, sub_index), value.into());
        Ok(())
    }

    /// "Add a criterion" action.
    pub fn add_criterion_slot(&mut self) -> usize {
        let id = self.registry.grow_criterion_slots();
        self.last_report = None;
        debug!(criterion = %id, slots = self.registry.criterion_slot_count(), "criterion slot added");
        self.registry.criterion_slot_count()
    }

    /// "Add a sub-item" action for criterion `index` (0-indexed).
    pub fn add_sub_item_slot(&mut self, index: usize) -> Result<usize, SessionError> {
        let id = self.filled_criterion_id(index)?;
        self.registry.ensure_sub_registry_for(id);
        let count = self.registry.grow_sub_slots(id);
        self.last_report = None;
        debug!(criterion = %id, slots = count, "sub-item slot added");
        Ok(count)
    }

    /// "Run diagnosis" action.
    ///
    /// Recomputes the structure from the current inputs and dispatches every
    /// criterion in order. Re-runnable any number of times.
    pub async fn run_diagnosis(
        &mut self,
        dispatcher: &DiagnosisDispatcher,
    ) -> Result<&DiagnosisReport, SessionError> {
        let view = self.render();
        if view.phase == Phase::CollectingGoal {
            return Err(SessionError::GoalMissing);
        }
        let structure = assemble(&view);
        if structure.is_empty() {
            return Err(SessionError::NoCriteria);
        }

        let goal = view.goal.value;
        self.last_report = None;
        info!(criteria = structure.len(), "diagnosis started");

        let report = {
            let _flag = DiagnosingFlag::raise(&mut self.diagnosing);
            dispatcher.diagnose_structure(&goal, &structure).await
        };

        Ok(&*self.last_report.insert(report))
    }

    fn edit(&mut self, key: SlotKey, value: String) {
        self.values.set(key, value);
        self.last_report = None;
    }

    fn check_criterion(&self, index: usize) -> Result<(), SessionError> {
        let count = self.registry.criterion_slot_count();
        if index >= count {
            return Err(SessionError::UnknownCriterion(index, count));
        }
        Ok(())
    }

    fn filled_criterion_id(&self, index: usize) -> Result<CriterionId, SessionError> {
        self.check_criterion(index)?;
        if self.values.get(SlotKey::Criterion(index)).is_empty() {
            return Err(SessionError::EmptyCriterion(index));
        }
        self.registry
            .criterion_id(index)
            .ok_or(SessionError::UnknownCriterion(
                index,
                self.registry.criterion_slot_count(),
            ))
    }
}

/// Raises the diagnosing flag and lowers it on drop, so a run cancelled
/// mid-flight does not leave it set.
struct DiagnosingFlag<'a>(&'a mut bool);

impl<'a> DiagnosingFlag<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for DiagnosingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
