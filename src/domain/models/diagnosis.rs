//! Diagnosis results and the per-run report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity classification of a diagnosis reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Good,
    Caution,
    Danger,
}

impl Tier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Caution => "caution",
            Self::Danger => "danger",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Good => "✅",
            Self::Caution => "⚠️",
            Self::Danger => "🚨",
        }
    }
}

/// Text shown when a criterion has no sub-items to diagnose.
pub const MISSING_SUB_ITEMS_TEXT: &str = "No sub-items were entered.";

/// What came back from one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosisAttempt {
    /// Raw reply text from the collaborator, verbatim.
    Reply(String),
    /// The criterion had no sub-items; nothing was sent.
    Missing,
    /// The call failed; holds a displayable description of the failure.
    Failed(String),
}

impl DiagnosisAttempt {
    /// Text to display and classify.
    pub fn text(&self) -> String {
        match self {
            Self::Reply(text) => text.clone(),
            Self::Missing => MISSING_SUB_ITEMS_TEXT.to_string(),
            Self::Failed(detail) => format!("Communication error: {detail}"),
        }
    }

    pub const fn kind(&self) -> AttemptKind {
        match self {
            Self::Reply(_) => AttemptKind::Reply,
            Self::Missing => AttemptKind::Missing,
            Self::Failed(_) => AttemptKind::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptKind {
    Reply,
    Missing,
    Failed,
}

/// Classified text for one criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub tier: Tier,
    pub raw_text: String,
}

/// One card of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionDiagnosis {
    pub criterion: String,
    pub sub_items: Vec<String>,
    pub kind: AttemptKind,
    pub result: DiagnosisResult,
}

/// Everything produced by one "run diagnosis" action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisReport {
    pub goal: String,
    pub criterion_count: usize,
    pub sub_item_total: usize,
    pub diagnoses: Vec<CriterionDiagnosis>,
    pub generated_at: DateTime<Utc>,
}

impl DiagnosisReport {
    /// Number of cards in each tier, as `(good, caution, danger)`.
    pub fn tier_counts(&self) -> (usize, usize, usize) {
        self.diagnoses
            .iter()
            .fold((0, 0, 0), |(g, c, d), diag| match diag.result.tier {
                Tier::Good => (g + 1, c, d),
                Tier::Caution => (g, c + 1, d),
                Tier::Danger => (g, c, d + 1),
            })
    }
}
