//! File form of a decision structure, used by batch diagnosis.

use serde::{Deserialize, Serialize};

/// A goal with its criteria, as written in a YAML or JSON file.
///
/// ```yaml
/// goal: Adopt a new AI system
/// criteria:
///   - name: Cost
///     items: [Price, Fees]
///   - name: Risk
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StructureDocument {
    pub goal: String,
    #[serde(default)]
    pub criteria: Vec<CriterionDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CriterionDocument {
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
}
