pub mod config;
pub mod diagnosis;
pub mod document;
pub mod form;
pub mod registry;
pub mod structure;

pub use config::{Config, GeneratorConfig, LogFormat, LoggingConfig, RotationPolicy};
pub use diagnosis::{
    AttemptKind, CriterionDiagnosis, DiagnosisAttempt, DiagnosisReport, DiagnosisResult, Tier,
    MISSING_SUB_ITEMS_TEXT,
};
pub use document::{CriterionDocument, StructureDocument};
pub use form::{render, CriterionView, FormView, Phase, SlotKey, SlotValues, SlotView};
pub use registry::{CriterionId, FieldRegistry};
pub use structure::{assemble, Structure, StructureEntry};
