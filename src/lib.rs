//! AHP logic-structure diagnoser
//!
//! Builds a three-level decision structure (goal → criteria → sub-items)
//! through a dynamic form and asks a text-generation model whether each
//! criterion's sub-items are mutually exclusive, collectively exhaustive and
//! logically coherent. Replies are graded GOOD / CAUTION / DANGER by keyword.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): form, registry, structure and report models;
//!   the [`TextGenerator`] port
//! - **Service Layer** (`services`): prompt, dispatcher, classifier, session
//! - **Infrastructure Layer** (`infrastructure`): Gemini client, configuration,
//!   logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use ahp_diagnoser::{build_text_generator, ConfigLoader, DiagnosisDispatcher, Session};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let setup = build_text_generator(&config.generator);
//!     let dispatcher = DiagnosisDispatcher::new(setup.generator);
//!
//!     let mut session = Session::new();
//!     session.set_goal("Adopt a new AI system");
//!     session.set_criterion(0, "Cost")?;
//!     session.set_sub_item(0, 0, "Price")?;
//!     let report = session.run_diagnosis(&dispatcher).await?;
//!     println!("{} criteria", report.criterion_count);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    assemble, render, Config, CriterionId, DiagnosisAttempt, DiagnosisReport, FieldRegistry,
    FormView, GeneratorConfig, LoggingConfig, Phase, SlotKey, SlotValues, Structure,
    StructureDocument, Tier,
};
pub use domain::ports::{GenerationError, TextGenerator, UnconfiguredGenerator};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::setup::{build_text_generator, GeneratorSetup};
pub use services::{classify, DiagnosisDispatcher, Session, SessionError};
