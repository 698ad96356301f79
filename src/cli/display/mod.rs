//! Display framework for CLI output formatting.
//!
//! Shared primitives for tier colors, the form table and the diagnosis
//! report cards.

pub mod colors;
pub mod form;
pub mod report;

pub use colors::{action_failure, action_success, colorize_tier, label, section_header, tier_label};
pub use form::{FormOutput, FormRow};
pub use report::{summary_line, ReportOutput};
