pub mod text_generator;
pub mod unconfigured;

pub use text_generator::{GenerationError, TextGenerator};
pub use unconfigured::UnconfiguredGenerator;
