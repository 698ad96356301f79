//! Configuration management
//!
//! Hierarchical configuration loading using figment.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, API_KEY_FALLBACK_VARS};
