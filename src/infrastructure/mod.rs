//! Infrastructure layer module
//!
//! External integrations behind the domain ports:
//! - Gemini API client
//! - Configuration management
//! - Logging infrastructure
//! - Startup wiring of the text generator

pub mod config;
pub mod gemini;
pub mod logging;
pub mod setup;
