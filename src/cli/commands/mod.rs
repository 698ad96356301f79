pub mod config;
pub mod diagnose;
pub mod session;
