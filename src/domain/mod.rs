//! Domain layer for the diagnoser
//!
//! Form state, the compacted structure, diagnosis results, and the port to the
//! external text generator. Nothing here performs I/O.

pub mod models;
pub mod ports;
