//! Shared plumbing for the crestline utility crates.
//!
//! Keeps the pieces every other crate needs but none owns: JSON file
//! persistence with atomic writes, and tracing subscriber setup.

pub mod json_store;
pub mod logging;

pub use json_store::{read_json, read_json_or_default, write_json, write_json_atomic, StoreError};
pub use logging::{init_tracing, init_tracing_with};
