//! Synthetic event generation for demo tables.
//!
//! Produces `raw_events`-shaped rows spread over a trailing window of days,
//! deterministically for a given seed.

pub mod generator;
pub mod options;

pub use generator::{EVENT_NAMES, RowGenerator};
pub use options::GenerateOptions;
