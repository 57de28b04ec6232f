//! Remote table access for demotron.
//!
//! The [`Warehouse`] trait is the seam between command handling and the
//! analytical warehouse; [`BigQueryWarehouse`] is the production adapter.

pub mod adapter;
pub mod bigquery;

pub use adapter::{AppendSummary, Warehouse};
pub use bigquery::BigQueryWarehouse;
