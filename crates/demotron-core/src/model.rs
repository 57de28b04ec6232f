use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{DemoError, Result};

/// A `dataset.table` reference inside a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub dataset: String,
    pub table: String,
}

impl TableRef {
    pub fn new(dataset: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            table: table.into(),
        }
    }

    /// Parse a `dataset.table` identifier.
    pub fn parse(value: &str) -> Result<Self> {
        let mut parts = value.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(dataset), Some(table), None) if !dataset.is_empty() && !table.is_empty() => {
                Ok(Self::new(dataset, table))
            }
            _ => Err(DemoError::InvalidArgument(format!(
                "table name '{value}' must have the form dataset.table"
            ))),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.dataset, self.table)
    }
}

/// Request to generate synthetic events and append them to a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendRequest {
    pub project_id: String,
    pub table: TableRef,
    pub num_rows: u32,
    pub end_date: NaiveDate,
    /// Fixed RNG seed; `None` draws a fresh one per run.
    pub seed: Option<u64>,
}

impl AppendRequest {
    pub fn new(
        project_id: impl Into<String>,
        table: TableRef,
        num_rows: u32,
        end_date: NaiveDate,
    ) -> Result<Self> {
        if num_rows < 1 {
            return Err(DemoError::InvalidArgument(
                "num_rows must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            project_id: project_id.into(),
            table,
            num_rows,
            end_date,
            seed: None,
        })
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// Request to rename one column of an existing table.
///
/// `old_name == new_name` is passed through; the warehouse decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
    pub old_name: String,
    pub new_name: String,
}

impl RenameRequest {
    pub fn table(&self) -> TableRef {
        TableRef::new(&self.dataset_id, &self.table_id)
    }
}

/// One generated demo event, shaped like a row of the `raw_events` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticEventRow {
    pub event_id: Uuid,
    pub event_name: String,
    pub event_timestamp: DateTime<Utc>,
    pub user_id: Uuid,
}
