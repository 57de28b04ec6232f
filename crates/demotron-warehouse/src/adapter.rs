use async_trait::async_trait;

use demotron_core::{RenameRequest, Result, Session, SyntheticEventRow, TableRef};

/// Outcome of a successful append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendSummary {
    /// Fully qualified `project.dataset.table` name.
    pub table: String,
    pub rows: usize,
}

/// Trait implemented by warehouses that can receive demo data.
///
/// Each call is a single remote request; implementations do not retry.
#[async_trait]
pub trait Warehouse {
    /// Returns the engine identifier (e.g. `bigquery`).
    fn engine(&self) -> &'static str;

    /// Append rows to `table`, creating it with the default event schema when absent.
    async fn append_rows(
        &self,
        session: &Session,
        project_id: &str,
        table: &TableRef,
        rows: Vec<SyntheticEventRow>,
    ) -> Result<AppendSummary>;

    /// Rename a column of an existing table.
    async fn rename_column(&self, session: &Session, request: &RenameRequest) -> Result<()>;
}
