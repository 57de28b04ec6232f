use std::time::Duration;

use async_trait::async_trait;
use gcp_bigquery_client::Client;
use gcp_bigquery_client::client_builder::ClientBuilder;
use gcp_bigquery_client::yup_oauth2::parse_service_account_key;
use tracing::info;

use demotron_core::{DemoError, RenameRequest, Result, Session, SyntheticEventRow, TableRef};

use crate::adapter::{AppendSummary, Warehouse};

pub mod errors;
mod jobs;
pub mod sql;

use errors::{Operation, remote_error};
use jobs::{JobApi, run_statement};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Adapter for Google BigQuery.
///
/// Holds no connection state; a client is authenticated from the session on
/// every call.
#[derive(Debug, Clone)]
pub struct BigQueryWarehouse {
    api_url: Option<String>,
    poll_interval: Duration,
}

impl Default for BigQueryWarehouse {
    fn default() -> Self {
        Self {
            api_url: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl BigQueryWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send requests to another BigQuery v2 endpoint, such as an emulator.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    async fn client(&self, session: &Session, op: Operation) -> Result<Client> {
        let key = parse_service_account_key(session.key_json()).map_err(|_| {
            DemoError::Configuration("service account key was rejected by the client".to_string())
        })?;

        let mut builder = ClientBuilder::new();
        if let Some(url) = &self.api_url {
            builder.with_v2_base_url(url.clone());
        }
        builder
            .build_from_service_account_key(key, false)
            .await
            .map_err(|err| DemoError::Remote(remote_error(&err, op)))
    }

    async fn append_with(
        &self,
        api: &dyn JobApi,
        session: &Session,
        project_id: &str,
        table: &TableRef,
        rows: Vec<SyntheticEventRow>,
    ) -> Result<AppendSummary> {
        let summary = AppendSummary {
            table: format!("{project_id}.{table}"),
            rows: rows.len(),
        };
        let script = sql::append_script(project_id, table, &rows)?;

        info!(
            event = "append_started",
            table = %summary.table,
            rows = summary.rows,
            client_email = %session.client_email(),
            key_project = session.project_id().unwrap_or_default()
        );
        run_statement(
            api,
            project_id,
            script,
            Operation::Append,
            self.poll_interval,
        )
        .await?;
        info!(event = "append_finished", table = %summary.table, rows = summary.rows);

        Ok(summary)
    }

    async fn rename_with(
        &self,
        api: &dyn JobApi,
        session: &Session,
        request: &RenameRequest,
    ) -> Result<()> {
        let statement = sql::rename_statement(request)?;

        info!(
            event = "rename_started",
            project = %request.project_id,
            table = %request.table(),
            old = %request.old_name,
            new = %request.new_name,
            client_email = %session.client_email(),
            key_project = session.project_id().unwrap_or_default()
        );
        run_statement(
            api,
            &request.project_id,
            statement,
            Operation::Rename,
            self.poll_interval,
        )
        .await?;
        info!(event = "rename_finished", table = %request.table());

        Ok(())
    }
}

#[async_trait]
impl Warehouse for BigQueryWarehouse {
    fn engine(&self) -> &'static str {
        "bigquery"
    }

    async fn append_rows(
        &self,
        session: &Session,
        project_id: &str,
        table: &TableRef,
        rows: Vec<SyntheticEventRow>,
    ) -> Result<AppendSummary> {
        if rows.is_empty() {
            return Ok(AppendSummary {
                table: format!("{project_id}.{table}"),
                rows: 0,
            });
        }

        let client = self.client(session, Operation::Append).await?;
        self.append_with(&client, session, project_id, table, rows).await
    }

    async fn rename_column(&self, session: &Session, request: &RenameRequest) -> Result<()> {
        let client = self.client(session, Operation::Rename).await?;
        self.rename_with(&client, session, request).await
    }
}

#[cfg(test)]
mod tests;
