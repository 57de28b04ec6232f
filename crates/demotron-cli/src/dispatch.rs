use std::fmt;
use std::time::Instant;

use demotron_core::{AppendRequest, CredentialProvider, RenameRequest, Result};
use demotron_generate::{GenerateOptions, RowGenerator};
use demotron_warehouse::{AppendSummary, Warehouse};

/// A fully resolved command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Rename(RenameRequest),
    Append(AppendRequest),
}

impl Request {
    fn command(&self) -> &'static str {
        match self {
            Request::Rename(_) => "rename-column",
            Request::Append(_) => "append-rawdata",
        }
    }
}

/// What a successful command did, printed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Renamed {
        table: String,
        old_name: String,
        new_name: String,
    },
    Appended(AppendSummary),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Renamed {
                table,
                old_name,
                new_name,
            } => write!(f, "Renamed column '{old_name}' to '{new_name}' in {table}"),
            Outcome::Appended(summary) => {
                write!(f, "Appended {} rows to {}", summary.rows, summary.table)
            }
        }
    }
}

/// Runs one request against injected credentials and warehouse.
pub struct Dispatcher<'a, C, W> {
    credentials: &'a C,
    warehouse: &'a W,
    generate: GenerateOptions,
}

impl<'a, C, W> Dispatcher<'a, C, W>
where
    C: CredentialProvider,
    W: Warehouse,
{
    pub fn new(credentials: &'a C, warehouse: &'a W, generate: GenerateOptions) -> Self {
        Self {
            credentials,
            warehouse,
            generate,
        }
    }

    pub async fn dispatch(&self, request: Request) -> Result<Outcome> {
        let command = request.command();
        let timer = Instant::now();
        tracing::info!(
            event = "run_started",
            command,
            engine = self.warehouse.engine()
        );

        let result = match request {
            Request::Rename(request) => self.rename(request).await,
            Request::Append(request) => self.append(request).await,
        };

        let duration_ms = timer.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::info!(
                event = "run_finished",
                command,
                status = "success",
                duration_ms
            ),
            Err(err) => tracing::warn!(
                event = "run_finished",
                command,
                status = "failed",
                duration_ms,
                error = %err
            ),
        }
        result
    }

    async fn rename(&self, request: RenameRequest) -> Result<Outcome> {
        let session = self.credentials.session()?;
        self.warehouse.rename_column(&session, &request).await?;

        Ok(Outcome::Renamed {
            table: format!("{}.{}", request.project_id, request.table()),
            old_name: request.old_name,
            new_name: request.new_name,
        })
    }

    async fn append(&self, request: AppendRequest) -> Result<Outcome> {
        let session = self.credentials.session()?;

        let generator = RowGenerator::new(GenerateOptions {
            seed: request.seed.or(self.generate.seed),
            ..self.generate.clone()
        });
        let rows = generator.generate_rows(request.num_rows, request.end_date);

        let summary = self
            .warehouse
            .append_rows(&session, &request.project_id, &request.table, rows)
            .await?;
        Ok(Outcome::Appended(summary))
    }
}
