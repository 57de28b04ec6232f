use std::time::Duration;

use async_trait::async_trait;
use gcp_bigquery_client::Client;
use gcp_bigquery_client::error::BQError;
use gcp_bigquery_client::model::job::Job;
use gcp_bigquery_client::model::query_request::QueryRequest;
use gcp_bigquery_client::model::query_response::QueryResponse;
use tracing::{debug, warn};

use demotron_core::{DemoError, RemoteError, RemoteErrorKind, Result};

use super::errors::{Operation, job_error, remote_error};

/// How long jobs.query waits server-side before answering with an unfinished job.
const QUERY_TIMEOUT_MS: i32 = 60_000;

const JOB_STATE_DONE: &str = "DONE";

/// The two jobs endpoints a statement needs: submit, then poll until done.
#[async_trait]
pub(crate) trait JobApi: Send + Sync {
    async fn query(
        &self,
        project_id: &str,
        request: QueryRequest,
    ) -> std::result::Result<QueryResponse, BQError>;

    async fn get_job(
        &self,
        project_id: &str,
        job_id: &str,
        location: Option<&str>,
    ) -> std::result::Result<Job, BQError>;
}

#[async_trait]
impl JobApi for Client {
    async fn query(
        &self,
        project_id: &str,
        request: QueryRequest,
    ) -> std::result::Result<QueryResponse, BQError> {
        self.job().query(project_id, request).await
    }

    async fn get_job(
        &self,
        project_id: &str,
        job_id: &str,
        location: Option<&str>,
    ) -> std::result::Result<Job, BQError> {
        self.job().get_job(project_id, job_id, location).await
    }
}

/// Run one statement and wait for its job to finish.
///
/// Success is only reported once the job is done without an error result.
pub(crate) async fn run_statement(
    api: &dyn JobApi,
    project_id: &str,
    sql: String,
    op: Operation,
    poll_interval: Duration,
) -> Result<()> {
    let mut request = QueryRequest::new(sql);
    request.timeout_ms = Some(QUERY_TIMEOUT_MS);

    let response = api
        .query(project_id, request)
        .await
        .map_err(|err| failed(remote_error(&err, op), op))?;

    if let Some(error) = response.errors.as_ref().and_then(|errors| errors.first()) {
        return Err(failed(job_error(error, op), op));
    }
    if response.job_complete == Some(true) {
        return Ok(());
    }

    let reference = response.job_reference.unwrap_or_default();
    let Some(job_id) = reference.job_id else {
        return Err(failed(
            RemoteError::new(
                RemoteErrorKind::Unknown,
                "query did not complete and returned no job reference",
            ),
            op,
        ));
    };
    let job_project = reference.project_id.as_deref().unwrap_or(project_id);
    let location = reference.location.as_deref();

    loop {
        debug!(event = "job_pending", job_id = %job_id, operation = ?op);
        tokio::time::sleep(poll_interval).await;

        let job = api
            .get_job(job_project, &job_id, location)
            .await
            .map_err(|err| failed(remote_error(&err, op), op))?;
        let Some(status) = job.status else {
            continue;
        };
        if status.state.as_deref() != Some(JOB_STATE_DONE) {
            continue;
        }

        let error = status
            .error_result
            .or_else(|| status.errors.and_then(|errors| errors.into_iter().next()));
        return match error {
            Some(error) => Err(failed(job_error(&error, op), op)),
            None => Ok(()),
        };
    }
}

fn failed(remote: RemoteError, op: Operation) -> DemoError {
    warn!(
        event = "remote_call_failed",
        operation = ?op,
        kind = %remote.kind,
        error = %remote.message
    );
    DemoError::Remote(remote)
}
