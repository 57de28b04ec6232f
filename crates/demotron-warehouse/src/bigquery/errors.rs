use gcp_bigquery_client::error::BQError;
use gcp_bigquery_client::model::error_proto::ErrorProto;

use demotron_core::{RemoteError, RemoteErrorKind};

/// Remote call a failure came from; the same status means different things
/// for an insert and a schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Append,
    Rename,
}

const NOT_FOUND_MARKERS: &[&str] = &["not found", "does not exist", "was not found"];
const THROTTLE_MARKERS: &[&str] = &["rate limit", "ratelimitexceeded", "quota"];

/// Map a BigQuery client error to the remote error taxonomy, keeping its message.
pub(crate) fn remote_error(err: &BQError, op: Operation) -> RemoteError {
    match err {
        BQError::ResponseError { error } => RemoteError::new(
            classify_status(error.error.code, &error.error.message, op),
            error.error.message.clone(),
        ),
        BQError::RequestError(source) => {
            RemoteError::new(RemoteErrorKind::Transient, source.to_string())
        }
        BQError::AuthError(_) | BQError::YupAuthError(_) | BQError::NoToken => {
            RemoteError::new(RemoteErrorKind::PermissionDenied, err.to_string())
        }
        other => RemoteError::new(RemoteErrorKind::Unknown, other.to_string()),
    }
}

/// Map an error reported inside a finished job, which arrives with HTTP 200.
pub(crate) fn job_error(proto: &ErrorProto, op: Operation) -> RemoteError {
    let reason = proto.reason.as_deref().unwrap_or_default();
    let message = proto
        .message
        .clone()
        .unwrap_or_else(|| format!("job failed with reason '{reason}'"));
    let kind = classify_status(reason_status(reason), &format!("{reason} {message}"), op);
    RemoteError::new(kind, message)
}

/// HTTP status BigQuery documents for each job error reason.
fn reason_status(reason: &str) -> i64 {
    match reason {
        "notFound" => 404,
        "accessDenied" | "billingNotEnabled" | "rateLimitExceeded" | "quotaExceeded" => 403,
        "invalid" | "invalidQuery" | "resourcesExceeded" => 400,
        "duplicate" => 409,
        "timeout" => 408,
        "backendError" | "internalError" => 500,
        _ => 0,
    }
}

/// Classify an HTTP status and service message returned by BigQuery.
pub fn classify_status(code: i64, message: &str, op: Operation) -> RemoteErrorKind {
    let message = message.to_lowercase();
    let mentions = |markers: &[&str]| markers.iter().any(|marker| message.contains(marker));

    match code {
        404 => RemoteErrorKind::NotFound,
        400 if mentions(NOT_FOUND_MARKERS) => RemoteErrorKind::NotFound,
        403 if mentions(THROTTLE_MARKERS) => RemoteErrorKind::Transient,
        401 | 403 => RemoteErrorKind::PermissionDenied,
        408 | 429 | 500..=599 => RemoteErrorKind::Transient,
        400 if op == Operation::Append => RemoteErrorKind::SchemaMismatch,
        _ => RemoteErrorKind::Unknown,
    }
}
