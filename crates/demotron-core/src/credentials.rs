use std::fmt;

use serde::Deserialize;

use crate::error::{DemoError, Result};

/// Source of the authenticated session used by warehouse calls.
pub trait CredentialProvider {
    fn session(&self) -> Result<Session>;
}

/// Fields of a service-account key that must be present for authentication.
#[derive(Debug, Clone, Deserialize)]
struct ServiceAccountInfo {
    #[serde(rename = "type")]
    key_type: Option<String>,
    project_id: Option<String>,
    private_key: String,
    client_email: String,
    token_uri: String,
}

/// Validated service-account credentials for one process invocation.
///
/// The raw key is only reachable through [`Session::key_json`]; `Debug`
/// never prints it.
#[derive(Clone)]
pub struct Session {
    key_json: String,
    client_email: String,
    project_id: Option<String>,
}

impl Session {
    /// Service-account JSON as handed to the warehouse client.
    pub fn key_json(&self) -> &str {
        &self.key_json
    }

    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// Project the key was issued in, if the key records it.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("client_email", &self.client_email)
            .field("project_id", &self.project_id)
            .field("key_json", &"***")
            .finish()
    }
}

/// Reads service-account JSON from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    var: String,
}

impl EnvCredentialProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn session(&self) -> Result<Session> {
        let raw = std::env::var(&self.var).ok();
        session_from_json(&self.var, raw.as_deref())
    }
}

/// Build a session from the contents of `var`, or fail when absent or malformed.
///
/// Error messages name the variable but never echo its content.
pub fn session_from_json(var: &str, raw: Option<&str>) -> Result<Session> {
    let raw = match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => {
            return Err(DemoError::Configuration(format!(
                "environment variable {var} is not set"
            )));
        }
    };

    let info: ServiceAccountInfo = serde_json::from_str(raw).map_err(|err| {
        DemoError::Configuration(format!(
            "{var} does not hold valid service account JSON (line {}, column {})",
            err.line(),
            err.column()
        ))
    })?;

    if let Some(key_type) = info.key_type.as_deref()
        && key_type != "service_account"
    {
        return Err(DemoError::Configuration(format!(
            "{var} holds '{key_type}' credentials, expected 'service_account'"
        )));
    }

    for (field, value) in [
        ("private_key", &info.private_key),
        ("client_email", &info.client_email),
        ("token_uri", &info.token_uri),
    ] {
        if value.trim().is_empty() {
            return Err(DemoError::Configuration(format!(
                "{var} has an empty '{field}' field"
            )));
        }
    }

    Ok(Session {
        key_json: raw.to_string(),
        client_email: info.client_email,
        project_id: info.project_id,
    })
}
