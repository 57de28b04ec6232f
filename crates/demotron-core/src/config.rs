use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DemoError, Result};

/// Environment variable holding the service-account JSON.
pub const DEFAULT_CREDENTIALS_ENV: &str = "GOOGLE_SQLMESH_CREDENTIALS";

/// Defaults applied to every option the user leaves unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoDefaults {
    pub credentials_env: String,
    /// BigQuery v2 REST endpoint; the public endpoint when unset.
    pub bigquery_api_url: Option<String>,
    pub rename: RenameDefaults,
    pub append: AppendDefaults,
}

impl Default for DemoDefaults {
    fn default() -> Self {
        Self {
            credentials_env: DEFAULT_CREDENTIALS_ENV.to_string(),
            bigquery_api_url: None,
            rename: RenameDefaults::default(),
            append: AppendDefaults::default(),
        }
    }
}

/// Defaults for `rename-column`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameDefaults {
    pub project_name: String,
    pub dataset_name: String,
    pub table_name: String,
    pub old: String,
    pub new: String,
}

impl Default for RenameDefaults {
    fn default() -> Self {
        Self {
            project_name: "sqlmesh-public-demo".to_string(),
            dataset_name: "tcloud_raw_data".to_string(),
            table_name: "raw_events".to_string(),
            old: "named_events".to_string(),
            new: "event_name".to_string(),
        }
    }
}

/// Defaults for `append-rawdata`. The end date always defaults to today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppendDefaults {
    pub table_name: String,
    pub num_rows: u32,
    pub project_id: String,
}

impl Default for AppendDefaults {
    fn default() -> Self {
        Self {
            table_name: "tcloud_raw_data.raw_events".to_string(),
            num_rows: 20,
            project_id: "sqlmesh-public-demo".to_string(),
        }
    }
}

/// Load defaults from a TOML file, or the built-in values when no path is given.
pub fn load_defaults(path: Option<&Path>) -> Result<DemoDefaults> {
    let Some(path) = path else {
        return Ok(DemoDefaults::default());
    };

    let content = std::fs::read_to_string(path).map_err(|err| {
        DemoError::Configuration(format!("cannot read {}: {err}", path.display()))
    })?;
    parse_defaults(&content)
        .map_err(|err| DemoError::Configuration(format!("{}: {err}", path.display())))
}

fn parse_defaults(content: &str) -> std::result::Result<DemoDefaults, toml::de::Error> {
    toml::from_str(content)
}
