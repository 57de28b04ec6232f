use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use demotron_core::{
    AppendDefaults, AppendRequest, RenameDefaults, RenameRequest, Result, TableRef,
};

use crate::logging::LogFormat;

#[derive(Parser, Debug)]
#[command(
    name = "demotron",
    about = "CLI to delight real people with live demos",
    disable_version_flag = true
)]
pub struct Cli {
    /// Show the version and exit.
    #[arg(long)]
    pub version: bool,
    /// TOML file overriding the built-in defaults.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Log progress at info level.
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rename a column in a BigQuery table to create an error OR fix for a raw table.
    RenameColumn(RenameArgs),
    /// Append raw data to a BigQuery table intended to impact the incremental_events.sql model.
    AppendRawdata(AppendArgs),
}

#[derive(Args, Debug, Default)]
pub struct RenameArgs {
    /// The Google Cloud project name [default: sqlmesh-public-demo].
    #[arg(long)]
    pub project_name: Option<String>,
    /// The BigQuery dataset name [default: tcloud_raw_data].
    #[arg(long)]
    pub dataset_name: Option<String>,
    /// The BigQuery table name [default: raw_events].
    #[arg(long)]
    pub table_name: Option<String>,
    /// The name of the column to be renamed [default: named_events].
    #[arg(long)]
    pub old: Option<String>,
    /// The new name for the column [default: event_name].
    #[arg(long)]
    pub new: Option<String>,
}

impl RenameArgs {
    pub fn resolve(self, defaults: &RenameDefaults) -> RenameRequest {
        RenameRequest {
            project_id: self
                .project_name
                .unwrap_or_else(|| defaults.project_name.clone()),
            dataset_id: self
                .dataset_name
                .unwrap_or_else(|| defaults.dataset_name.clone()),
            table_id: self
                .table_name
                .unwrap_or_else(|| defaults.table_name.clone()),
            old_name: self.old.unwrap_or_else(|| defaults.old.clone()),
            new_name: self.new.unwrap_or_else(|| defaults.new.clone()),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct AppendArgs {
    /// The fully qualified BigQuery table name, dataset.table
    /// [default: tcloud_raw_data.raw_events].
    #[arg(long)]
    pub table_name: Option<String>,
    /// The number of rows to append [default: 20].
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub num_rows: Option<u32>,
    /// End date in YYYY-MM-DD format. Defaults to today's date.
    #[arg(long, value_parser = parse_date)]
    pub end_date: Option<NaiveDate>,
    /// The Google Cloud project ID [default: sqlmesh-public-demo].
    #[arg(long)]
    pub project_id: Option<String>,
    /// Seed for reproducible rows.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl AppendArgs {
    pub fn resolve(self, defaults: &AppendDefaults, today: NaiveDate) -> Result<AppendRequest> {
        let table_name = self
            .table_name
            .unwrap_or_else(|| defaults.table_name.clone());
        let table = TableRef::parse(&table_name)?;
        let request = AppendRequest::new(
            self.project_id
                .unwrap_or_else(|| defaults.project_id.clone()),
            table,
            self.num_rows.unwrap_or(defaults.num_rows),
            self.end_date.unwrap_or(today),
        )?;
        Ok(request.with_seed(self.seed))
    }
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("'{value}' is not a date in YYYY-MM-DD format"))
}
