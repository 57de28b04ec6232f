mod args;
mod dispatch;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use demotron_core::{DemoDefaults, DemoError, EnvCredentialProvider, load_defaults};
use demotron_generate::GenerateOptions;
use demotron_warehouse::BigQueryWarehouse;
use thiserror::Error;

use args::{Cli, Command};
use dispatch::{Dispatcher, Request};
use logging::init_logging;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Demo(#[from] DemoError),
    #[error("logging error: {0}")]
    Logging(String),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("demotron version: {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let Some(command) = cli.command else {
        print_tool_info();
        return ExitCode::SUCCESS;
    };

    let result = match init_logging(cli.log_format, cli.verbose) {
        Ok(()) => run(command, cli.config.as_deref()).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: Option<&std::path::Path>) -> Result<(), CliError> {
    let defaults: DemoDefaults = load_defaults(config)?;
    let today = chrono::Local::now().date_naive();

    let request = match command {
        Command::RenameColumn(args) => Request::Rename(args.resolve(&defaults.rename)),
        Command::AppendRawdata(args) => Request::Append(args.resolve(&defaults.append, today)?),
    };

    let credentials = EnvCredentialProvider::new(&defaults.credentials_env);
    let warehouse = match defaults.bigquery_api_url.as_deref() {
        Some(url) => BigQueryWarehouse::new().with_api_url(url),
        None => BigQueryWarehouse::new(),
    };
    let dispatcher = Dispatcher::new(&credentials, &warehouse, GenerateOptions::default());

    let outcome = dispatcher.dispatch(request).await?;
    println!("{outcome}");
    Ok(())
}

fn print_tool_info() {
    println!("demotron: CLI to delight real people with live demos");
    println!("\nAvailable commands:");
    println!("  rename-column   Rename a column in a database table");
    println!("  append-rawdata  Append generated fake data to a new or existing table");
    println!("\nRun 'demotron COMMAND --help' for more information on a specific command.");
}
