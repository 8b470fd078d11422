mod config;
mod logging;
mod output;

use std::path::PathBuf;

use clap::Parser;
use tagsmith_core::Error as CoreError;
use tagsmith_introspect::open_database;
use thiserror::Error;

use config::SettingsArgs;
use logging::init_logging;
use output::write_output;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings file error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "tagsmith",
    version,
    about = "Generate tagged record definitions from a database schema"
)]
struct Cli {
    #[command(flatten)]
    settings: SettingsArgs,
    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
    /// Append logs to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.settings.verbose, cli.json_logs, cli.log_file.as_deref())?;

    let result = run(cli.settings).await;
    if let Err(err) = &result {
        tracing::error!(event = "run_failed", error = %err);
    }
    result
}

async fn run(args: SettingsArgs) -> Result<(), CliError> {
    let input = args.into_input()?;

    let result = tagsmith_tagger::run(input, open_database).await?;
    let path = write_output(&result.settings, &result.output)?;

    tracing::info!(
        event = "output_written",
        path = %path.display(),
        tables = result.output.tables.len()
    );
    Ok(())
}
