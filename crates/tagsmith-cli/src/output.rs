use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use serde::Serialize;

use tagsmith_core::Settings;
use tagsmith_tagger::GenerationOutput;

use crate::CliError;

/// Path of the tagged-table document for a run.
pub fn output_path(settings: &Settings) -> PathBuf {
    settings
        .output_dir
        .join(format!("{}.tags.json", settings.package_name))
}

/// Write the tagged tables for the renderer.
pub fn write_output(settings: &Settings, output: &GenerationOutput) -> Result<PathBuf, CliError> {
    let path = output_path(settings);
    write_json(&path, output)?;
    Ok(path)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(CliError::from)
}
