use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

use crate::CliError;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the verbosity flag. Logs go to stderr unless a log
/// file is given, in which case they are appended to it.
pub fn init_logging(verbose: bool, json: bool, log_file: Option<&Path>) -> Result<(), CliError> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let layer = tracing_subscriber::fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(log_writer(log_file)?);

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry.with(layer.json()).try_init()
    } else {
        registry.with(layer).try_init()
    };

    result.map_err(|err| CliError::Logging(err.to_string()))
}

fn log_writer(log_file: Option<&Path>) -> Result<BoxMakeWriter, CliError> {
    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::stderr),
    };
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn log_file_is_appended_to() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tagsmith.log");
        std::fs::write(&path, "earlier run\n").expect("seed log");

        let make_writer = log_writer(Some(&path)).expect("log writer");
        make_writer
            .make_writer()
            .write_all(b"first\n")
            .expect("write first");
        make_writer
            .make_writer()
            .write_all(b"second\n")
            .expect("write second");

        let contents = std::fs::read_to_string(&path).expect("read log");
        assert_eq!(contents, "earlier run\nfirst\nsecond\n");
    }

    #[test]
    fn unwritable_log_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing").join("tagsmith.log");
        assert!(matches!(log_writer(Some(&missing)), Err(CliError::Io(_))));
    }
}
