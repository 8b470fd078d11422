//! Core contracts for tagsmith.
//!
//! This crate defines the validated settings, the table/column model filled
//! by the dialect adapters, and the error type shared across the workspace.

pub mod error;
pub mod redaction;
pub mod schema;
pub mod settings;

pub use error::{Error, Result};
pub use redaction::redact_connection_string;
pub use schema::{Column, Table, nullable_from_text};
pub use settings::{
    ConnectionParams, Dialect, OutputFormat, Settings, SettingsInput, TagNaming, TagOptions,
};
