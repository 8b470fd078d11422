use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Supported database dialects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    Postgres,
    Mysql,
}

impl Dialect {
    /// Dialect selectors accepted on the command line and in settings files.
    pub const SUPPORTED: &'static [&'static str] = &["pg", "mysql"];

    /// Selector string for this dialect.
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Postgres => "pg",
            Dialect::Mysql => "mysql",
        }
    }

    /// Port used when the settings leave it unset.
    pub fn default_port(self) -> u16 {
        match self {
            Dialect::Postgres => 5432,
            Dialect::Mysql => 3306,
        }
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "pg" | "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::Mysql),
            other => Err(Error::Configuration(format!(
                "type of database {other:?} not supported, expected one of {:?}",
                Dialect::SUPPORTED
            ))),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Naming of generated record and field identifiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `c`: camel-cased identifiers.
    CamelCase,
    /// `o`: identifiers kept as in the catalog.
    Original,
}

/// Naming of column names inside tags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TagNaming {
    /// `c`: the raw column name.
    AsIs,
    /// `o`: the snake_case form of the column name.
    SnakeCase,
}

fn parse_format_selector(kind: &str, value: &str) -> Result<bool> {
    match value {
        "c" => Ok(false),
        "o" => Ok(true),
        other => Err(Error::Configuration(format!(
            "{kind} {other:?} not supported, expected \"c\" or \"o\""
        ))),
    }
}

/// Which taggers run for every column.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TagOptions {
    /// Skip the plain `db` tag.
    pub no_db: bool,
    /// Add the structable `stbl` tag.
    pub structable: bool,
    /// Emit only the structable tag.
    pub structable_only: bool,
    /// Add the experimental `sql` tag.
    pub sql: bool,
    /// Emit only the sql tag.
    pub sql_only: bool,
}

/// Unvalidated settings as collected from flags or a settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsInput {
    pub verbose: bool,
    pub db_type: String,
    pub user: String,
    pub password: String,
    pub db_name: String,
    pub schema: String,
    pub host: String,
    pub port: Option<u16>,
    pub output_path: PathBuf,
    pub output_format: String,
    pub output_format_tag: String,
    pub package_name: String,
    pub prefix: String,
    pub suffix: String,
    pub tags: TagOptions,
}

impl Default for SettingsInput {
    fn default() -> Self {
        Self {
            verbose: false,
            db_type: "pg".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            db_name: "postgres".to_string(),
            schema: "public".to_string(),
            host: "127.0.0.1".to_string(),
            port: None,
            output_path: PathBuf::from("."),
            output_format: "c".to_string(),
            output_format_tag: "c".to_string(),
            package_name: "dto".to_string(),
            prefix: String::new(),
            suffix: String::new(),
            tags: TagOptions::default(),
        }
    }
}

/// Connection parameters after port defaulting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub database: String,
    pub schema: String,
}

/// Validated settings consumed read-only by the dialects and taggers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub dialect: Dialect,
    pub connection: ConnectionParams,
    pub output_dir: PathBuf,
    pub output_format: OutputFormat,
    pub tag_naming: TagNaming,
    pub tags: TagOptions,
    pub package_name: String,
    pub prefix: String,
    pub suffix: String,
    pub verbose: bool,
}

impl Settings {
    /// Validate raw settings.
    ///
    /// Checks run in order: dialect, output format, tag naming, output path,
    /// package name, tag selection. The port falls back to the dialect's
    /// default when unset.
    pub fn from_input(input: SettingsInput) -> Result<Self> {
        let dialect: Dialect = input.db_type.parse()?;

        let output_format = if parse_format_selector("output format", &input.output_format)? {
            OutputFormat::Original
        } else {
            OutputFormat::CamelCase
        };
        let tag_naming = if parse_format_selector("tag format", &input.output_format_tag)? {
            TagNaming::SnakeCase
        } else {
            TagNaming::AsIs
        };

        let output_dir = verify_output_path(&input.output_path)?;

        if input.package_name.trim().is_empty() {
            return Err(Error::Configuration(
                "name of package can not be empty".to_string(),
            ));
        }

        if input.tags.structable_only && input.tags.sql_only {
            return Err(Error::Configuration(
                "structable-only and sql-only tags can not be combined".to_string(),
            ));
        }

        Ok(Self {
            dialect,
            connection: ConnectionParams {
                host: input.host,
                port: input.port.unwrap_or_else(|| dialect.default_port()),
                user: input.user,
                password: input.password,
                database: input.db_name,
                schema: input.schema,
            },
            output_dir,
            output_format,
            tag_naming,
            tags: input.tags,
            package_name: input.package_name,
            prefix: input.prefix,
            suffix: input.suffix,
            verbose: input.verbose,
        })
    }

    /// Settings with the tool defaults for a dialect, writing to the current directory.
    pub fn for_dialect(dialect: Dialect) -> Self {
        let input = SettingsInput::default();
        Self {
            dialect,
            connection: ConnectionParams {
                host: input.host,
                port: dialect.default_port(),
                user: input.user,
                password: input.password,
                database: input.db_name,
                schema: input.schema,
            },
            output_dir: input.output_path,
            output_format: OutputFormat::CamelCase,
            tag_naming: TagNaming::AsIs,
            tags: TagOptions::default(),
            package_name: input.package_name,
            prefix: input.prefix,
            suffix: input.suffix,
            verbose: false,
        }
    }

    /// Schema whose tables are introspected.
    pub fn schema(&self) -> &str {
        &self.connection.schema
    }
}

fn verify_output_path(path: &Path) -> Result<PathBuf> {
    let metadata = std::fs::metadata(path).map_err(|_| {
        Error::Configuration(format!(
            "output file path {:?} does not exist",
            path.display().to_string()
        ))
    })?;

    if !metadata.is_dir() {
        return Err(Error::Configuration(format!(
            "output file path {:?} is not a directory",
            path.display().to_string()
        )));
    }

    std::path::absolute(path).map_err(|err| {
        Error::Configuration(format!(
            "output file path {:?} can not be resolved: {err}",
            path.display().to_string()
        ))
    })
}
