use std::path::{Path, PathBuf};

use clap::Args;

use tagsmith_core::{SettingsInput, TagOptions};

use crate::CliError;

/// Connection, output, and tag flags. Every flag overrides the settings file.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// TOML settings file; flags override its values.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Print diagnostic context for failed catalog queries.
    #[arg(short, long)]
    pub verbose: bool,
    /// Type of database: pg or mysql.
    #[arg(short = 't', long, value_name = "TYPE")]
    pub db_type: Option<String>,
    /// User to connect with.
    #[arg(short, long)]
    pub user: Option<String>,
    /// Password of the user.
    #[arg(short, long)]
    pub password: Option<String>,
    /// Database name.
    #[arg(short = 'd', long)]
    pub db_name: Option<String>,
    /// Schema name (Postgres only).
    #[arg(short, long)]
    pub schema: Option<String>,
    /// Host of the database.
    #[arg(long)]
    pub host: Option<String>,
    /// Port of the database; defaults per database type.
    #[arg(long)]
    pub port: Option<u16>,
    /// Output directory, must exist.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
    /// Record naming: c (camelCase) or o (original).
    #[arg(long, value_name = "c|o")]
    pub format: Option<String>,
    /// Tag naming: c (as is) or o (snake_case).
    #[arg(long, value_name = "c|o")]
    pub tag_format: Option<String>,
    /// Package name of the generated records.
    #[arg(long)]
    pub package: Option<String>,
    /// Prefix for record names.
    #[arg(long)]
    pub prefix: Option<String>,
    /// Suffix for record names.
    #[arg(long)]
    pub suffix: Option<String>,
    /// Do not emit db tags.
    #[arg(long)]
    pub no_db_tags: bool,
    /// Emit Masterminds/structable stbl tags.
    #[arg(long)]
    pub structable: bool,
    /// Emit only stbl tags.
    #[arg(long, conflicts_with = "sql_only")]
    pub structable_only: bool,
    /// Emit experimental sql tags.
    #[arg(long)]
    pub sql: bool,
    /// Emit only sql tags.
    #[arg(long)]
    pub sql_only: bool,
}

impl SettingsArgs {
    /// Merge the settings file (if any) with the flags.
    pub fn into_input(self) -> Result<SettingsInput, CliError> {
        let base = match &self.config {
            Some(path) => load_settings_file(path)?,
            None => SettingsInput::default(),
        };
        Ok(self.apply(base))
    }

    fn apply(self, mut input: SettingsInput) -> SettingsInput {
        input.verbose |= self.verbose;
        override_with(&mut input.db_type, self.db_type);
        override_with(&mut input.user, self.user);
        override_with(&mut input.password, self.password);
        override_with(&mut input.db_name, self.db_name);
        override_with(&mut input.schema, self.schema);
        override_with(&mut input.host, self.host);
        if self.port.is_some() {
            input.port = self.port;
        }
        override_with(&mut input.output_path, self.output);
        override_with(&mut input.output_format, self.format);
        override_with(&mut input.output_format_tag, self.tag_format);
        override_with(&mut input.package_name, self.package);
        override_with(&mut input.prefix, self.prefix);
        override_with(&mut input.suffix, self.suffix);

        let tags = &mut input.tags;
        *tags = TagOptions {
            no_db: tags.no_db || self.no_db_tags,
            structable: tags.structable || self.structable,
            structable_only: tags.structable_only || self.structable_only,
            sql: tags.sql || self.sql,
            sql_only: tags.sql_only || self.sql_only,
        };
        input
    }
}

fn override_with<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn load_settings_file(path: &Path) -> Result<SettingsInput, CliError> {
    let contents = std::fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(CliError::from)
}
