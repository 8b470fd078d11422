use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tagsmith_core::{Column, Dialect, OutputFormat, Settings};

use crate::tagger::Tagger;

/// A catalog column with the tags generated for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaggedColumn {
    #[serde(flatten)]
    pub column: Column,
    /// One tag per selected tagger, in tagger order.
    pub tags: Vec<String>,
}

/// A table whose columns carry generated tags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaggedTable {
    pub name: String,
    pub columns: Vec<TaggedColumn>,
}

impl TaggedTable {
    pub fn column(&self, name: &str) -> Option<&TaggedColumn> {
        self.columns.iter().find(|tagged| tagged.column.name == name)
    }
}

/// Everything a renderer needs from one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutput {
    pub package_name: String,
    pub dialect: Dialect,
    pub schema: String,
    /// Naming of generated record and field identifiers.
    pub output_format: OutputFormat,
    /// Prepended to every generated record name.
    pub prefix: String,
    /// Appended to every generated record name.
    pub suffix: String,
    pub taggers: Vec<Tagger>,
    pub generated_at: DateTime<Utc>,
    pub tables: Vec<TaggedTable>,
}

impl GenerationOutput {
    pub fn new(settings: &Settings, schema: &str, tables: Vec<TaggedTable>) -> Self {
        Self {
            package_name: settings.package_name.clone(),
            dialect: settings.dialect,
            schema: schema.to_string(),
            output_format: settings.output_format,
            prefix: settings.prefix.clone(),
            suffix: settings.suffix.clone(),
            taggers: Tagger::selected(&settings.tags),
            generated_at: Utc::now(),
            tables,
        }
    }
}
