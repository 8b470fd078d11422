use convert_case::{Boundary, Case, Converter};
use serde::{Deserialize, Serialize};

use tagsmith_core::{Column, Settings, TagNaming, TagOptions};
use tagsmith_introspect::Database;

/// Annotation schemes that can be generated for a column.
///
/// Each variant is a pure function of the database's classification, the
/// column, and the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tagger {
    /// Plain field-name tag, `db:"name"`.
    Db,
    /// Masterminds/structable tag with key markers, `stbl:"name,PRIMARY_KEY"`.
    Stbl,
    /// Experimental column type tag, `sql:"type:text;not null"`.
    Sql,
}

impl Tagger {
    /// Tag key emitted before the quoted value.
    pub fn key(self) -> &'static str {
        match self {
            Tagger::Db => "db",
            Tagger::Stbl => "stbl",
            Tagger::Sql => "sql",
        }
    }

    /// Taggers enabled by the tag options, always in db, stbl, sql order.
    pub fn selected(options: &TagOptions) -> Vec<Tagger> {
        if options.structable_only {
            return vec![Tagger::Stbl];
        }
        if options.sql_only {
            return vec![Tagger::Sql];
        }

        let mut taggers = Vec::new();
        if !options.no_db {
            taggers.push(Tagger::Db);
        }
        if options.structable {
            taggers.push(Tagger::Stbl);
        }
        if options.sql {
            taggers.push(Tagger::Sql);
        }
        taggers
    }

    pub fn generate_tag<D: Database + ?Sized>(
        self,
        db: &D,
        column: &Column,
        settings: &Settings,
    ) -> String {
        let value = match self {
            Tagger::Db => tag_name(column, settings),
            Tagger::Stbl => stbl_value(db, column, settings),
            Tagger::Sql => sql_value(db, column),
        };
        format!("{}:\"{value}\"", self.key())
    }
}

/// Column name as it appears inside tags.
pub fn tag_name(column: &Column, settings: &Settings) -> String {
    match settings.tag_naming {
        TagNaming::AsIs => column.name.clone(),
        TagNaming::SnakeCase => snake_case(&column.name),
    }
}

/// Snake case that keeps digits attached to the word before them, so
/// `address_line1` stays a valid column reference.
fn snake_case(name: &str) -> String {
    Converter::new()
        .to_case(Case::Snake)
        .remove_boundaries(&Boundary::digits())
        .convert(name)
}

fn stbl_value<D: Database + ?Sized>(db: &D, column: &Column, settings: &Settings) -> String {
    let mut value = tag_name(column, settings);
    if db.is_primary_key(column) {
        value.push_str(",PRIMARY_KEY");
    }
    if db.is_auto_increment(column) {
        value.push_str(",SERIAL,AUTO_INCREMENT");
    }
    value
}

// TODO: emit size:<n> and unique/index markers once the column query reports them.
fn sql_value<D: Database + ?Sized>(db: &D, column: &Column) -> String {
    let max_length = match column.character_maximum_length {
        Some(length) if db.is_string(column) => format!("({length})"),
        _ => String::new(),
    };

    let mut value = format!("type:{}{max_length};", column.data_type);
    if !db.is_nullable(column) {
        value.push_str("not null;");
    }

    match value.strip_suffix(';') {
        Some(stripped) => stripped.to_string(),
        None => value,
    }
}
