use async_trait::async_trait;

use tagsmith_core::{Column, Dialect, Result, Settings, Table};

use crate::general::is_string_in_list;

/// Coarse category of a raw catalog type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    String,
    Text,
    Integer,
    Float,
    Temporal,
}

/// A dialect's fixed type vocabulary, one list per category.
///
/// Lists belong to a single dialect and must not overlap.
#[derive(Debug)]
pub struct Vocabulary {
    pub string: &'static [&'static str],
    pub text: &'static [&'static str],
    pub integer: &'static [&'static str],
    pub float: &'static [&'static str],
    pub temporal: &'static [&'static str],
}

impl Vocabulary {
    /// Every category paired with its type list.
    pub fn categories(&self) -> [(TypeCategory, &'static [&'static str]); 5] {
        [
            (TypeCategory::String, self.string),
            (TypeCategory::Text, self.text),
            (TypeCategory::Integer, self.integer),
            (TypeCategory::Float, self.float),
            (TypeCategory::Temporal, self.temporal),
        ]
    }
}

/// Capabilities implemented by every supported dialect.
///
/// Catalog I/O is async and must be driven one call at a time; the
/// classification predicates are pure.
#[async_trait]
pub trait Database: Send + Sync {
    /// Dialect implemented by this database.
    fn dialect(&self) -> Dialect;

    /// Settings the database was opened with.
    fn settings(&self) -> &Settings;

    /// Catalog schema whose tables are listed.
    fn schema(&self) -> &str {
        self.settings().schema()
    }

    /// Connection string built from the settings. Performs no I/O.
    fn connection_string(&self) -> String;

    /// Open the connection and keep it for subsequent calls.
    async fn connect(&mut self) -> Result<()>;

    /// List the base tables of `schema`, ordered by name, without columns.
    async fn list_tables(&self, schema: &str) -> Result<Vec<Table>>;

    /// Compile the column query once for the whole run.
    async fn prepare_column_query(&mut self) -> Result<()>;

    /// Populate `table.columns` in ordinal order.
    ///
    /// On failure the table's columns are left untouched.
    async fn fetch_columns(&self, table: &mut Table, schema: &str) -> Result<()>;

    /// Release the connection.
    async fn close(&mut self) {}

    fn is_primary_key(&self, column: &Column) -> bool;

    /// True iff the default value carries the dialect's auto-increment marker.
    fn is_auto_increment(&self, column: &Column) -> bool;

    fn is_nullable(&self, column: &Column) -> bool {
        column.is_nullable
    }

    /// Type vocabulary of this dialect.
    fn vocabulary(&self) -> &'static Vocabulary;

    fn string_types(&self) -> &'static [&'static str] {
        self.vocabulary().string
    }

    fn text_types(&self) -> &'static [&'static str] {
        self.vocabulary().text
    }

    fn integer_types(&self) -> &'static [&'static str] {
        self.vocabulary().integer
    }

    fn float_types(&self) -> &'static [&'static str] {
        self.vocabulary().float
    }

    fn temporal_types(&self) -> &'static [&'static str] {
        self.vocabulary().temporal
    }

    fn is_string(&self, column: &Column) -> bool {
        is_string_in_list(&column.data_type, self.string_types())
    }

    fn is_text(&self, column: &Column) -> bool {
        is_string_in_list(&column.data_type, self.text_types())
    }

    fn is_integer(&self, column: &Column) -> bool {
        is_string_in_list(&column.data_type, self.integer_types())
    }

    fn is_float(&self, column: &Column) -> bool {
        is_string_in_list(&column.data_type, self.float_types())
    }

    fn is_temporal(&self, column: &Column) -> bool {
        is_string_in_list(&column.data_type, self.temporal_types())
    }

    /// Category of the column's raw type, `None` when unclassified.
    fn classify(&self, column: &Column) -> Option<TypeCategory> {
        self.vocabulary()
            .categories()
            .into_iter()
            .find(|(_, list)| is_string_in_list(&column.data_type, list))
            .map(|(category, _)| category)
    }
}
