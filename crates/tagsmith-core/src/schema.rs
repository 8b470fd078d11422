use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A base table in the configured schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    /// Columns in catalog ordinal order.
    pub columns: Vec<Column>,
}

impl Table {
    /// Create a table with no columns attached yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Attach columns fetched from the catalog.
    ///
    /// Ordinal positions must be strictly increasing; otherwise the table is
    /// left untouched and an `InvalidSchema` error is returned.
    pub fn attach_columns(&mut self, columns: Vec<Column>) -> Result<()> {
        if let Some(pair) = columns
            .windows(2)
            .find(|pair| pair[0].ordinal_position >= pair[1].ordinal_position)
        {
            return Err(Error::InvalidSchema(format!(
                "columns of {} out of ordinal order: {} ({}) before {} ({})",
                self.name,
                pair[0].name,
                pair[0].ordinal_position,
                pair[1].name,
                pair[1].ordinal_position
            )));
        }

        self.columns = columns;
        Ok(())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }
}

/// One catalog column row.
///
/// Every field the catalog may report as NULL is an `Option`, so an absent
/// default is never confused with an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    pub ordinal_position: i32,
    pub name: String,
    /// Raw catalog type name in the dialect's vocabulary.
    pub data_type: String,
    pub default_value: Option<String>,
    pub is_nullable: bool,
    pub character_maximum_length: Option<i64>,
    pub numeric_precision: Option<i64>,
    pub constraint_name: Option<String>,
    pub constraint_type: Option<String>,
}

impl Column {
    /// Create a non-nullable column without optional metadata.
    pub fn new(ordinal_position: i32, name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            ordinal_position,
            name: name.into(),
            data_type: data_type.into(),
            ..Self::default()
        }
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn nullable(mut self, is_nullable: bool) -> Self {
        self.is_nullable = is_nullable;
        self
    }

    pub fn with_max_length(mut self, length: i64) -> Self {
        self.character_maximum_length = Some(length);
        self
    }

    pub fn with_precision(mut self, precision: i64) -> Self {
        self.numeric_precision = Some(precision);
        self
    }

    pub fn with_constraint(
        mut self,
        constraint_name: impl Into<String>,
        constraint_type: impl Into<String>,
    ) -> Self {
        self.constraint_name = Some(constraint_name.into());
        self.constraint_type = Some(constraint_type.into());
        self
    }
}

/// Convert the catalog's `YES`/`NO` nullability text to a boolean.
pub fn nullable_from_text(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("YES")
}
