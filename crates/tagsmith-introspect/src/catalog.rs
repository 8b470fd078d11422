//! Catalog rows shared by the dialect column queries.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tagsmith_core::{Column, Error, Result, nullable_from_text};

/// One row of a dialect's column query, before constraint rows are merged.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RawColumn {
    pub ordinal_position: i64,
    pub column_name: String,
    pub data_type: String,
    pub column_default: Option<String>,
    pub is_nullable: String,
    pub character_maximum_length: Option<i64>,
    pub numeric_precision: Option<i64>,
    pub constraint_name: Option<String>,
    pub constraint_type: Option<String>,
}

impl RawColumn {
    fn into_column(self) -> Result<Column> {
        let ordinal_position = i32::try_from(self.ordinal_position).map_err(|_| {
            Error::InvalidSchema(format!(
                "column {} has out-of-range ordinal position {}",
                self.column_name, self.ordinal_position
            ))
        })?;
        Ok(Column {
            ordinal_position,
            name: self.column_name,
            data_type: self.data_type,
            default_value: self.column_default,
            is_nullable: nullable_from_text(&self.is_nullable),
            character_maximum_length: self.character_maximum_length,
            numeric_precision: self.numeric_precision,
            constraint_name: self.constraint_name,
            constraint_type: self.constraint_type,
        })
    }
}

/// Map catalog rows to columns in ascending ordinal order.
///
/// The constraint joins yield one row per (column, constraint). Rows sharing
/// an ordinal position collapse into one column whose constraint fields come
/// from the preferred row: a primary key first, then any constraint ordered by
/// name, then a row without constraint.
///
/// Fails with [`Error::InvalidSchema`] when an ordinal position does not fit
/// the column model.
pub fn map_columns(raw: Vec<RawColumn>) -> Result<Vec<Column>> {
    let mut by_position: BTreeMap<i32, Column> = BTreeMap::new();

    for row in raw {
        let candidate = row.into_column()?;
        match by_position.get_mut(&candidate.ordinal_position) {
            Some(current) => {
                if compare_constraints(&candidate, current) == Ordering::Less {
                    current.constraint_name = candidate.constraint_name;
                    current.constraint_type = candidate.constraint_type;
                }
            }
            None => {
                by_position.insert(candidate.ordinal_position, candidate);
            }
        }
    }

    Ok(by_position.into_values().collect())
}

fn constraint_rank(column: &Column) -> u8 {
    match column.constraint_type.as_deref() {
        Some(kind) if kind.contains("PRIMARY KEY") => 0,
        Some(_) => 1,
        None => 2,
    }
}

fn compare_constraints(left: &Column, right: &Column) -> Ordering {
    constraint_rank(left)
        .cmp(&constraint_rank(right))
        .then_with(|| left.constraint_name.cmp(&right.constraint_name))
}
