use thiserror::Error;

/// Core error type shared across tagsmith crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings failed validation; raised before any connection attempt.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// The database connection could not be opened or authenticated.
    #[error("cannot connect to {target}: {source}")]
    Connection {
        /// Redacted connection string.
        target: String,
        #[source]
        source: sqlx::Error,
    },
    /// A catalog query failed.
    #[error("{context} failed (schema {schema:?}{}): {source}", table_suffix(.table))]
    Query {
        context: &'static str,
        schema: String,
        table: Option<String>,
        #[source]
        source: sqlx::Error,
    },
    /// A query was issued before `connect`.
    #[error("database is not connected")]
    NotConnected,
    /// Columns were fetched before the column query was prepared.
    #[error("column query has not been prepared")]
    NotPrepared,
    /// The catalog returned data that violates model invariants.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

fn table_suffix(table: &Option<String>) -> String {
    match table {
        Some(table) => format!(", table {table:?}"),
        None => String::new(),
    }
}

impl Error {
    /// Build a query error for a schema-level catalog query.
    pub fn schema_query(context: &'static str, schema: &str, source: sqlx::Error) -> Self {
        Error::Query {
            context,
            schema: schema.to_string(),
            table: None,
            source,
        }
    }

    /// Build a query error scoped to one table.
    pub fn table_query(
        context: &'static str,
        schema: &str,
        table: &str,
        source: sqlx::Error,
    ) -> Self {
        Error::Query {
            context,
            schema: schema.to_string(),
            table: Some(table.to_string()),
            source,
        }
    }

    /// Table name attached to a query error, if any.
    pub fn table(&self) -> Option<&str> {
        match self {
            Error::Query { table, .. } => table.as_deref(),
            _ => None,
        }
    }
}

/// Convenience alias for results returned by tagsmith crates.
pub type Result<T> = std::result::Result<T, Error>;
