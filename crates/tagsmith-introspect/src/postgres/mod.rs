use async_trait::async_trait;
use sqlx::Postgres;
use tracing::debug;

use tagsmith_core::{Column, Dialect, Result, Settings, Table};

use crate::catalog::map_columns;
use crate::database::{Database, Vocabulary};
use crate::general::{GeneralDatabase, connection_url, contains_marker, is_primary_key_type};

mod queries;

/// Default-value marker of serial columns.
pub const AUTO_INCREMENT_MARKER: &str = "nextval";

pub static VOCABULARY: Vocabulary = Vocabulary {
    string: &["character varying", "varchar", "character", "char"],
    text: &["text"],
    integer: &[
        "smallint",
        "integer",
        "bigint",
        "smallserial",
        "serial",
        "bigserial",
    ],
    float: &["numeric", "decimal", "real", "double precision"],
    temporal: &[
        "time",
        "timestamp",
        "time with time zone",
        "timestamp with time zone",
        "time without time zone",
        "timestamp without time zone",
        "date",
    ],
};

/// PostgreSQL dialect.
pub struct PostgresDatabase {
    base: GeneralDatabase<Postgres>,
}

impl PostgresDatabase {
    /// Create an unconnected database; call `connect` before querying.
    pub fn new(settings: Settings) -> Self {
        Self {
            base: GeneralDatabase::new(settings),
        }
    }
}

#[async_trait]
impl Database for PostgresDatabase {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn settings(&self) -> &Settings {
        self.base.settings()
    }

    fn connection_string(&self) -> String {
        connection_url(
            "postgres",
            &self.settings().connection,
            &[("sslmode", "disable")],
        )
    }

    async fn connect(&mut self) -> Result<()> {
        let conn = self.connection_string();
        self.base.connect(&conn).await
    }

    async fn list_tables(&self, schema: &str) -> Result<Vec<Table>> {
        let names = queries::list_tables(self.base.pool()?, schema)
            .await
            .inspect_err(|err| self.base.report(err))?;
        debug!(event = "tables_listed", schema = %schema, count = names.len());
        Ok(names.into_iter().map(Table::new).collect())
    }

    async fn prepare_column_query(&mut self) -> Result<()> {
        let schema = self.settings().schema().to_string();
        let statement = queries::prepare_columns(self.base.pool()?, &schema)
            .await
            .inspect_err(|err| self.base.report(err))?;
        self.base.set_column_statement(statement);
        Ok(())
    }

    async fn fetch_columns(&self, table: &mut Table, schema: &str) -> Result<()> {
        let statement = self.base.column_statement()?;
        let raw = queries::list_columns(self.base.pool()?, statement, schema, &table.name)
            .await
            .inspect_err(|err| self.base.report(err))?;
        table.attach_columns(map_columns(raw)?)
    }

    async fn close(&mut self) {
        self.base.close().await;
    }

    fn is_primary_key(&self, column: &Column) -> bool {
        is_primary_key_type(column.constraint_type.as_deref())
    }

    fn is_auto_increment(&self, column: &Column) -> bool {
        contains_marker(column.default_value.as_deref(), AUTO_INCREMENT_MARKER)
    }

    fn vocabulary(&self) -> &'static Vocabulary {
        &VOCABULARY
    }
}
