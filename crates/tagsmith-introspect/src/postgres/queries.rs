use sqlx::postgres::PgStatement;
use sqlx::{Executor, PgPool, Statement};

use tagsmith_core::{Error, Result};

use crate::catalog::RawColumn;

const LIST_TABLES: &str = r#"
    SELECT table_name::text
    FROM information_schema.tables
    WHERE table_type = 'BASE TABLE'
      AND table_schema = $1
    ORDER BY table_name
"#;

const LIST_COLUMNS: &str = r#"
    SELECT
      ic.ordinal_position::int8 AS ordinal_position,
      ic.column_name::text AS column_name,
      ic.data_type::text AS data_type,
      ic.column_default::text AS column_default,
      ic.is_nullable::text AS is_nullable,
      ic.character_maximum_length::int8 AS character_maximum_length,
      ic.numeric_precision::int8 AS numeric_precision,
      itc.constraint_name::text AS constraint_name,
      itc.constraint_type::text AS constraint_type
    FROM information_schema.columns AS ic
      LEFT JOIN information_schema.key_column_usage AS ikcu
        ON ic.table_name = ikcu.table_name
        AND ic.table_schema = ikcu.table_schema
        AND ic.column_name = ikcu.column_name
      LEFT JOIN information_schema.table_constraints AS itc
        ON ic.table_name = itc.table_name
        AND ic.table_schema = itc.table_schema
        AND ikcu.constraint_name = itc.constraint_name
    WHERE ic.table_name = $1
      AND ic.table_schema = $2
    ORDER BY ic.ordinal_position, itc.constraint_name
"#;

pub async fn list_tables(pool: &PgPool, schema: &str) -> Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(LIST_TABLES)
        .bind(schema)
        .fetch_all(pool)
        .await
        .map_err(|err| Error::schema_query("listing tables", schema, err))
}

pub async fn prepare_columns(pool: &PgPool, schema: &str) -> Result<PgStatement<'static>> {
    pool.prepare(LIST_COLUMNS)
        .await
        .map_err(|err| Error::schema_query("preparing column query", schema, err))
}

pub async fn list_columns(
    pool: &PgPool,
    statement: &PgStatement<'static>,
    schema: &str,
    table: &str,
) -> Result<Vec<RawColumn>> {
    statement
        .query_as::<RawColumn>()
        .bind(table)
        .bind(schema)
        .fetch_all(pool)
        .await
        .map_err(|err| Error::table_query("fetching columns", schema, table, err))
}
