use sqlx::mysql::MySqlStatement;
use sqlx::{Executor, MySqlPool, Statement};

use tagsmith_core::{Error, Result};

use crate::catalog::RawColumn;

// CAST to CHAR avoids collation and binary-string mismatches in information_schema.
const LIST_TABLES: &str = r#"
    SELECT CAST(TABLE_NAME AS CHAR(255)) AS table_name
    FROM information_schema.TABLES
    WHERE TABLE_TYPE = 'BASE TABLE'
      AND TABLE_SCHEMA = ?
    ORDER BY TABLE_NAME
"#;

// auto_increment lives in EXTRA, and such columns never carry a DEFAULT, so
// EXTRA takes the default slot for them.
const LIST_COLUMNS: &str = r#"
    SELECT
      CAST(c.ORDINAL_POSITION AS SIGNED) AS ordinal_position,
      CAST(c.COLUMN_NAME AS CHAR(255)) AS column_name,
      CAST(c.DATA_TYPE AS CHAR(255)) AS data_type,
      CAST(CASE
        WHEN c.EXTRA LIKE '%auto_increment%' THEN c.EXTRA
        ELSE c.COLUMN_DEFAULT
      END AS CHAR) AS column_default,
      CAST(c.IS_NULLABLE AS CHAR(3)) AS is_nullable,
      CAST(c.CHARACTER_MAXIMUM_LENGTH AS SIGNED) AS character_maximum_length,
      CAST(c.NUMERIC_PRECISION AS SIGNED) AS numeric_precision,
      CAST(tc.CONSTRAINT_NAME AS CHAR(255)) AS constraint_name,
      CAST(tc.CONSTRAINT_TYPE AS CHAR(255)) AS constraint_type
    FROM information_schema.COLUMNS AS c
      LEFT JOIN information_schema.KEY_COLUMN_USAGE AS kcu
        ON c.TABLE_NAME = kcu.TABLE_NAME
        AND c.TABLE_SCHEMA = kcu.TABLE_SCHEMA
        AND c.COLUMN_NAME = kcu.COLUMN_NAME
      LEFT JOIN information_schema.TABLE_CONSTRAINTS AS tc
        ON c.TABLE_NAME = tc.TABLE_NAME
        AND c.TABLE_SCHEMA = tc.TABLE_SCHEMA
        AND kcu.CONSTRAINT_NAME = tc.CONSTRAINT_NAME
    WHERE c.TABLE_NAME = ?
      AND c.TABLE_SCHEMA = ?
    ORDER BY c.ORDINAL_POSITION, tc.CONSTRAINT_NAME
"#;

pub async fn list_tables(pool: &MySqlPool, schema: &str) -> Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(LIST_TABLES)
        .bind(schema)
        .fetch_all(pool)
        .await
        .map_err(|err| Error::schema_query("listing tables", schema, err))
}

pub async fn prepare_columns(pool: &MySqlPool, schema: &str) -> Result<MySqlStatement<'static>> {
    pool.prepare(LIST_COLUMNS)
        .await
        .map_err(|err| Error::schema_query("preparing column query", schema, err))
}

pub async fn list_columns(
    pool: &MySqlPool,
    statement: &MySqlStatement<'static>,
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
