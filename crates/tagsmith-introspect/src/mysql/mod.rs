use async_trait::async_trait;
use sqlx::MySql;
use tracing::debug;

use tagsmith_core::{Column, Dialect, Result, Settings, Table};

use crate::catalog::map_columns;
use crate::database::{Database, Vocabulary};
use crate::general::{GeneralDatabase, connection_url, contains_marker, is_primary_key_type};

mod queries;

/// `EXTRA` marker of auto-increment columns.
pub const AUTO_INCREMENT_MARKER: &str = "auto_increment";

pub static VOCABULARY: Vocabulary = Vocabulary {
    string: &["char", "varchar", "binary", "varbinary"],
    text: &[
        "text",
        "tinytext",
        "mediumtext",
        "longtext",
        "blob",
        "tinyblob",
        "mediumblob",
        "longblob",
    ],
    integer: &["tinyint", "smallint", "mediumint", "int", "integer", "bigint"],
    float: &["numeric", "decimal", "float", "real", "double"],
    temporal: &["time", "timestamp", "date", "datetime", "year"],
};

/// MySQL/MariaDB dialect.
///
/// MySQL has no schemas below the database, so tables are listed from the
/// configured database name.
pub struct MysqlDatabase {
    base: GeneralDatabase<MySql>,
}

impl MysqlDatabase {
    /// Create an unconnected database; call `connect` before querying.
    pub fn new(settings: Settings) -> Self {
        Self {
            base: GeneralDatabase::new(settings),
        }
    }
}

#[async_trait]
impl Database for MysqlDatabase {
    fn dialect(&self) -> Dialect {
        Dialect::Mysql
    }

    fn settings(&self) -> &Settings {
        self.base.settings()
    }

    fn schema(&self) -> &str {
        &self.settings().connection.database
    }

    fn connection_string(&self) -> String {
        connection_url("mysql", &self.settings().connection, &[])
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
        let schema = self.schema().to_string();
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::TypeCategory;

    fn database() -> MysqlDatabase {
        let mut settings = Settings::for_dialect(Dialect::Mysql);
        settings.connection.user = "root".to_string();
        settings.connection.database = "shop".to_string();
        MysqlDatabase::new(settings)
    }

    #[test]
    fn builds_connection_string_and_uses_database_as_schema() {
        let db = database();
        assert_eq!(db.connection_string(), "mysql://root@127.0.0.1:3306/shop");
        assert_eq!(db.schema(), "shop");
    }

    #[test]
    fn vocabulary_partitions_fixture_types() {
        let db = database();
        let cases = [
            ("varchar", Some(TypeCategory::String)),
            ("longtext", Some(TypeCategory::Text)),
            ("int", Some(TypeCategory::Integer)),
            ("numeric", Some(TypeCategory::Float)),
            ("double", Some(TypeCategory::Float)),
            ("datetime", Some(TypeCategory::Temporal)),
            ("serial", None),
            ("double precision", None),
            ("character varying", None),
            ("json", None),
        ];

        for (data_type, expected) in cases {
            let column = Column::new(1, "c", data_type);
            assert_eq!(db.classify(&column), expected, "{data_type}");
            assert_eq!(db.is_integer(&column), expected == Some(TypeCategory::Integer));
            assert_eq!(db.is_float(&column), expected == Some(TypeCategory::Float));
        }
    }

    #[test]
    fn every_vocabulary_type_lands_in_exactly_one_category() {
        let db = database();
        for (category, types) in VOCABULARY.categories() {
            for data_type in types {
                let column = Column::new(1, "c", *data_type);
                assert_eq!(db.classify(&column), Some(category), "{data_type}");

                let hits: Vec<TypeCategory> = [
                    (TypeCategory::String, db.is_string(&column)),
                    (TypeCategory::Text, db.is_text(&column)),
                    (TypeCategory::Integer, db.is_integer(&column)),
                    (TypeCategory::Float, db.is_float(&column)),
                    (TypeCategory::Temporal, db.is_temporal(&column)),
                ]
                .into_iter()
                .filter_map(|(hit_category, hit)| hit.then_some(hit_category))
                .collect();
                assert_eq!(hits, vec![category], "{data_type}");
            }
        }
    }

    #[test]
    fn detects_auto_increment_marker() {
        let db = database();
        let auto = Column::new(1, "id", "int").with_default("auto_increment");
        let serial_default = Column::new(2, "n", "int").with_default("nextval('seq')");
        assert!(db.is_auto_increment(&auto));
        assert!(!db.is_auto_increment(&serial_default));
        assert!(!db.is_auto_increment(&Column::new(3, "m", "int")));
    }
}
