//! Database dialect adapters.
//!
//! Every dialect implements [`Database`]: connection lifecycle, catalog
//! listing, column fetching, and type classification over its own vocabulary.

pub mod catalog;
pub mod database;
pub mod general;
pub mod mysql;
pub mod postgres;

pub use database::{Database, TypeCategory, Vocabulary};
pub use general::GeneralDatabase;
pub use mysql::MysqlDatabase;
pub use postgres::PostgresDatabase;

use tagsmith_core::{Dialect, Settings};

/// Create the database for the configured dialect. Does not connect.
pub fn open_database(settings: &Settings) -> Box<dyn Database> {
    match settings.dialect {
        Dialect::Postgres => Box::new(PostgresDatabase::new(settings.clone())),
        Dialect::Mysql => Box::new(MysqlDatabase::new(settings.clone())),
    }
}
