use anyhow::{Context, Result, anyhow};
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use std::env;
use tagsmith_core::{Dialect, Settings};
use tagsmith_introspect::{Database, MysqlDatabase, TypeCategory};
use url::Url;

const TABLE_PREFIX: &str = "tagsmith_it_";

const FIXTURE: &str = r#"
DROP VIEW IF EXISTS tagsmith_it_user_emails;
DROP TABLE IF EXISTS tagsmith_it_orders;
DROP TABLE IF EXISTS tagsmith_it_users;
CREATE TABLE tagsmith_it_users (
  id int NOT NULL AUTO_INCREMENT PRIMARY KEY,
  email varchar(120) NOT NULL UNIQUE,
  bio text,
  created_at datetime NOT NULL DEFAULT CURRENT_TIMESTAMP
) ENGINE = InnoDB;
CREATE TABLE tagsmith_it_orders (
  id bigint NOT NULL PRIMARY KEY,
  user_id int NOT NULL,
  total decimal(10, 2),
  CONSTRAINT tagsmith_it_orders_user_fk FOREIGN KEY (user_id) REFERENCES tagsmith_it_users (id)
) ENGINE = InnoDB;
CREATE VIEW tagsmith_it_user_emails AS SELECT email FROM tagsmith_it_users
"#;

/// Connection URL for the live MySQL test database, `None` when not configured.
fn database_url() -> Option<String> {
    env::var("TEST_MYSQL_URL").ok()
}

fn settings_from_url(raw: &str) -> Result<Settings> {
    let url = Url::parse(raw).context("parsing mysql url")?;
    let mut settings = Settings::for_dialect(Dialect::Mysql);
    settings.connection.host = url
        .host_str()
        .ok_or_else(|| anyhow!("mysql url has no host"))?
        .to_string();
    settings.connection.port = url.port().unwrap_or(3306);
    settings.connection.user = url.username().to_string();
    settings.connection.password = url.password().unwrap_or_default().to_string();
    settings.connection.database = url.path().trim_start_matches('/').to_string();
    if settings.connection.database.is_empty() {
        return Err(anyhow!("mysql url must name a database"));
    }
    Ok(settings)
}

async fn reset_fixture(pool: &MySqlPool) -> Result<()> {
    for statement in FIXTURE.split(';') {
        let sql = statement.trim();
        if sql.is_empty() {
            continue;
        }
        sqlx::query(sql)
            .execute(pool)
            .await
            .with_context(|| format!("executing fixture statement {sql}"))?;
    }
    Ok(())
}

#[tokio::test]
async fn introspects_auto_increment_keys_and_lengths() -> Result<()> {
    let Some(db_url) = database_url() else {
        eprintln!("skipping: set TEST_MYSQL_URL to run MySQL integration tests");
        return Ok(());
    };

    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(std::time::Duration::from_secs(10))
        .connect(&db_url)
        .await
        .context("connecting to MySQL")?;
    reset_fixture(&pool).await?;

    let mut db = MysqlDatabase::new(settings_from_url(&db_url)?);
    let schema = db.schema().to_string();
    db.connect().await?;

    let mut tables: Vec<_> = db
        .list_tables(&schema)
        .await?
        .into_iter()
        .filter(|table| table.name.starts_with(TABLE_PREFIX))
        .collect();
    let names: Vec<&str> = tables.iter().map(|table| table.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["tagsmith_it_orders", "tagsmith_it_users"],
        "views are not base tables"
    );

    db.prepare_column_query().await?;
    for table in &mut tables {
        db.fetch_columns(table, &schema).await?;
    }

    let users = tables
        .iter()
        .find(|table| table.name == "tagsmith_it_users")
        .ok_or_else(|| anyhow!("expected users table"))?;
    let columns: Vec<&str> = users.columns.iter().map(|col| col.name.as_str()).collect();
    assert_eq!(columns, vec!["id", "email", "bio", "created_at"]);

    let id = users.column("id").ok_or_else(|| anyhow!("id column missing"))?;
    assert_eq!(id.data_type, "int");
    assert!(db.is_primary_key(id));
    assert!(db.is_auto_increment(id));
    assert!(!id.is_nullable);
    assert_eq!(db.classify(id), Some(TypeCategory::Integer));

    let email = users.column("email").ok_or_else(|| anyhow!("email column missing"))?;
    assert_eq!(email.character_maximum_length, Some(120));
    assert_eq!(email.constraint_type.as_deref(), Some("UNIQUE"));
    assert!(!db.is_auto_increment(email));
    assert_eq!(db.classify(email), Some(TypeCategory::String));

    let bio = users.column("bio").ok_or_else(|| anyhow!("bio column missing"))?;
    assert!(bio.is_nullable);
    assert!(bio.constraint_type.is_none());
    assert_eq!(db.classify(bio), Some(TypeCategory::Text));

    let created_at = users
        .column("created_at")
        .ok_or_else(|| anyhow!("created_at column missing"))?;
    assert!(!db.is_auto_increment(created_at));
    assert_eq!(db.classify(created_at), Some(TypeCategory::Temporal));

    let orders = tables
        .iter()
        .find(|table| table.name == "tagsmith_it_orders")
        .ok_or_else(|| anyhow!("expected orders table"))?;
    let order_id = orders.column("id").ok_or_else(|| anyhow!("order id missing"))?;
    assert!(db.is_primary_key(order_id));
    assert!(!db.is_auto_increment(order_id));
    let user_id = orders
        .column("user_id")
        .ok_or_else(|| anyhow!("user_id column missing"))?;
    assert_eq!(user_id.constraint_type.as_deref(), Some("FOREIGN KEY"));
    assert_eq!(
        user_id.constraint_name.as_deref(),
        Some("tagsmith_it_orders_user_fk")
    );
    let total = orders.column("total").ok_or_else(|| anyhow!("total column missing"))?;
    assert_eq!(total.numeric_precision, Some(10));
    assert_eq!(db.classify(total), Some(TypeCategory::Float));

    db.close().await;
    Ok(())
}

#[tokio::test]
async fn fetching_before_connect_fails() {
    let mut settings = Settings::for_dialect(Dialect::Mysql);
    settings.connection.database = "shop".to_string();
    let db = MysqlDatabase::new(settings);
    assert_eq!(db.schema(), "shop");

    let mut table = tagsmith_core::Table::new("users");
    let err = db.fetch_columns(&mut table, "shop").await.unwrap_err();
    assert!(matches!(err, tagsmith_core::Error::NotPrepared));
    assert!(table.columns.is_empty());

    let err = db.list_tables("shop").await.unwrap_err();
    assert!(matches!(err, tagsmith_core::Error::NotConnected));
}
