use std::time::Instant;

use tracing::{debug, info, warn};

use tagsmith_core::{Result, Settings, SettingsInput, Table};
use tagsmith_introspect::Database;

use crate::model::{GenerationOutput, TaggedColumn, TaggedTable};
use crate::tagger::Tagger;

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Validated settings the run used.
    pub settings: Settings,
    pub output: GenerationOutput,
}

/// Validate the settings, then open the database and generate.
///
/// `open` is only called once the settings are valid, so a configuration
/// error never opens a connection.
pub async fn run<F>(input: SettingsInput, open: F) -> Result<GenerationResult>
where
    F: FnOnce(&Settings) -> Box<dyn Database>,
{
    let settings = Settings::from_input(input)?;
    info!(
        event = "settings_validated",
        dialect = %settings.dialect,
        schema = %settings.schema(),
        package = %settings.package_name
    );

    let mut db = open(&settings);
    let tables = generate(db.as_mut()).await?;
    let output = GenerationOutput::new(&settings, db.schema(), tables);
    Ok(GenerationResult { settings, output })
}

/// Connect, introspect every table of the schema, and tag every column.
///
/// Tables and columns are processed one at a time in catalog order. The first
/// failure aborts the run and no partial table is returned. The connection is
/// closed in both cases.
pub async fn generate<D: Database + ?Sized>(db: &mut D) -> Result<Vec<TaggedTable>> {
    let timer = Instant::now();
    db.connect().await?;

    let result = tag_schema(db).await;
    db.close().await;

    match &result {
        Ok(tables) => info!(
            event = "generation_finished",
            tables = tables.len(),
            duration_ms = timer.elapsed().as_millis()
        ),
        Err(err) => warn!(event = "generation_failed", table = err.table(), error = %err),
    }
    result
}

async fn tag_schema<D: Database + ?Sized>(db: &mut D) -> Result<Vec<TaggedTable>> {
    let settings = db.settings().clone();
    let schema = db.schema().to_string();
    let taggers = Tagger::selected(&settings.tags);

    let tables = db.list_tables(&schema).await?;
    info!(event = "tables_listed", schema = %schema, count = tables.len());

    db.prepare_column_query().await?;

    let mut tagged = Vec::with_capacity(tables.len());
    for mut table in tables {
        db.fetch_columns(&mut table, &schema).await?;
        debug!(event = "columns_fetched", table = %table.name, columns = table.columns.len());
        tagged.push(tag_table(&*db, table, &taggers, &settings));
    }

    Ok(tagged)
}

/// Run every tagger against every column of a fetched table.
pub fn tag_table<D: Database + ?Sized>(
    db: &D,
    table: Table,
    taggers: &[Tagger],
    settings: &Settings,
) -> TaggedTable {
    let columns = table
        .columns
        .into_iter()
        .map(|column| {
            let tags = taggers
                .iter()
                .map(|tagger| tagger.generate_tag(db, &column, settings))
                .collect();
            TaggedColumn { column, tags }
        })
        .collect();

    TaggedTable {
        name: table.name,
        columns,
    }
}
