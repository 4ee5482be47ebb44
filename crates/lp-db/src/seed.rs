//! JSON seed data loader.
//!
//! A seed directory holds one `<table>.json` file per table, each an array of objects
//! whose keys are column names.

use std::path::Path;

use anyhow::{Context, bail, ensure};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{SqliteConnection, SqlitePool};
use tokio::fs;

/// Seedable tables, in foreign-key dependency order.
pub const SEED_TABLES: [&str; 6] = [
    "groups",
    "words",
    "words_groups",
    "study_activities",
    "study_sessions",
    "word_review_items",
];

/// Rows inserted per table by [`seed_from_dir`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub tables: Vec<(&'static str, usize)>,
}

impl SeedReport {
    /// Total number of inserted rows.
    pub fn total(&self) -> usize {
        self.tables.iter().map(|(_, count)| count).sum()
    }
}

/// Load every known seed file in `dir` inside a single transaction.
pub async fn seed_from_dir(pool: &SqlitePool, dir: &Path) -> anyhow::Result<SeedReport> {
    warn_unknown_files(dir).await?;

    let mut tx = pool.begin().await.context("failed to start seed transaction")?;
    let mut report = SeedReport::default();

    for table in SEED_TABLES {
        let path = dir.join(format!("{table}.json"));
        if !fs::metadata(&path).await.is_ok_and(|meta| meta.is_file()) {
            continue;
        }

        let raw = fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        let rows: Vec<Map<String, Value>> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON from {}", path.display()))?;

        for row in &rows {
            insert_row(&mut *tx, table, row)
                .await
                .with_context(|| format!("failed to insert seed row into {table}"))?;
        }

        tracing::info!(table, rows = rows.len(), "Seeded table");
        report.tables.push((table, rows.len()));
    }

    tx.commit().await.context("failed to commit seed data")?;

    Ok(report)
}

/// Whether the vocabulary tables hold no rows yet, so a seed run cannot collide with
/// existing ids.
pub async fn is_unseeded(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let rows: i64 = sqlx::query_scalar(
        // language=SQLite
        r#"
            SELECT (SELECT COUNT(*) FROM words) + (SELECT COUNT(*) FROM groups)
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(rows == 0)
}

async fn warn_unknown_files(dir: &Path) -> anyhow::Result<()> {
    let mut entries = fs::read_dir(dir)
        .await
        .with_context(|| format!("failed to read seeds directory {}", dir.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let known = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| SEED_TABLES.contains(&stem));
        if is_json && !known {
            tracing::warn!(file = %path.display(), "Ignoring seed file for unknown table");
        }
    }

    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Insert one JSON object as a row. `table` always comes from [`SEED_TABLES`]; column
/// names are checked before being spliced into the statement.
async fn insert_row(
    conn: &mut SqliteConnection,
    table: &str,
    row: &Map<String, Value>,
) -> anyhow::Result<()> {
    ensure!(!row.is_empty(), "seed row for {table} has no columns");
    for column in row.keys() {
        ensure!(is_identifier(column), "invalid column name {column:?}");
    }

    let columns = row.keys().map(String::as_str).collect::<Vec<_>>().join(", ");
    let placeholders = vec!["?"; row.len()].join(", ");
    let sql = format!("INSERT INTO {table} ({columns}) VALUES ({placeholders})");

    let mut query = sqlx::query(&sql);
    for (column, value) in row {
        query = match value {
            Value::Null => query.bind(None::<String>),
            Value::Bool(b) => query.bind(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => query.bind(i),
                None => query.bind(n.as_f64()),
            },
            Value::String(s) if column == "created_at" => query.bind(parse_timestamp(s)?),
            Value::String(s) => query.bind(s.clone()),
            Value::Array(_) | Value::Object(_) => {
                bail!("column {column:?} holds a nested JSON value")
            }
        };
    }

    query.execute(&mut *conn).await?;

    Ok(())
}

fn parse_timestamp(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("created_at {raw:?} is not an RFC 3339 timestamp"))?;
    Ok(parsed.with_timezone(&Utc))
}
