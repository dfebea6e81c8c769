//! # Status Command
//!
//! `stockledger status`: checks that the database answers queries, that
//! every embedded migration is applied, and reports how big the catalog is.
//! A database that cannot be queried fails the command with the database
//! exit code instead of printing a status.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use stockledger_db::Database;
use tracing::{debug, warn};

use super::{emit, OutputFormat};
use crate::error::CliResult;
use crate::state::{AppConfig, InventoryState};

/// `status --json` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDto {
    pub database_path: String,
    pub migrations_embedded: usize,
    pub migrations_applied: usize,
    pub up_to_date: bool,
    pub product_count: usize,
    pub last_assigned_id: i64,
    pub checked_at: DateTime<Utc>,
}

/// Runs the checks and prints the result.
pub async fn status<W: Write>(
    db: &Database,
    state: &InventoryState,
    config: &AppConfig,
    format: OutputFormat,
    out: &mut W,
) -> CliResult<()> {
    db.health_check().await?;
    let migrations = db.migration_status().await?;
    debug!(?migrations, "Database status checked");

    if !migrations.is_current() {
        warn!(
            embedded = migrations.embedded,
            applied = migrations.applied,
            "Database schema is behind"
        );
    }

    let report = StatusDto {
        database_path: config.db_path.display().to_string(),
        migrations_embedded: migrations.embedded,
        migrations_applied: migrations.applied,
        up_to_date: migrations.is_current(),
        product_count: state.products().len(),
        last_assigned_id: state.catalog().last_assigned_id(),
        checked_at: Utc::now(),
    };

    emit(out, format, &report, || render_status(&report))
}

fn render_status(report: &StatusDto) -> String {
    let schema = if report.up_to_date {
        "up to date"
    } else {
        "pending"
    };

    [
        "DATABASE STATUS".to_string(),
        format!("{:<13}{}", "Path:", report.database_path),
        format!("{:<13}ok", "Connection:"),
        format!(
            "{:<13}{}/{} applied ({})",
            "Migrations:", report.migrations_applied, report.migrations_embedded, schema
        ),
        format!("{:<13}{}", "Products:", report.product_count),
        format!("{:<13}{}", "Last id:", report.last_assigned_id),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use stockledger_db::DbConfig;

    fn config() -> AppConfig {
        AppConfig {
            db_path: PathBuf::from(":memory:"),
            currency_symbol: "R$".to_string(),
            top_limit: 10,
        }
    }

    #[tokio::test]
    async fn test_status_table() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut state = InventoryState::open(&db).await.unwrap();
        state.create("Widget", "Tools", "1.00", "1").await.unwrap();

        let mut out = Vec::new();
        status(&db, &state, &config(), OutputFormat::Table, &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("DATABASE STATUS\n"));
        assert!(text.contains("Path:        :memory:"));
        assert!(text.contains("(up to date)"));
        assert!(text.contains("Products:    1"));
        assert!(text.contains("Last id:     1"));
    }

    #[tokio::test]
    async fn test_status_json() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = InventoryState::open(&db).await.unwrap();

        let mut out = Vec::new();
        status(&db, &state, &config(), OutputFormat::Json, &mut out)
            .await
            .unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["upToDate"], true);
        assert_eq!(json["migrationsApplied"], json["migrationsEmbedded"]);
        assert_eq!(json["productCount"], 0);
        assert_eq!(json["lastAssignedId"], 0);
    }

    #[tokio::test]
    async fn test_status_fails_on_closed_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = InventoryState::open(&db).await.unwrap();
        db.close().await;

        let mut out = Vec::new();
        let err = status(&db, &state, &config(), OutputFormat::Table, &mut out)
            .await
            .unwrap_err();

        assert_eq!(err.code(), crate::error::ErrorCode::DatabaseError);
        assert!(out.is_empty());
    }
}
