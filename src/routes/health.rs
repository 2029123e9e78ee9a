use axum::{extract::State, Json};
use redb::Database;
use serde_json::{json, Value};

use crate::db::tables;
use crate::error::Result;
use crate::AppState;

/// Open every table the registry and identity routes read from
///
/// A database that lost a table (or was never initialized) fails here
/// rather than on the first user request.
pub fn check_tables(db: &Database) -> Result<()> {
    let read_txn = db.begin_read()?;
    read_txn.open_table(tables::USERS)?;
    read_txn.open_table(tables::USERNAMES)?;
    read_txn.open_table(tables::USER_STATES)?;
    read_txn.open_table(tables::DESIGNS)?;
    read_txn.open_table(tables::SEQUENCES)?;
    Ok(())
}

/// Health check endpoint
///
/// GET /health reports `healthy` once every table can be opened.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db = state.db.clone();
    let db_status = match tokio::task::spawn_blocking(move || check_tables(&db)).await {
        Ok(Ok(())) => "connected",
        Ok(Err(e)) => {
            tracing::error!("Database health check failed: {:?}", e);
            "disconnected"
        }
        Err(e) => {
            tracing::error!("Health check task failed: {}", e);
            "error"
        }
    };

    Json(json!({
        "status": if db_status == "connected" { "healthy" } else { "unhealthy" },
        "database": db_status,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
