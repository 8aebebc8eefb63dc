use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Bring the schema of `conn` up to date.
/// Tables are only ever created by the migration runner.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn).map_err(|e| AppError::Migration(e.to_string()))
}
