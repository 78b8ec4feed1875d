//! Embedded schema migrations applied at startup.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::UserPersistenceError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply all pending migrations to the database at `database_url`.
///
/// Runs on a blocking thread because `diesel_migrations` drives a synchronous
/// connection.
///
/// # Errors
///
/// Returns `Connection` when the database cannot be reached and `Query` when
/// a migration fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), UserPersistenceError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || migrate(&url))
        .await
        .map_err(|err| UserPersistenceError::query(format!("migration task failed: {err}")))?
}

fn migrate(url: &str) -> Result<(), UserPersistenceError> {
    let mut conn = PgConnection::establish(url)
        .map_err(|err| UserPersistenceError::connection(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| UserPersistenceError::query(format!("migration: {err}")))?;
    info!(count = applied.len(), "applied pending migrations");
    Ok(())
}
