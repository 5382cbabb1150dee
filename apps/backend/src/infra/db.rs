use migration::MigrationCommand;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::error::AppError;

/// Open a connection pool for the given connection string.
/// This function does NOT run any migrations.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(database_url.to_string());
    options.sqlx_logging(false);

    // In-memory SQLite (the test profile) must stay on a single connection;
    // every additional pooled connection would see its own empty database.
    if database_url.starts_with("sqlite::memory:") {
        options.max_connections(1);
    }

    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Single bootstrap entrypoint: connect, then bring the schema up to date.
pub async fn bootstrap_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(database_url).await?;
    migration::migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(AppError::from)?;
    Ok(conn)
}
