//! Connection pool setup and schema migration

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use crate::config::Config;

const ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// Open the connection pool described by `config`
pub async fn connect(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    // sqlite pools default to a single connection unless told otherwise
    options
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
        .sqlx_logging(config.sqlx_logging);

    tracing::info!(
        max_connections = config.max_connections,
        "Connecting to database..."
    );
    Database::connect(options).await
}

/// Open the pool and bring the schema up to date
pub async fn connect_and_migrate(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let db = connect(config).await?;

    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None).await?;

    Ok(db)
}
