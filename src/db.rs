use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::info;

use crate::{config::Config, error::AppResult};

const PRAGMAS: [&str; 2] = ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"];

pub async fn connect(config: &Config) -> AppResult<DatabaseConnection> {
    let mut opts = ConnectOptions::new(config.database_url.clone());
    opts.sqlx_logging(false);
    if config.is_in_memory() {
        // Every pooled connection would otherwise see its own empty database.
        opts.max_connections(1).min_connections(1);
    }

    let db = Database::connect(opts).await?;

    if !config.is_in_memory() {
        for pragma in PRAGMAS {
            db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string()))
                .await?;
        }
    }

    info!(url = %config.database_url, "connected");
    Ok(db)
}

/// Creates the tables and inserts seed rows. Safe to call on an already
/// initialized database.
pub async fn initialize(db: &DatabaseConnection) -> AppResult<()> {
    let pending = Migrator::get_pending_migrations(db).await?;
    if pending.is_empty() {
        return Ok(());
    }

    for migration in &pending {
        info!(name = migration.name(), "applying migration");
    }
    Migrator::up(db, None).await?;
    Ok(())
}
