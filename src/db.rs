use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::{MigrationStatus, MigratorTrait};

use crate::{error::StoreResult, migration::Migrator};

/// Create a SeaORM connection.
pub async fn create_orm_conn(database_url: &str) -> StoreResult<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url);
    options.sqlx_logging(false);
    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Applies every pending migration in declared order.
pub async fn run_migrations(conn: &DatabaseConnection) -> StoreResult<()> {
    let pending = Migrator::get_pending_migrations(conn).await?;
    if pending.is_empty() {
        tracing::info!("schema is up to date");
        return Ok(());
    }
    for migration in &pending {
        tracing::info!(migration = migration.name(), "applying migration");
    }
    Migrator::up(conn, None).await?;
    tracing::info!(count = pending.len(), "migrations applied");
    Ok(())
}

/// Name and applied flag of every declared migration, in order.
pub async fn migration_status(conn: &DatabaseConnection) -> StoreResult<Vec<(String, bool)>> {
    let migrations = Migrator::get_migration_with_status(conn).await?;
    Ok(migrations
        .iter()
        .map(|m| {
            (
                m.name().to_string(),
                matches!(m.status(), MigrationStatus::Applied),
            )
        })
        .collect())
}
