use sea_orm_migration::prelude::*;

use sea_orm::DatabaseConnection;

use crate::{
    error::{StoreError, StoreResult},
    schema::{MigrationStep, Schema},
};

mod exec;
mod m0001_initial;
mod m0014_order_address_snapshot;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m0001_initial::Migration),
            Box::new(m0014_order_address_snapshot::Migration),
        ]
    }
}

/// Every migration's name and steps, in the order they apply.
pub fn history() -> Vec<(&'static str, Vec<MigrationStep>)> {
    vec![
        (m0001_initial::NAME, m0001_initial::steps()),
        (
            m0014_order_address_snapshot::NAME,
            m0014_order_address_snapshot::steps(),
        ),
    ]
}

/// The schema as it stands after every migration has run.
pub fn final_schema() -> StoreResult<Schema> {
    let mut schema = Schema::new();
    for (_, steps) in history() {
        schema.apply_all(&steps)?;
    }
    Ok(schema)
}

/// The schema as it stands right before `name` runs.
pub(crate) fn schema_before(name: &str) -> StoreResult<Schema> {
    let mut schema = Schema::new();
    for (migration, steps) in history() {
        if migration == name {
            return Ok(schema);
        }
        schema.apply_all(&steps)?;
    }
    Err(StoreError::SchemaConflict(format!("unknown migration {name}")))
}

/// Shared body of every migration's `up`.
pub(crate) async fn up(manager: &SchemaManager<'_>, name: &str) -> Result<(), DbErr> {
    let mut schema = schema_before(name).map_err(|err| DbErr::Migration(err.to_string()))?;
    let steps = history()
        .into_iter()
        .find(|(migration, _)| *migration == name)
        .map(|(_, steps)| steps)
        .unwrap_or_default();
    exec::run_steps(manager, &mut schema, &steps).await
}

/// Applies exactly the migration called `name`.
///
/// Unlike [`MigratorTrait::up`], which skips what is already done, this fails
/// with [`StoreError::SchemaConflict`] when `name` is unknown, already applied,
/// or not the next pending migration.
pub async fn apply(db: &DatabaseConnection, name: &str) -> StoreResult<()> {
    if !history().iter().any(|(migration, _)| *migration == name) {
        return Err(StoreError::SchemaConflict(format!("unknown migration {name}")));
    }

    let applied = Migrator::get_applied_migrations(db).await?;
    if applied.iter().any(|m| m.name() == name) {
        return Err(StoreError::SchemaConflict(format!("migration {name} is already applied")));
    }

    let pending = Migrator::get_pending_migrations(db).await?;
    match pending.first() {
        Some(next) if next.name() == name => {}
        Some(next) => {
            return Err(StoreError::SchemaConflict(format!(
                "migration {name} cannot run before {}",
                next.name()
            )));
        }
        None => {
            return Err(StoreError::SchemaConflict(format!("migration {name} is not pending")));
        }
    }

    tracing::info!(migration = name, "applying migration");
    Migrator::up(db, Some(1)).await?;
    Ok(())
}
