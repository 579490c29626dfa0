use sea_orm::{ConnectionTrait, DbBackend};
use sea_orm_migration::prelude::*;

use crate::schema::{EntityDef, MigrationStep, OnDelete, Schema, render};

/// Applies `steps` to the in-memory `schema` and to the database behind
/// `manager`, one step at a time.
pub async fn run_steps(
    manager: &SchemaManager<'_>,
    schema: &mut Schema,
    steps: &[MigrationStep],
) -> Result<(), DbErr> {
    for step in steps {
        schema
            .apply(step)
            .map_err(|err| DbErr::Migration(err.to_string()))?;
        let def = schema
            .entity(step.table())
            .cloned()
            .ok_or_else(|| DbErr::Migration(format!("table {} vanished", step.table())))?;
        run_step(manager, &def, step).await?;
    }
    Ok(())
}

async fn run_step(
    manager: &SchemaManager<'_>,
    def: &EntityDef,
    step: &MigrationStep,
) -> Result<(), DbErr> {
    let backend = manager.get_database_backend();
    match step {
        MigrationStep::CreateEntity(_) => {
            tracing::debug!(table = def.table, "creating table");
            manager
                .create_table(render::create_table(def, def.table))
                .await?;
            for index in render::indexes(def) {
                manager.create_index(index).await?;
            }
        }
        MigrationStep::AddField {
            table,
            field,
            preserve_default,
        } => {
            tracing::debug!(table, field = field.name, "adding field");
            // Phase one: existing rows are backfilled through the default.
            let mut column = render::column_def(field);
            manager
                .alter_table(
                    Table::alter()
                        .table(Alias::new(*table))
                        .add_column(&mut column)
                        .to_owned(),
                )
                .await?;

            let constrained =
                matches!(field.references, Some(r) if r.on_delete == OnDelete::Cascade);
            if backend == DbBackend::Sqlite {
                if !preserve_default || constrained {
                    rebuild_sqlite_table(manager, def).await?;
                }
                return Ok(());
            }
            // Phase two: new rows must carry their own value.
            if !preserve_default {
                manager
                    .get_connection()
                    .execute_unprepared(&render::drop_default(backend, table, field.name))
                    .await?;
            }
            if let (true, Some(reference)) = (constrained, field.references) {
                manager
                    .create_foreign_key(
                        ForeignKey::create()
                            .name(format!("fk-{table}-{}", field.name))
                            .from(Alias::new(*table), Alias::new(field.name))
                            .to(
                                Alias::new(reference.table),
                                Alias::new(EntityDef::PRIMARY_KEY),
                            )
                            .on_delete(ForeignKeyAction::Cascade)
                            .to_owned(),
                    )
                    .await?;
            }
        }
        MigrationStep::AlterField { table, field } => {
            tracing::debug!(table, field = field.name, "altering field");
            if backend == DbBackend::Sqlite {
                return rebuild_sqlite_table(manager, def).await;
            }
            let mut column = render::column_def(field);
            manager
                .alter_table(
                    Table::alter()
                        .table(Alias::new(*table))
                        .modify_column(&mut column)
                        .to_owned(),
                )
                .await?;
            if field.default.is_none() {
                manager
                    .get_connection()
                    .execute_unprepared(&render::drop_default(backend, table, field.name))
                    .await?;
            }
        }
    }
    Ok(())
}

/// SQLite cannot alter a column in place, so the table is recreated from its
/// current definition and the rows copied across.
async fn rebuild_sqlite_table(manager: &SchemaManager<'_>, def: &EntityDef) -> Result<(), DbErr> {
    let conn = manager.get_connection();
    let scratch = format!("{}__new", def.table);
    tracing::debug!(table = def.table, "rebuilding sqlite table");

    // Dropping the old table must not cascade into its children.
    conn.execute_unprepared("PRAGMA foreign_keys = OFF").await?;

    manager
        .create_table(render::create_table(def, &scratch))
        .await?;

    let columns: Vec<Alias> = def.column_names().into_iter().map(Alias::new).collect();
    let mut copy = Query::insert();
    copy.into_table(Alias::new(&scratch))
        .columns(columns.clone());
    copy.select_from(
        Query::select()
            .columns(columns)
            .from(Alias::new(def.table))
            .to_owned(),
    )
    .map_err(|err| DbErr::Migration(err.to_string()))?;
    conn.execute(conn.get_database_backend().build(&copy))
        .await?;

    manager
        .drop_table(Table::drop().table(Alias::new(def.table)).to_owned())
        .await?;
    manager
        .rename_table(
            Table::rename()
                .table(Alias::new(&scratch), Alias::new(def.table))
                .to_owned(),
        )
        .await?;
    for index in render::indexes(def) {
        manager.create_index(index).await?;
    }

    conn.execute_unprepared("PRAGMA foreign_keys = ON").await?;
    Ok(())
}
