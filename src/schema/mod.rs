//! Declarative description of the storefront tables and the steps that
//! evolve them.
//!
//! A [`Schema`] starts empty and is built by applying [`MigrationStep`]s in
//! order. Applying a step that does not fit the current state (creating a
//! table twice, adding a field that already exists, altering one that does
//! not) is a [`StoreError::SchemaConflict`].

mod def;
pub mod render;

use std::collections::BTreeMap;

pub use def::{
    Check, DefaultValue, EntityDef, FieldDef, FieldType, OnDelete, Reference, boolean, date,
    foreign_key, integer, string, text, timestamp,
};

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationStep {
    CreateEntity(EntityDef),
    /// Adds a column. When `preserve_default` is false the default only
    /// backfills existing rows and is dropped afterwards.
    AddField {
        table: &'static str,
        field: FieldDef,
        preserve_default: bool,
    },
    AlterField {
        table: &'static str,
        field: FieldDef,
    },
}

impl MigrationStep {
    pub fn table(&self) -> &'static str {
        match self {
            MigrationStep::CreateEntity(def) => def.table,
            MigrationStep::AddField { table, .. } | MigrationStep::AlterField { table, .. } => {
                *table
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    entities: BTreeMap<&'static str, EntityDef>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity(&self, table: &str) -> Option<&EntityDef> {
        self.entities.get(table)
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityDef> {
        self.entities.values()
    }

    pub fn apply_all<'a>(
        &mut self,
        steps: impl IntoIterator<Item = &'a MigrationStep>,
    ) -> StoreResult<()> {
        steps.into_iter().try_for_each(|step| self.apply(step))
    }

    pub fn apply(&mut self, step: &MigrationStep) -> StoreResult<()> {
        match step {
            MigrationStep::CreateEntity(def) => {
                if self.entities.contains_key(def.table) {
                    return Err(conflict(format!("table {} already exists", def.table)));
                }
                for field in &def.fields {
                    self.check_reference(def.table, field)?;
                }
                for columns in &def.unique_together {
                    if let Some(missing) = columns.iter().find(|c| def.get(c).is_none()) {
                        return Err(conflict(format!(
                            "unique constraint on {} names unknown field {missing}",
                            def.table
                        )));
                    }
                }
                self.entities.insert(def.table, def.clone());
            }
            MigrationStep::AddField {
                table,
                field,
                preserve_default,
            } => {
                self.check_reference(table, field)?;
                let entity = self.entity_mut(table)?;
                if entity.get(field.name).is_some() || field.name == EntityDef::PRIMARY_KEY {
                    return Err(conflict(format!("{table}.{} already exists", field.name)));
                }
                if !field.nullable && field.default.is_none() {
                    return Err(conflict(format!(
                        "{table}.{} is required but has no default to backfill with",
                        field.name
                    )));
                }
                let mut field = field.clone();
                if !preserve_default {
                    field.default = None;
                }
                entity.fields.push(field);
            }
            MigrationStep::AlterField { table, field } => {
                self.check_reference(table, field)?;
                let entity = self.entity_mut(table)?;
                match entity.get_mut(field.name) {
                    Some(existing) => *existing = field.clone(),
                    None => {
                        return Err(conflict(format!("{table}.{} does not exist", field.name)));
                    }
                }
            }
        }
        Ok(())
    }

    fn entity_mut(&mut self, table: &str) -> StoreResult<&mut EntityDef> {
        self.entities
            .get_mut(table)
            .ok_or_else(|| conflict(format!("table {table} does not exist")))
    }

    fn check_reference(&self, table: &str, field: &FieldDef) -> StoreResult<()> {
        match field.references {
            // Self-references are allowed while the table is being created.
            Some(reference)
                if reference.table != table && !self.entities.contains_key(reference.table) =>
            {
                Err(conflict(format!(
                    "{table}.{} references missing table {}",
                    field.name, reference.table
                )))
            }
            _ => Ok(()),
        }
    }
}

fn conflict(message: String) -> StoreError {
    StoreError::SchemaConflict(message)
}
