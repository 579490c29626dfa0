use sea_orm_migration::prelude::*;

use crate::{
    schema::{DefaultValue, FieldDef, MigrationStep, integer, string},
    validate::{NAME_MAX_LEN, PHONE_LEN},
};

pub const NAME: &str = "m0014_order_address_snapshot";

const MAX: u32 = NAME_MAX_LEN as u32;

/// Backfilled with "0"/0, then required.
fn backfill(table: &'static str, field: FieldDef) -> MigrationStep {
    MigrationStep::AddField {
        table,
        field,
        preserve_default: false,
    }
}

fn text_zero(name: &'static str, len: u32) -> FieldDef {
    string(name, len).default(DefaultValue::String("0"))
}

fn int_zero(name: &'static str) -> FieldDef {
    integer(name).default(DefaultValue::Integer(0))
}

/// Orders keep a copy of the shipping address and each line its unit price.
pub fn steps() -> Vec<MigrationStep> {
    vec![
        backfill("addresses", text_zero("phone", PHONE_LEN as u32)),
        backfill("orders", text_zero("address1", MAX)),
        backfill("orders", text_zero("address2", MAX)),
        backfill("orders", text_zero("city", MAX)),
        backfill("orders", text_zero("country", MAX)),
        backfill("orders", text_zero("name", MAX)),
        backfill("orders", text_zero("phone", PHONE_LEN as u32)),
        backfill("orders", int_zero("pincode")),
        backfill("orders", text_zero("state", MAX)),
        backfill("order_objs", int_zero("price")),
        MigrationStep::AlterField {
            table: "addresses",
            field: string("name", MAX),
        },
    ]
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        super::up(manager, self.name()).await
    }
}
