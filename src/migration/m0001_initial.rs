use sea_orm_migration::prelude::*;

use crate::{
    schema::{
        Check, DefaultValue, EntityDef, MigrationStep, OnDelete, boolean, date, foreign_key,
        integer, string, text, timestamp,
    },
    validate::{
        KIND_MAX_LEN, NAME_MAX_LEN, PASSWORD_MAX_LEN, PHONE_LEN, PINCODE_MAX, PINCODE_MIN,
        RATING_MAX, RATING_MIN,
    },
};

pub const NAME: &str = "m0001_initial";

const MAX: u32 = NAME_MAX_LEN as u32;

/// Every table in the shape it had before the order address snapshot.
pub fn steps() -> Vec<MigrationStep> {
    let products = EntityDef::new("products")
        .field(string("name", MAX))
        .field(integer("price").check(Check::AtLeast(0)))
        .field(integer("discount").default(DefaultValue::Integer(0)))
        .field(integer("stock").default(DefaultValue::Integer(0)))
        .field(string("kind", KIND_MAX_LEN as u32))
        .field(text("description"));

    let photos = EntityDef::new("photos")
        .field(foreign_key("product_id", "products", OnDelete::Cascade))
        .field(string("url", MAX));

    let users = EntityDef::new("users")
        .field(string("password", PASSWORD_MAX_LEN as u32))
        .field(timestamp("last_login").nullable())
        .field(boolean("is_superuser").default(DefaultValue::Boolean(false)))
        .field(string("name", MAX))
        .field(string("email", MAX).unique())
        .field(boolean("is_staff").default(DefaultValue::Boolean(false)))
        .field(string("phone", PHONE_LEN as u32).check(Check::Length(PHONE_LEN)));

    let addresses = EntityDef::new("addresses")
        .field(foreign_key("user_id", "users", OnDelete::Cascade))
        .field(string("name", 100))
        .field(string("address1", MAX))
        .field(string("address2", MAX))
        .field(integer("pincode").check(Check::Between(PINCODE_MIN, PINCODE_MAX)))
        .field(string("city", MAX))
        .field(string("state", MAX))
        .field(string("country", MAX));

    let cart_objs = EntityDef::new("cart_objs")
        .field(foreign_key("user_id", "users", OnDelete::Cascade))
        .field(foreign_key("product_id", "products", OnDelete::Cascade))
        .field(integer("qty").default(DefaultValue::Integer(1)));

    let orders = EntityDef::new("orders")
        .field(foreign_key("user_id", "users", OnDelete::Cascade))
        .field(timestamp("order_timestamp"))
        .field(string("status", 3).default(DefaultValue::String("OR")));

    let order_objs = EntityDef::new("order_objs")
        .field(foreign_key("order_id", "orders", OnDelete::Cascade))
        .field(foreign_key("product_id", "products", OnDelete::Cascade))
        .field(integer("qty").default(DefaultValue::Integer(1)))
        .unique_together(&["order_id", "product_id"]);

    let reviews = EntityDef::new("reviews")
        .field(foreign_key("user_id", "users", OnDelete::Cascade))
        .field(foreign_key("product_id", "products", OnDelete::Cascade))
        .field(integer("rating").check(Check::Between(RATING_MIN, RATING_MAX)))
        .field(string("text", MAX).nullable())
        .field(date("created_on"))
        .unique_together(&["user_id", "product_id"]);

    let likes = EntityDef::new("likes")
        .field(foreign_key("user_id", "users", OnDelete::Cascade))
        .field(foreign_key("review_id", "reviews", OnDelete::Cascade))
        .unique_together(&["user_id", "review_id"]);

    // Appointments outlive their user.
    let appointments = EntityDef::new("appointments")
        .field(timestamp("timestamp"))
        .field(foreign_key("user_id", "users", OnDelete::Ignore));

    [
        products,
        photos,
        users,
        addresses,
        cart_objs,
        orders,
        order_objs,
        reviews,
        likes,
        appointments,
    ]
    .into_iter()
    .map(MigrationStep::CreateEntity)
    .collect()
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        super::up(manager, self.name()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for step in steps().iter().rev() {
            manager
                .drop_table(Table::drop().table(Alias::new(step.table())).to_owned())
                .await?;
        }
        Ok(())
    }
}
