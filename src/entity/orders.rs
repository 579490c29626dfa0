use sea_orm::ActiveValue;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::validate;

/// Delivery progress. Orders move OR → OFD → DL; nothing enforces it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(3))")]
pub enum OrderStatus {
    #[default]
    #[sea_orm(string_value = "OR")]
    Ordered,
    #[sea_orm(string_value = "OFD")]
    OutForDelivery,
    #[sea_orm(string_value = "DL")]
    Delivered,
}

impl OrderStatus {
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Ordered => "ordered",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
        }
    }

    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Ordered => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }
}

/// An order. The address columns are copied from the user's address when
/// the order is placed and never follow later edits to it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub order_timestamp: DateTimeWithTimeZone,
    pub status: OrderStatus,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub country: String,
    pub name: String,
    pub phone: String,
    pub pincode: i32,
    pub state: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(has_many = "super::order_objs::Entity")]
    OrderObjs,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::order_objs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderObjs.def()
    }
}

// product_objects: products reached through order_objs.
impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        super::order_objs::Relation::Products.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::order_objs::Relation::Orders.def().rev())
    }
}

/// Snapshot columns have no CHECK constraint (rows backfilled with 0/"0"
/// would violate it), so values written from here on are validated instead.
#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if let ActiveValue::Set(pincode) = &self.pincode {
            validate::pincode(*pincode).map_err(|e| e.into_db_err())?;
        }
        if let ActiveValue::Set(phone) = &self.phone {
            validate::phone(phone).map_err(|e| e.into_db_err())?;
        }
        Ok(self)
    }
}
