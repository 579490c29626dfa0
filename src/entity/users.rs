use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Argon2 PHC string, never the raw password.
    #[serde(skip_serializing)]
    pub password: String,
    pub last_login: Option<DateTimeWithTimeZone>,
    pub is_superuser: bool,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub is_staff: bool,
    pub phone: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::addresses::Entity")]
    Addresses,
    #[sea_orm(has_many = "super::cart_objs::Entity")]
    CartObjs,
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::likes::Entity")]
    Likes,
    #[sea_orm(has_many = "super::appointments::Entity")]
    Appointments,
}

impl Related<super::addresses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Addresses.def()
    }
}

impl Related<super::cart_objs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartObjs.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::likes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl Related<super::appointments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointments.def()
    }
}

// The cart: products reached through cart_objs.
impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        super::cart_objs::Relation::Products.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::cart_objs::Relation::Users.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
