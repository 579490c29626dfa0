use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
pub enum ProductKind {
    #[sea_orm(string_value = "Jewellery")]
    Jewellery,
    #[sea_orm(string_value = "Cloth")]
    Cloth,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub price: i32,
    #[sea_orm(default_value = 0)]
    pub discount: i32,
    #[sea_orm(default_value = 0)]
    pub stock: i32,
    pub kind: ProductKind,
    #[sea_orm(column_type = "Text")]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::photos::Entity")]
    Photos,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::cart_objs::Entity")]
    CartObjs,
    #[sea_orm(has_many = "super::order_objs::Entity")]
    OrderObjs,
}

impl Related<super::photos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Photos.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::cart_objs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartObjs.def()
    }
}

impl Related<super::order_objs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderObjs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
