use serde::Deserialize;

use crate::{
    entity::products::ProductKind,
    error::StoreResult,
    validate::{self, NAME_MAX_LEN, Validate},
};

#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: i32,
    #[serde(default)]
    pub discount: i32,
    #[serde(default)]
    pub stock: i32,
    pub kind: ProductKind,
    pub description: String,
}

impl Validate for NewProduct {
    fn validate(&self) -> StoreResult<()> {
        validate::max_len("name", &self.name, NAME_MAX_LEN)?;
        validate::non_negative("price", self.price.into())
    }
}
