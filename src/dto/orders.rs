use serde::{Deserialize, Serialize};

use crate::{
    entity::{order_objs, orders},
    error::StoreResult,
    validate::{self, Validate},
};

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OrderLine {
    pub product_id: i32,
    #[serde(default = "one")]
    pub qty: i32,
}

fn one() -> i32 {
    1
}

impl Validate for OrderLine {
    fn validate(&self) -> StoreResult<()> {
        validate::in_range("qty", self.qty.into(), 1, i32::MAX.into())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderWithLines {
    pub order: orders::Model,
    pub lines: Vec<order_objs::Model>,
}
