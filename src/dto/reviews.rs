use serde::Deserialize;

use crate::{
    error::StoreResult,
    validate::{self, NAME_MAX_LEN, Validate},
};

#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub rating: i32,
    pub text: Option<String>,
}

impl Validate for NewReview {
    fn validate(&self) -> StoreResult<()> {
        validate::rating(self.rating)?;
        match &self.text {
            Some(text) => validate::max_len("text", text, NAME_MAX_LEN),
            None => Ok(()),
        }
    }
}
