use serde::Deserialize;

use crate::{
    error::StoreResult,
    validate::{self, NAME_MAX_LEN, Validate},
};

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Raw password; only its hash is stored.
    pub password: String,
    #[serde(default)]
    pub is_staff: bool,
}

impl Validate for NewUser {
    fn validate(&self) -> StoreResult<()> {
        validate::max_len("name", &self.name, NAME_MAX_LEN)?;
        validate::email(&self.email)?;
        validate::phone(&self.phone)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAddress {
    pub name: String,
    pub phone: String,
    pub address1: String,
    pub address2: String,
    pub pincode: i32,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl Validate for NewAddress {
    fn validate(&self) -> StoreResult<()> {
        for (field, value) in [
            ("name", &self.name),
            ("address1", &self.address1),
            ("address2", &self.address2),
            ("city", &self.city),
            ("state", &self.state),
            ("country", &self.country),
        ] {
            validate::max_len(field, value, NAME_MAX_LEN)?;
        }
        validate::phone(&self.phone)?;
        validate::pincode(self.pincode)
    }
}
