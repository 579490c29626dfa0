//! Field validators run by the data-access layer before a row reaches the
//! store. The same bounds back the CHECK constraints declared in the schema.

use crate::error::{StoreError, StoreResult};

pub const NAME_MAX_LEN: usize = 255;
pub const PASSWORD_MAX_LEN: usize = 128;
pub const KIND_MAX_LEN: usize = 50;
pub const PHONE_LEN: usize = 10;
pub const PINCODE_MIN: i64 = 100_000;
pub const PINCODE_MAX: i64 = 999_999;
pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 5;

/// Implemented by every insert payload.
pub trait Validate {
    fn validate(&self) -> StoreResult<()>;
}

pub fn max_len(field: &str, value: &str, max: usize) -> StoreResult<()> {
    let len = value.chars().count();
    if len > max {
        return Err(StoreError::range(field, format!("length {len} exceeds {max}")));
    }
    Ok(())
}

pub fn exact_len(field: &str, value: &str, expected: usize) -> StoreResult<()> {
    let len = value.chars().count();
    if len != expected {
        return Err(StoreError::range(field, format!("length {len}, expected exactly {expected}")));
    }
    Ok(())
}

pub fn in_range(field: &str, value: i64, min: i64, max: i64) -> StoreResult<()> {
    if !(min..=max).contains(&value) {
        return Err(StoreError::range(field, format!("{value} outside {min}..={max}")));
    }
    Ok(())
}

pub fn non_negative(field: &str, value: i64) -> StoreResult<()> {
    if value < 0 {
        return Err(StoreError::range(field, format!("{value} is negative")));
    }
    Ok(())
}

pub fn phone(value: &str) -> StoreResult<()> {
    exact_len("phone", value, PHONE_LEN)
}

pub fn pincode(value: i32) -> StoreResult<()> {
    in_range("pincode", value.into(), PINCODE_MIN, PINCODE_MAX)
}

pub fn rating(value: i32) -> StoreResult<()> {
    in_range("rating", value.into(), RATING_MIN, RATING_MAX)
}

pub fn email(value: &str) -> StoreResult<()> {
    max_len("email", value, NAME_MAX_LEN)?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(StoreError::range("email", format!("{value:?} is not an address"))),
    }
}
