use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    dto::accounts::{NewAddress, NewUser},
    entity::{
        Users,
        addresses::{ActiveModel as AddressActive, Model as AddressModel},
        users::{ActiveModel as UserActive, Model as UserModel},
    },
    error::{StoreError, StoreResult},
    services::cascade::{CascadeDelete, DeleteSummary},
    state::AppState,
    validate::Validate,
};

pub async fn create_user(state: &AppState, payload: NewUser) -> StoreResult<UserModel> {
    insert_user(state, payload, false).await
}

/// A user with staff and superuser rights.
pub async fn create_superuser(state: &AppState, mut payload: NewUser) -> StoreResult<UserModel> {
    payload.is_staff = true;
    insert_user(state, payload, true).await
}

async fn insert_user(
    state: &AppState,
    payload: NewUser,
    is_superuser: bool,
) -> StoreResult<UserModel> {
    payload.validate()?;
    let NewUser {
        name,
        email,
        phone,
        password,
        is_staff,
    } = payload;

    let user = UserActive {
        id: NotSet,
        password: Set(hash_password(&password)?),
        last_login: Set(None),
        is_superuser: Set(is_superuser),
        name: Set(name),
        email: Set(normalize_email(&email)),
        is_staff: Set(is_staff),
        phone: Set(phone),
    }
    .insert(&state.orm)
    .await?;

    tracing::debug!(user_id = user.id, is_staff, is_superuser, "user created");
    Ok(user)
}

pub fn check_password(user: &UserModel, raw: &str) -> bool {
    match PasswordHash::new(&user.password) {
        Ok(parsed) => Argon2::default()
            .verify_password(raw.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

fn hash_password(raw: &str) -> StoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map_err(|e| StoreError::Password(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// Lowercases the domain part; the local part is case sensitive.
fn normalize_email(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}

pub async fn add_address(
    state: &AppState,
    user_id: i32,
    payload: NewAddress,
) -> StoreResult<AddressModel> {
    payload.validate()?;
    Users::find_by_id(user_id)
        .one(&state.orm)
        .await?
        .ok_or(StoreError::NotFound)?;

    let address = AddressActive {
        id: NotSet,
        user_id: Set(user_id),
        name: Set(payload.name),
        address1: Set(payload.address1),
        address2: Set(payload.address2),
        pincode: Set(payload.pincode),
        city: Set(payload.city),
        state: Set(payload.state),
        country: Set(payload.country),
        phone: Set(payload.phone),
    }
    .insert(&state.orm)
    .await?;
    Ok(address)
}

/// Removes the user with their addresses, orders, reviews, likes and cart.
/// Their appointments stay behind.
pub async fn delete_user(state: &AppState, id: i32) -> StoreResult<DeleteSummary> {
    Users::delete_cascade(&state.orm, id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_domain_is_lowercased() {
        assert_eq!(normalize_email("Asha@Example.COM"), "Asha@example.com");
    }

    #[test]
    fn hashed_password_verifies() {
        let hash = hash_password("hunter22").unwrap();
        assert_ne!(hash, "hunter22");
        let user = UserModel {
            id: 1,
            password: hash,
            last_login: None,
            is_superuser: false,
            name: "Asha".into(),
            email: "asha@example.com".into(),
            is_staff: false,
            phone: "1234567890".into(),
        };
        assert!(check_password(&user, "hunter22"));
        assert!(!check_password(&user, "hunter23"));
    }
}
