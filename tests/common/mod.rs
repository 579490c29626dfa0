#![allow(dead_code)]

use storefront_schema::{
    db::{create_orm_conn, run_migrations},
    dto::{
        accounts::{NewAddress, NewUser},
        catalog::NewProduct,
    },
    entity::{addresses, products, products::ProductKind, users},
    services::{account_service, catalog_service},
    state::AppState,
};

/// A fresh in-memory store with every migration applied.
///
/// Set TEST_DATABASE_URL to run against another database instead; it has to
/// be empty, since the tests rely on fixed emails.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let database_url =
        std::env::var("TEST_DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm))
}

pub fn new_user(name: &str, email: &str) -> NewUser {
    NewUser {
        name: name.into(),
        email: email.into(),
        phone: "9876543210".into(),
        password: "correct horse".into(),
        is_staff: false,
    }
}

pub fn new_address(name: &str) -> NewAddress {
    NewAddress {
        name: name.into(),
        phone: "9876543210".into(),
        address1: "12 Lake Road".into(),
        address2: "Flat 4".into(),
        pincode: 560001,
        city: "Bengaluru".into(),
        state: "Karnataka".into(),
        country: "India".into(),
    }
}

pub async fn create_user(
    state: &AppState,
    name: &str,
    email: &str,
) -> anyhow::Result<users::Model> {
    Ok(account_service::create_user(state, new_user(name, email)).await?)
}

pub async fn create_address(state: &AppState, user_id: i32) -> anyhow::Result<addresses::Model> {
    Ok(account_service::add_address(state, user_id, new_address("Home")).await?)
}

pub async fn create_product(
    state: &AppState,
    name: &str,
    price: i32,
) -> anyhow::Result<products::Model> {
    let payload = NewProduct {
        name: name.into(),
        price,
        discount: 0,
        stock: 5,
        kind: ProductKind::Jewellery,
        description: format!("{name} for testing"),
    };
    Ok(catalog_service::create_product(state, payload).await?)
}
