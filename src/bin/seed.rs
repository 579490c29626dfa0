use storefront_schema::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{accounts::NewUser, catalog::NewProduct},
    entity::products::ProductKind,
    error::StoreError,
    services::{account_service, catalog_service},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    config.init_tracing();

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;
    let state = AppState::new(orm);

    let admin = NewUser {
        name: "Store Admin".into(),
        email: "admin@example.com".into(),
        phone: "9000000000".into(),
        password: "admin123".into(),
        is_staff: true,
    };
    match account_service::create_superuser(&state, admin).await {
        Ok(user) => tracing::info!(user_id = user.id, "seeded admin"),
        Err(StoreError::UniqueConstraintViolation(_)) => tracing::info!("admin already present"),
        Err(err) => return Err(err.into()),
    }

    if !catalog_service::list_products(&state, None).await?.is_empty() {
        tracing::info!("products already seeded");
        return Ok(());
    }

    let products = [
        (
            "Silver Anklet",
            ProductKind::Jewellery,
            1_499,
            25,
            "Hand-finished sterling silver",
        ),
        (
            "Pearl Studs",
            ProductKind::Jewellery,
            2_250,
            10,
            "Freshwater pearls on gold posts",
        ),
        (
            "Cotton Kurta",
            ProductKind::Cloth,
            899,
            40,
            "Block-printed cotton, regular fit",
        ),
        (
            "Silk Dupatta",
            ProductKind::Cloth,
            1_799,
            15,
            "Banarasi silk with zari border",
        ),
    ];
    for (name, kind, price, stock, description) in products {
        let product = catalog_service::create_product(
            &state,
            NewProduct {
                name: name.into(),
                price,
                discount: 0,
                stock,
                kind,
                description: description.into(),
            },
        )
        .await?;
        let slug = name.to_lowercase().replace(' ', "-");
        catalog_service::add_photo(&state, product.id, format!("/media/products/{slug}.jpg"))
            .await?;
    }

    tracing::info!("seed completed");
    Ok(())
}
