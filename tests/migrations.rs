use std::collections::BTreeSet;

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, IdenStatic, Iterable, Set};
use storefront_schema::{
    db::{create_orm_conn, migration_status, run_migrations},
    entity::{
        Addresses, Appointments, CartObjs, Likes, OrderObjs, Orders, Photos, Products, Reviews,
        Users, order_objs, orders, orders::OrderStatus,
    },
    error::StoreError,
    migration::{self, final_schema},
};

const INITIAL: &str = "m0001_initial";
const SNAPSHOT: &str = "m0014_order_address_snapshot";

fn entity_columns<E: EntityTrait>() -> (String, BTreeSet<String>) {
    let table = E::default().as_str().to_string();
    let columns = E::Column::iter().map(|c| c.as_str().to_string()).collect();
    (table, columns)
}

#[test]
fn entities_match_the_migrated_schema() -> anyhow::Result<()> {
    let schema = final_schema()?;
    let entities = [
        entity_columns::<Products>(),
        entity_columns::<Photos>(),
        entity_columns::<Users>(),
        entity_columns::<Addresses>(),
        entity_columns::<CartObjs>(),
        entity_columns::<Orders>(),
        entity_columns::<OrderObjs>(),
        entity_columns::<Reviews>(),
        entity_columns::<Likes>(),
        entity_columns::<Appointments>(),
    ];
    assert_eq!(schema.entities().count(), entities.len());

    for (table, columns) in entities {
        let def = schema
            .entity(&table)
            .unwrap_or_else(|| panic!("no table {table} in schema"));
        let declared: BTreeSet<String> =
            def.column_names().into_iter().map(str::to_string).collect();
        assert_eq!(declared, columns, "columns of {table}");
    }
    Ok(())
}

#[tokio::test]
async fn migrations_apply_once_and_in_order() -> anyhow::Result<()> {
    let orm = create_orm_conn("sqlite::memory:").await?;

    let err = migration::apply(&orm, SNAPSHOT).await.unwrap_err();
    assert!(matches!(err, StoreError::SchemaConflict(_)), "{err}");

    migration::apply(&orm, INITIAL).await?;
    let err = migration::apply(&orm, INITIAL).await.unwrap_err();
    assert!(matches!(err, StoreError::SchemaConflict(_)), "{err}");

    let err = migration::apply(&orm, "m0002_missing").await.unwrap_err();
    assert!(matches!(err, StoreError::SchemaConflict(_)), "{err}");

    migration::apply(&orm, SNAPSHOT).await?;
    let err = migration::apply(&orm, SNAPSHOT).await.unwrap_err();
    assert!(matches!(err, StoreError::SchemaConflict(_)), "{err}");

    let status = migration_status(&orm).await?;
    assert!(status.iter().all(|(_, applied)| *applied));

    // Nothing left to do.
    run_migrations(&orm).await?;
    Ok(())
}

#[tokio::test]
async fn snapshot_migration_backfills_then_requires_values() -> anyhow::Result<()> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    migration::apply(&orm, INITIAL).await?;

    for stmt in [
        "INSERT INTO users (password, name, email, phone) \
         VALUES ('x', 'Asha', 'asha@example.com', '1234567890')",
        "INSERT INTO products (name, price, kind, description) \
         VALUES ('Ring', 500, 'Jewellery', 'Plain gold band')",
        "INSERT INTO orders (user_id, order_timestamp) \
         VALUES (1, '2021-01-05T10:00:00+00:00')",
        "INSERT INTO order_objs (order_id, product_id, qty) VALUES (1, 1, 2)",
        "INSERT INTO addresses (user_id, name, address1, address2, pincode, city, state, country) \
         VALUES (1, 'Home', 'A', 'B', 560001, 'Bengaluru', 'Karnataka', 'India')",
    ] {
        orm.execute_unprepared(stmt).await?;
    }

    migration::apply(&orm, SNAPSHOT).await?;

    let order = Orders::find_by_id(1).one(&orm).await?.expect("order survives");
    assert_eq!(order.status, OrderStatus::Ordered);
    assert_eq!(order.name, "0");
    assert_eq!(order.phone, "0");
    assert_eq!(order.address1, "0");
    assert_eq!(order.city, "0");
    assert_eq!(order.pincode, 0);

    // Backfilled rows stay writable as long as the snapshot is left alone.
    let mut active: orders::ActiveModel = order.into();
    active.status = Set(OrderStatus::OutForDelivery);
    let order = active.update(&orm).await?;
    assert_eq!(order.status, OrderStatus::OutForDelivery);
    assert_eq!(order.pincode, 0);

    let line = OrderObjs::find_by_id(1).one(&orm).await?.expect("line survives");
    assert_eq!(line.price, 0);
    assert_eq!(line.qty, 2);

    let address = Addresses::find_by_id(1).one(&orm).await?.expect("address survives");
    assert_eq!(address.phone, "0");
    assert_eq!(address.name, "Home");

    // The defaults are gone: new rows have to name every snapshot column.
    let err = orm
        .execute_unprepared(
            "INSERT INTO orders (user_id, order_timestamp) \
             VALUES (1, '2021-01-08T10:00:00+00:00')",
        )
        .await
        .unwrap_err();
    assert!(
        matches!(StoreError::from(err), StoreError::NotNullViolation(_)),
        "insert without snapshot columns must fail"
    );

    let err = orm
        .execute_unprepared("INSERT INTO order_objs (order_id, product_id) VALUES (1, 1)")
        .await
        .unwrap_err();
    assert!(matches!(StoreError::from(err), StoreError::NotNullViolation(_)));
    Ok(())
}

#[tokio::test]
async fn rebuilt_tables_keep_their_constraints() -> anyhow::Result<()> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    run_migrations(&orm).await?;

    orm.execute_unprepared(
        "INSERT INTO users (password, name, email, phone) \
         VALUES ('x', 'Asha', 'asha@example.com', '1234567890')",
    )
    .await?;
    orm.execute_unprepared(
        "INSERT INTO products (name, price, kind, description) \
         VALUES ('Ring', 500, 'Jewellery', 'Plain gold band')",
    )
    .await?;
    let insert_order = "INSERT INTO orders \
        (user_id, order_timestamp, address1, address2, city, country, name, phone, pincode, state) \
        VALUES (1, '2021-01-08T10:00:00+00:00', 'A', 'B', 'C', 'D', 'E', '1234567890', 560001, 'F')";
    orm.execute_unprepared(insert_order).await?;

    let line = "INSERT INTO order_objs (order_id, product_id, qty, price) VALUES (1, 1, 1, 500)";
    orm.execute_unprepared(line).await?;
    let err = orm.execute_unprepared(line).await.unwrap_err();
    assert!(matches!(
        StoreError::from(err),
        StoreError::UniqueConstraintViolation(_)
    ));

    // orders was rebuilt; order_objs must still cascade from it.
    orm.execute_unprepared("DELETE FROM orders WHERE id = 1").await?;
    let remaining = order_objs::Entity::find().all(&orm).await?;
    assert!(remaining.is_empty());
    Ok(())
}
