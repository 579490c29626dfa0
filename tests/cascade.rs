mod common;

use chrono::{TimeZone, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};
use storefront_schema::{
    dto::{orders::OrderLine, reviews::NewReview},
    entity::{Addresses, Appointments, CartObjs, Likes, OrderObjs, Orders, Photos, Reviews, Users},
    error::StoreError,
    services::{
        account_service, appointment_service, cart_service, catalog_service, order_service,
        review_service,
    },
};

use common::{create_address, create_product, create_user, setup_state};

fn line(product_id: i32, qty: i32) -> OrderLine {
    OrderLine { product_id, qty }
}

fn review(rating: i32) -> NewReview {
    NewReview {
        rating,
        text: None,
    }
}

#[tokio::test]
async fn deleting_a_user_keeps_their_appointments() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "Asha", "asha@example.com").await?;
    let other = create_user(&state, "Ravi", "ravi@example.com").await?;
    let ring = create_product(&state, "Ring", 500).await?;
    let chain = create_product(&state, "Chain", 300).await?;

    let address = create_address(&state, user.id).await?;
    order_service::place_order(
        &state,
        user.id,
        address.id,
        vec![line(ring.id, 1), line(chain.id, 2)],
    )
    .await?;
    cart_service::add_to_cart(&state, user.id, chain.id, 1).await?;
    let own = review_service::add_review(&state, user.id, ring.id, review(5)).await?;
    review_service::like_review(&state, other.id, own.id).await?;
    let theirs = review_service::add_review(&state, other.id, chain.id, review(4)).await?;
    review_service::like_review(&state, user.id, theirs.id).await?;

    let at = Utc.with_ymd_and_hms(2021, 3, 1, 11, 30, 0).unwrap().fixed_offset();
    appointment_service::book_appointment(&state, user.id, at).await?;

    let summary = account_service::delete_user(&state, user.id).await?;
    assert_eq!(summary.get("users"), 1);
    assert_eq!(summary.get("addresses"), 1);
    assert_eq!(summary.get("orders"), 1);
    assert_eq!(summary.get("order_objs"), 2);
    assert_eq!(summary.get("reviews"), 1);
    assert_eq!(summary.get("likes"), 2);
    assert_eq!(summary.get("cart_objs"), 1);
    assert_eq!(summary.get("appointments"), 0);

    assert!(Users::find_by_id(user.id).one(&state.orm).await?.is_none());
    assert_eq!(Addresses::find().count(&state.orm).await?, 0);
    assert_eq!(Orders::find().count(&state.orm).await?, 0);
    assert_eq!(OrderObjs::find().count(&state.orm).await?, 0);
    assert_eq!(CartObjs::find().count(&state.orm).await?, 0);
    assert_eq!(Likes::find().count(&state.orm).await?, 0);

    // Only the other user's review is left.
    let left = Reviews::find().all(&state.orm).await?;
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].id, theirs.id);

    // The appointment survives and still carries the old user id.
    let appointments = appointment_service::appointments_for(&state, user.id).await?;
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].user_id, user.id);
    assert_eq!(appointments[0].timestamp, at);
    assert_eq!(Appointments::find().count(&state.orm).await?, 1);
    Ok(())
}

#[tokio::test]
async fn deleting_a_product_removes_what_refers_to_it() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "Asha", "asha@example.com").await?;
    let fan = create_user(&state, "Ravi", "ravi@example.com").await?;
    let ring = create_product(&state, "Ring", 500).await?;
    let chain = create_product(&state, "Chain", 300).await?;

    catalog_service::add_photo(&state, ring.id, "https://cdn.example.com/ring-1.jpg".into())
        .await?;
    catalog_service::add_photo(&state, ring.id, "https://cdn.example.com/ring-2.jpg".into())
        .await?;
    catalog_service::add_photo(&state, chain.id, "https://cdn.example.com/chain.jpg".into())
        .await?;
    assert_eq!(catalog_service::list_photos(&state, ring.id).await?.len(), 2);
    cart_service::add_to_cart(&state, user.id, ring.id, 1).await?;
    let address = create_address(&state, user.id).await?;
    let placed = order_service::place_order(
        &state,
        user.id,
        address.id,
        vec![line(ring.id, 1), line(chain.id, 1)],
    )
    .await?;
    let saved = review_service::add_review(&state, user.id, ring.id, review(5)).await?;
    review_service::like_review(&state, fan.id, saved.id).await?;

    let summary = catalog_service::delete_product(&state, ring.id).await?;
    assert_eq!(summary.get("products"), 1);
    assert_eq!(summary.get("photos"), 2);
    assert_eq!(summary.get("cart_objs"), 1);
    assert_eq!(summary.get("order_objs"), 1);
    assert_eq!(summary.get("reviews"), 1);
    assert_eq!(summary.get("likes"), 1);
    assert_eq!(summary.total(), 7);

    // The order itself stays, with the line for the other product.
    let order = Orders::find_by_id(placed.order.id).one(&state.orm).await?;
    assert!(order.is_some());
    let products = order_service::order_products(&state, placed.order.id).await?;
    assert_eq!(products.iter().map(|p| p.id).collect::<Vec<_>>(), [chain.id]);
    assert!(catalog_service::list_photos(&state, ring.id).await?.is_empty());
    let photos = catalog_service::list_photos(&state, chain.id).await?;
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].url, "https://cdn.example.com/chain.jpg");
    assert_eq!(Photos::find().count(&state.orm).await?, 1);
    Ok(())
}

#[tokio::test]
async fn deleting_a_review_removes_its_likes() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "Asha", "asha@example.com").await?;
    let fan = create_user(&state, "Ravi", "ravi@example.com").await?;
    let ring = create_product(&state, "Ring", 500).await?;
    let saved = review_service::add_review(&state, user.id, ring.id, review(3)).await?;
    review_service::like_review(&state, fan.id, saved.id).await?;

    let summary = review_service::delete_review(&state, saved.id).await?;
    assert_eq!(summary.get("reviews"), 1);
    assert_eq!(summary.get("likes"), 1);
    assert_eq!(review_service::like_count(&state, saved.id).await?, 0);

    let again = review_service::delete_review(&state, saved.id).await;
    assert!(matches!(again, Err(StoreError::NotFound)));
    Ok(())
}

#[tokio::test]
async fn deleting_a_missing_row_is_not_found() -> anyhow::Result<()> {
    let state = setup_state().await?;
    assert!(matches!(
        account_service::delete_user(&state, 42).await,
        Err(StoreError::NotFound)
    ));
    assert!(matches!(
        catalog_service::delete_product(&state, 42).await,
        Err(StoreError::NotFound)
    ));
    assert!(matches!(
        order_service::delete_order(&state, 42).await,
        Err(StoreError::NotFound)
    ));
    Ok(())
}
