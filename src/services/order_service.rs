use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, EntityTrait, IntoActiveModel, ModelTrait, Set, TransactionTrait,
};

use crate::{
    dto::orders::{OrderLine, OrderWithLines},
    entity::{
        Addresses, Orders, Products,
        order_objs::ActiveModel as OrderObjActive,
        orders::{ActiveModel as OrderActive, Model as OrderModel, OrderStatus},
        products::Model as ProductModel,
    },
    error::{StoreError, StoreResult},
    services::cascade::{CascadeDelete, DeleteSummary},
    state::AppState,
    validate::Validate,
};

/// Places an order for `user_id`, shipping to one of their addresses.
///
/// The address is copied onto the order and each product's current price onto
/// its line, so later edits to either leave the order untouched.
pub async fn place_order(
    state: &AppState,
    user_id: i32,
    address_id: i32,
    lines: Vec<OrderLine>,
) -> StoreResult<OrderWithLines> {
    if lines.is_empty() {
        return Err(StoreError::range("lines", "an order needs at least one product"));
    }
    for line in &lines {
        line.validate()?;
    }

    let txn = state.orm.begin().await?;

    let address = Addresses::find_by_id(address_id)
        .one(&txn)
        .await?
        .filter(|a| a.user_id == user_id)
        .ok_or(StoreError::NotFound)?;

    let order = OrderActive {
        id: NotSet,
        user_id: Set(user_id),
        order_timestamp: Set(Utc::now().fixed_offset()),
        status: Set(OrderStatus::Ordered),
        address1: Set(address.address1),
        address2: Set(address.address2),
        city: Set(address.city),
        country: Set(address.country),
        name: Set(address.name),
        phone: Set(address.phone),
        pincode: Set(address.pincode),
        state: Set(address.state),
    }
    .insert(&txn)
    .await?;

    let mut saved = Vec::with_capacity(lines.len());
    for line in &lines {
        let product = Products::find_by_id(line.product_id)
            .one(&txn)
            .await?
            .ok_or(StoreError::NotFound)?;

        let item = OrderObjActive {
            id: NotSet,
            order_id: Set(order.id),
            product_id: Set(product.id),
            qty: Set(line.qty),
            price: Set(product.price),
        }
        .insert(&txn)
        .await?;
        saved.push(item);
    }

    txn.commit().await?;
    tracing::info!(order_id = order.id, user_id, lines = saved.len(), "order placed");

    Ok(OrderWithLines {
        order,
        lines: saved,
    })
}

pub async fn set_status(
    state: &AppState,
    order_id: i32,
    status: OrderStatus,
) -> StoreResult<OrderModel> {
    let order = Orders::find_by_id(order_id)
        .one(&state.orm)
        .await?
        .ok_or(StoreError::NotFound)?;

    let previous = order.status;
    let mut active = order.into_active_model();
    active.status = Set(status);
    let order = active.update(&state.orm).await?;

    tracing::debug!(
        order_id,
        from = previous.label(),
        to = status.label(),
        "order status changed"
    );
    Ok(order)
}

/// The order's products, through order_objs.
pub async fn order_products(state: &AppState, order_id: i32) -> StoreResult<Vec<ProductModel>> {
    let order = Orders::find_by_id(order_id)
        .one(&state.orm)
        .await?
        .ok_or(StoreError::NotFound)?;
    Ok(order.find_related(Products).all(&state.orm).await?)
}

pub async fn delete_order(state: &AppState, id: i32) -> StoreResult<DeleteSummary> {
    Orders::delete_cascade(&state.orm, id).await
}
