use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    entity::{
        CartObjs, Products, Users,
        cart_objs::{ActiveModel as CartActive, Column as CartCol, Model as CartModel},
        products::Model as ProductModel,
    },
    error::{StoreError, StoreResult},
    state::AppState,
    validate,
};

pub async fn add_to_cart(
    state: &AppState,
    user_id: i32,
    product_id: i32,
    qty: i32,
) -> StoreResult<CartModel> {
    validate::in_range("qty", qty.into(), 1, i32::MAX.into())?;
    Users::find_by_id(user_id)
        .one(&state.orm)
        .await?
        .ok_or(StoreError::NotFound)?;
    Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .ok_or(StoreError::NotFound)?;

    let item = CartActive {
        id: NotSet,
        user_id: Set(user_id),
        product_id: Set(product_id),
        qty: Set(qty),
    }
    .insert(&state.orm)
    .await?;
    Ok(item)
}

/// Cart entries of a user with their products, oldest first.
pub async fn list_cart(
    state: &AppState,
    user_id: i32,
) -> StoreResult<Vec<(CartModel, ProductModel)>> {
    let rows = CartObjs::find()
        .filter(CartCol::UserId.eq(user_id))
        .order_by_asc(CartCol::Id)
        .find_also_related(Products)
        .all(&state.orm)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(item, product)| product.map(|product| (item, product)))
        .collect())
}

/// Products in the cart, reached through the users to products relation.
pub async fn cart_products(state: &AppState, user_id: i32) -> StoreResult<Vec<ProductModel>> {
    let user = Users::find_by_id(user_id)
        .one(&state.orm)
        .await?
        .ok_or(StoreError::NotFound)?;
    Ok(user.find_related(Products).all(&state.orm).await?)
}
