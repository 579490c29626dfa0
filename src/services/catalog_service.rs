use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    dto::catalog::NewProduct,
    entity::{
        Photos, Products,
        photos::{ActiveModel as PhotoActive, Column as PhotoCol, Model as PhotoModel},
        products::{
            ActiveModel as ProductActive, Column as ProductCol, Model as ProductModel, ProductKind,
        },
    },
    error::{StoreError, StoreResult},
    services::cascade::{CascadeDelete, DeleteSummary},
    state::AppState,
    validate::{self, NAME_MAX_LEN, Validate},
};

pub async fn create_product(state: &AppState, payload: NewProduct) -> StoreResult<ProductModel> {
    payload.validate()?;
    let product = ProductActive {
        id: NotSet,
        name: Set(payload.name),
        price: Set(payload.price),
        discount: Set(payload.discount),
        stock: Set(payload.stock),
        kind: Set(payload.kind),
        description: Set(payload.description),
    }
    .insert(&state.orm)
    .await?;

    tracing::debug!(product_id = product.id, "product created");
    Ok(product)
}

pub async fn list_products(
    state: &AppState,
    kind: Option<ProductKind>,
) -> StoreResult<Vec<ProductModel>> {
    let mut finder = Products::find().order_by_asc(ProductCol::Id);
    if let Some(kind) = kind {
        finder = finder.filter(ProductCol::Kind.eq(kind));
    }
    Ok(finder.all(&state.orm).await?)
}

pub async fn add_photo(state: &AppState, product_id: i32, url: String) -> StoreResult<PhotoModel> {
    validate::max_len("url", &url, NAME_MAX_LEN)?;
    Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .ok_or(StoreError::NotFound)?;

    let photo = PhotoActive {
        id: NotSet,
        product_id: Set(product_id),
        url: Set(url),
    }
    .insert(&state.orm)
    .await?;
    Ok(photo)
}

pub async fn list_photos(state: &AppState, product_id: i32) -> StoreResult<Vec<PhotoModel>> {
    Ok(Photos::find()
        .filter(PhotoCol::ProductId.eq(product_id))
        .order_by_asc(PhotoCol::Id)
        .all(&state.orm)
        .await?)
}

/// Removes the product together with its photos, reviews, cart entries and
/// order lines.
pub async fn delete_product(state: &AppState, id: i32) -> StoreResult<DeleteSummary> {
    Products::delete_cascade(&state.orm, id).await
}
