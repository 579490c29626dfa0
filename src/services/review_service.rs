use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::{
    dto::reviews::NewReview,
    entity::{
        Likes, Products, Reviews, Users,
        likes::{ActiveModel as LikeActive, Column as LikeCol, Model as LikeModel},
        reviews::{ActiveModel as ReviewActive, Model as ReviewModel},
    },
    error::{StoreError, StoreResult},
    services::cascade::{CascadeDelete, DeleteSummary},
    state::AppState,
    validate::Validate,
};

/// One review per user and product; a second one is a unique violation.
pub async fn add_review(
    state: &AppState,
    user_id: i32,
    product_id: i32,
    payload: NewReview,
) -> StoreResult<ReviewModel> {
    payload.validate()?;
    Users::find_by_id(user_id)
        .one(&state.orm)
        .await?
        .ok_or(StoreError::NotFound)?;
    Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .ok_or(StoreError::NotFound)?;

    let review = ReviewActive {
        id: NotSet,
        user_id: Set(user_id),
        product_id: Set(product_id),
        rating: Set(payload.rating),
        text: Set(payload.text),
        created_on: Set(Utc::now().date_naive()),
    }
    .insert(&state.orm)
    .await?;
    Ok(review)
}

pub async fn like_review(state: &AppState, user_id: i32, review_id: i32) -> StoreResult<LikeModel> {
    Users::find_by_id(user_id)
        .one(&state.orm)
        .await?
        .ok_or(StoreError::NotFound)?;
    Reviews::find_by_id(review_id)
        .one(&state.orm)
        .await?
        .ok_or(StoreError::NotFound)?;

    let like = LikeActive {
        id: NotSet,
        user_id: Set(user_id),
        review_id: Set(review_id),
    }
    .insert(&state.orm)
    .await?;
    Ok(like)
}

pub async fn like_count(state: &AppState, review_id: i32) -> StoreResult<u64> {
    Ok(Likes::find()
        .filter(LikeCol::ReviewId.eq(review_id))
        .count(&state.orm)
        .await?)
}

pub async fn delete_review(state: &AppState, id: i32) -> StoreResult<DeleteSummary> {
    Reviews::delete_cascade(&state.orm, id).await
}
