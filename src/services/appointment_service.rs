use sea_orm::ActiveValue::NotSet;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    entity::{
        Appointments, Users,
        appointments::{
            ActiveModel as AppointmentActive, Column as AppointmentCol, Model as AppointmentModel,
        },
    },
    error::{StoreError, StoreResult},
    state::AppState,
};

pub async fn book_appointment(
    state: &AppState,
    user_id: i32,
    timestamp: DateTimeWithTimeZone,
) -> StoreResult<AppointmentModel> {
    Users::find_by_id(user_id)
        .one(&state.orm)
        .await?
        .ok_or(StoreError::NotFound)?;

    let appointment = AppointmentActive {
        id: NotSet,
        timestamp: Set(timestamp),
        user_id: Set(user_id),
    }
    .insert(&state.orm)
    .await?;
    Ok(appointment)
}

/// Appointments booked under `user_id`, including ones whose user is gone.
pub async fn appointments_for(
    state: &AppState,
    user_id: i32,
) -> StoreResult<Vec<AppointmentModel>> {
    Ok(Appointments::find()
        .filter(AppointmentCol::UserId.eq(user_id))
        .order_by_asc(AppointmentCol::Timestamp)
        .all(&state.orm)
        .await?)
}
