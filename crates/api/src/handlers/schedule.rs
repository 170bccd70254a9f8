use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use agendei_core::{
    errors::BookingError,
    models::schedule::{UpdateWeeklyScheduleRequest, WeeklyScheduleResponse},
};
use agendei_db::repositories::schedule::NewScheduleWindow;
use uuid::Uuid;

use crate::{handlers::convert, middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn get_weekly_schedule(
    State(state): State<Arc<ApiState>>,
    Path(professional_id): Path<Uuid>,
) -> Result<Json<WeeklyScheduleResponse>, AppError> {
    agendei_db::repositories::professional::get_professional_by_id(&state.db_pool, professional_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| {
            BookingError::NotFound(format!(
                "Professional with ID {} not found",
                professional_id
            ))
        })?;

    let rows = agendei_db::repositories::schedule::get_windows_by_professional_id(
        &state.db_pool,
        professional_id,
    )
    .await
    .map_err(BookingError::Database)?;

    let windows = rows
        .iter()
        .map(convert::to_weekly_window)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(WeeklyScheduleResponse {
        professional_id,
        windows,
    }))
}

/// Replaces a professional's entire weekly schedule.
///
/// Validation happens here, at the write boundary: window times must be
/// well-formed `"HH:MM"` values (enforced by deserialization), each window
/// must start before it ends, and windows on the same day must not overlap.
/// The availability engine assumes these invariants and does not re-check
/// them.
#[axum::debug_handler]
pub async fn update_weekly_schedule(
    State(state): State<Arc<ApiState>>,
    Path(professional_id): Path<Uuid>,
    Json(payload): Json<UpdateWeeklyScheduleRequest>,
) -> Result<Json<WeeklyScheduleResponse>, AppError> {
    agendei_db::repositories::professional::get_professional_by_id(&state.db_pool, professional_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| {
            BookingError::NotFound(format!(
                "Professional with ID {} not found",
                professional_id
            ))
        })?;

    payload.validate()?;

    let new_windows: Vec<NewScheduleWindow> = payload
        .windows
        .iter()
        .map(|w| NewScheduleWindow {
            day_of_week: w.day_of_week.index(),
            start_time: w.start_time,
            end_time: w.end_time,
            is_available: w.is_available,
        })
        .collect();

    let rows = agendei_db::repositories::schedule::replace_weekly_windows(
        &state.db_pool,
        professional_id,
        &new_windows,
    )
    .await
    .map_err(BookingError::Database)?;

    let windows = rows
        .iter()
        .map(convert::to_weekly_window)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(WeeklyScheduleResponse {
        professional_id,
        windows,
    }))
}
