//! # Appointment Handlers
//!
//! Booking, listing, and status transitions for appointments.
//!
//! Creation is the one genuinely concurrency-sensitive write in the
//! system: two clients can both see the same open slot and submit it. The
//! slot list a client computed is therefore treated as advisory only, and
//! the write path revalidates everything server-side before the guarded
//! insert in the appointment repository settles the race. Losing that race
//! is a 409, not a server error.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use agendei_core::{
    availability::fits_weekly_windows,
    errors::BookingError,
    models::appointment::{
        AppointmentResponse, CreateAppointmentRequest, UpdateAppointmentStatusRequest,
    },
};
use agendei_db::repositories::appointment::{BookingAttempt, StatusUpdate};
use uuid::Uuid;

use crate::{handlers::convert, middleware::error_handling::AppError, ApiState};

/// Books an appointment via the transactional slot guard
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments
/// { "professional_id": ..., "service_id": ..., "client_name": ...,
///   "scheduled_at": "2026-09-07T10:00:00" }
/// ```
///
/// # Errors
///
/// * `BookingError::NotFound` - Professional or service does not exist
/// * `BookingError::Validation` - Mismatched establishment, empty client
///   name, or a start time outside the professional's available windows
/// * `BookingError::Conflict` - The slot was taken first (HTTP 409)
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    if payload.client_name.trim().is_empty() {
        return Err(AppError(BookingError::Validation(
            "Client name cannot be empty".to_string(),
        )));
    }

    let professional = agendei_db::repositories::professional::get_professional_by_id(
        &state.db_pool,
        payload.professional_id,
    )
    .await
    .map_err(BookingError::Database)?
    .ok_or_else(|| {
        BookingError::NotFound(format!(
            "Professional with ID {} not found",
            payload.professional_id
        ))
    })?;

    let service =
        agendei_db::repositories::service::get_service_by_id(&state.db_pool, payload.service_id)
            .await
            .map_err(BookingError::Database)?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Service with ID {} not found", payload.service_id))
            })?;

    if service.establishment_id != professional.establishment_id {
        return Err(AppError(BookingError::Validation(
            "Service and professional belong to different establishments".to_string(),
        )));
    }

    // The requested interval must lie inside the professional's working hours
    let window_rows = agendei_db::repositories::schedule::get_windows_by_professional_id(
        &state.db_pool,
        payload.professional_id,
    )
    .await
    .map_err(BookingError::Database)?;

    let windows = window_rows
        .iter()
        .map(convert::to_weekly_window)
        .collect::<Result<Vec<_>, _>>()?;

    if !fits_weekly_windows(payload.scheduled_at, service.duration_minutes, &windows) {
        return Err(AppError(BookingError::Validation(
            "Requested time falls outside the professional's available hours".to_string(),
        )));
    }

    let attempt = agendei_db::repositories::appointment::create_appointment(
        &state.db_pool,
        payload.professional_id,
        payload.service_id,
        &payload.client_name,
        payload.scheduled_at,
        service.duration_minutes,
    )
    .await
    .map_err(BookingError::Database)?;

    match attempt {
        BookingAttempt::Booked(row) => Ok(Json(convert::to_appointment_response(&row)?)),
        BookingAttempt::SlotTaken => Err(AppError(BookingError::Conflict(format!(
            "The {} slot was just booked by someone else",
            payload.scheduled_at
        )))),
    }
}

/// Query parameters for listing appointments
#[derive(Debug, Deserialize)]
pub struct ListAppointmentsQuery {
    pub professional_id: Uuid,

    /// Restrict to one local calendar date
    pub date: Option<NaiveDate>,
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListAppointmentsQuery>,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    let rows = match query.date {
        Some(date) => {
            agendei_db::repositories::appointment::list_appointments_on_date(
                &state.db_pool,
                query.professional_id,
                date,
            )
            .await
        }
        None => {
            agendei_db::repositories::appointment::list_appointments_by_professional(
                &state.db_pool,
                query.professional_id,
            )
            .await
        }
    }
    .map_err(BookingError::Database)?;

    let appointments = rows
        .iter()
        .map(convert::to_appointment_response)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(appointments))
}

/// Transitions an appointment to a new status
///
/// Cancelling (or completing, or marking no-show) releases the slot, since
/// only SCHEDULED appointments block availability. Reviving a released
/// appointment back into SCHEDULED re-claims the slot, so it goes through
/// the same overlap guard as a fresh booking and returns 409 when the slot
/// has been taken in the meantime.
#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentStatusRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let outcome = agendei_db::repositories::appointment::update_appointment_status(
        &state.db_pool,
        id,
        payload.status.as_str(),
    )
    .await
    .map_err(BookingError::Database)?
    .ok_or_else(|| BookingError::NotFound(format!("Appointment with ID {} not found", id)))?;

    match outcome {
        StatusUpdate::Applied(row) => Ok(Json(convert::to_appointment_response(&row)?)),
        StatusUpdate::SlotTaken => Err(AppError(BookingError::Conflict(
            "The appointment's slot has since been booked by someone else".to_string(),
        ))),
    }
}
