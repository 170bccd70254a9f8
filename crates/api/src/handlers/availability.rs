//! # Availability Handlers
//!
//! This module exposes the slot-availability query that drives the booking
//! flow: given a professional, a service, and a calendar date, it returns
//! the open booking start times for that date.
//!
//! ## Slot Computation
//!
//! The handler is a thin data-gathering layer around the pure engine in
//! `agendei_core::availability`. It works by:
//!
//! 1. Resolving the professional and service (404 when either is missing,
//!    400 when they belong to different establishments)
//! 2. Fetching the professional's weekly recurring windows
//! 3. Fetching the professional's appointments on the target date
//! 4. Invoking `compute_available_slots` with the current wall-clock time
//! 5. Formatting the resulting start times as `"HH:MM"` strings
//!
//! The engine sees only data for the requested date, so the query cost is
//! bounded by one schedule fetch plus one single-day appointment fetch
//! regardless of how far out the date lies.
//!
//! Missing `service_id` or `date` query parameters mean "nothing selected
//! yet" and produce an empty slot list with a 200 response, never an error.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use std::sync::Arc;

use agendei_core::{
    availability::{compute_available_slots, format_slot},
    errors::BookingError,
    models::appointment::AvailableSlotsResponse,
};
use uuid::Uuid;

use crate::{handlers::convert, middleware::error_handling::AppError, ApiState};

/// Query parameters for the availability endpoint
///
/// Both fields are optional: until the client has picked a service and a
/// date there is simply nothing to compute.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// The service being booked; its duration defines the slot length
    pub service_id: Option<Uuid>,

    /// Target calendar date (ISO `YYYY-MM-DD`)
    pub date: Option<NaiveDate>,
}

/// Returns the bookable start times for one professional, service, and date
///
/// # Endpoint
///
/// ```text
/// GET /api/professionals/{id}/availability?service_id=uuid&date=2026-09-07
/// ```
///
/// # Returns
///
/// `{ "date": ..., "duration_minutes": ..., "slots": ["09:00", "10:00", ...] }`
///
/// Slots are chronological, deduplicated, duration-aligned within the
/// professional's available windows for that day, exclude anything that
/// would overlap an active appointment, and exclude slots that have fully
/// elapsed. An empty `slots` list is the only "no availability" signal.
///
/// # Errors
///
/// * `BookingError::NotFound` - Professional or service does not exist
/// * `BookingError::Validation` - Service belongs to another establishment
/// * `BookingError::Database` - Database error
#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<ApiState>>,
    Path(professional_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailableSlotsResponse>, AppError> {
    // "No selection yet" is an empty result, not an error
    let (Some(service_id), Some(date)) = (query.service_id, query.date) else {
        return Ok(Json(AvailableSlotsResponse {
            date: query.date,
            duration_minutes: None,
            slots: Vec::new(),
        }));
    };

    let professional =
        agendei_db::repositories::professional::get_professional_by_id(&state.db_pool, professional_id)
            .await
            .map_err(BookingError::Database)?
            .ok_or_else(|| {
                BookingError::NotFound(format!(
                    "Professional with ID {} not found",
                    professional_id
                ))
            })?;

    let service = agendei_db::repositories::service::get_service_by_id(&state.db_pool, service_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Service with ID {} not found", service_id)))?;

    if service.establishment_id != professional.establishment_id {
        return Err(AppError(BookingError::Validation(
            "Service and professional belong to different establishments".to_string(),
        )));
    }

    let window_rows = agendei_db::repositories::schedule::get_windows_by_professional_id(
        &state.db_pool,
        professional_id,
    )
    .await
    .map_err(BookingError::Database)?;

    let windows = window_rows
        .iter()
        .map(convert::to_weekly_window)
        .collect::<Result<Vec<_>, _>>()?;

    let appointment_rows = agendei_db::repositories::appointment::list_appointments_on_date(
        &state.db_pool,
        professional_id,
        date,
    )
    .await
    .map_err(BookingError::Database)?;

    let appointments = appointment_rows
        .iter()
        .map(convert::to_appointment)
        .collect::<Result<Vec<_>, _>>()?;

    // Establishment-local wall clock; the engine never sees UTC
    let now = Local::now().naive_local();

    let slots = compute_available_slots(
        date,
        service.duration_minutes,
        &windows,
        &appointments,
        now,
    );

    Ok(Json(AvailableSlotsResponse {
        date: Some(date),
        duration_minutes: Some(service.duration_minutes),
        slots: slots.into_iter().map(format_slot).collect(),
    }))
}
