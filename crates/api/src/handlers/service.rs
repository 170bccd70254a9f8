use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use agendei_core::{
    errors::BookingError,
    models::service::{CreateServiceRequest, ServiceResponse},
};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<Json<ServiceResponse>, AppError> {
    payload.validate()?;

    agendei_db::repositories::establishment::get_establishment_by_id(
        &state.db_pool,
        payload.establishment_id,
    )
    .await
    .map_err(BookingError::Database)?
    .ok_or_else(|| {
        BookingError::NotFound(format!(
            "Establishment with ID {} not found",
            payload.establishment_id
        ))
    })?;

    let db_service = agendei_db::repositories::service::create_service(
        &state.db_pool,
        payload.establishment_id,
        &payload.name,
        payload.duration_minutes,
        payload.price_cents,
    )
    .await
    .map_err(BookingError::Database)?;

    Ok(Json(ServiceResponse {
        id: db_service.id,
        establishment_id: db_service.establishment_id,
        name: db_service.name,
        duration_minutes: db_service.duration_minutes,
        price_cents: db_service.price_cents,
        created_at: db_service.created_at,
    }))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceResponse>, AppError> {
    let db_service = agendei_db::repositories::service::get_service_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Service with ID {} not found", id)))?;

    Ok(Json(ServiceResponse {
        id: db_service.id,
        establishment_id: db_service.establishment_id,
        name: db_service.name,
        duration_minutes: db_service.duration_minutes,
        price_cents: db_service.price_cents,
        created_at: db_service.created_at,
    }))
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
    Path(establishment_id): Path<Uuid>,
) -> Result<Json<Vec<ServiceResponse>>, AppError> {
    let services = agendei_db::repositories::service::list_services_by_establishment(
        &state.db_pool,
        establishment_id,
    )
    .await
    .map_err(BookingError::Database)?;

    Ok(Json(
        services
            .into_iter()
            .map(|s| ServiceResponse {
                id: s.id,
                establishment_id: s.establishment_id,
                name: s.name,
                duration_minutes: s.duration_minutes,
                price_cents: s.price_cents,
                created_at: s.created_at,
            })
            .collect(),
    ))
}
