use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use agendei_core::{
    errors::BookingError,
    models::establishment::{CreateEstablishmentRequest, EstablishmentResponse},
};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_establishment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateEstablishmentRequest>,
) -> Result<Json<EstablishmentResponse>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError(BookingError::Validation(
            "Establishment name cannot be empty".to_string(),
        )));
    }

    let db_establishment = agendei_db::repositories::establishment::create_establishment(
        &state.db_pool,
        &payload.name,
        &payload.timezone,
    )
    .await
    .map_err(BookingError::Database)?;

    Ok(Json(EstablishmentResponse {
        id: db_establishment.id,
        name: db_establishment.name,
        timezone: db_establishment.timezone,
        created_at: db_establishment.created_at,
    }))
}

#[axum::debug_handler]
pub async fn get_establishment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<EstablishmentResponse>, AppError> {
    let db_establishment =
        agendei_db::repositories::establishment::get_establishment_by_id(&state.db_pool, id)
            .await
            .map_err(BookingError::Database)?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Establishment with ID {} not found", id))
            })?;

    Ok(Json(EstablishmentResponse {
        id: db_establishment.id,
        name: db_establishment.name,
        timezone: db_establishment.timezone,
        created_at: db_establishment.created_at,
    }))
}
