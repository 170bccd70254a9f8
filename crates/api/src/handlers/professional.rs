use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use agendei_core::{
    errors::BookingError,
    models::professional::{CreateProfessionalRequest, ProfessionalResponse},
};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_professional(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateProfessionalRequest>,
) -> Result<Json<ProfessionalResponse>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError(BookingError::Validation(
            "Professional name cannot be empty".to_string(),
        )));
    }

    // The establishment must exist before a professional can join it
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

    let db_professional = agendei_db::repositories::professional::create_professional(
        &state.db_pool,
        payload.establishment_id,
        &payload.name,
    )
    .await
    .map_err(BookingError::Database)?;

    Ok(Json(ProfessionalResponse {
        id: db_professional.id,
        establishment_id: db_professional.establishment_id,
        name: db_professional.name,
        created_at: db_professional.created_at,
    }))
}

#[axum::debug_handler]
pub async fn get_professional(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfessionalResponse>, AppError> {
    let db_professional =
        agendei_db::repositories::professional::get_professional_by_id(&state.db_pool, id)
            .await
            .map_err(BookingError::Database)?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Professional with ID {} not found", id))
            })?;

    Ok(Json(ProfessionalResponse {
        id: db_professional.id,
        establishment_id: db_professional.establishment_id,
        name: db_professional.name,
        created_at: db_professional.created_at,
    }))
}

#[axum::debug_handler]
pub async fn list_professionals(
    State(state): State<Arc<ApiState>>,
    Path(establishment_id): Path<Uuid>,
) -> Result<Json<Vec<ProfessionalResponse>>, AppError> {
    let professionals = agendei_db::repositories::professional::list_professionals_by_establishment(
        &state.db_pool,
        establishment_id,
    )
    .await
    .map_err(BookingError::Database)?;

    Ok(Json(
        professionals
            .into_iter()
            .map(|p| ProfessionalResponse {
                id: p.id,
                establishment_id: p.establishment_id,
                name: p.name,
                created_at: p.created_at,
            })
            .collect(),
    ))
}
