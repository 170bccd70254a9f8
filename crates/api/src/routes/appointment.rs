use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments",
            post(handlers::appointment::create_appointment),
        )
        .route(
            "/api/appointments",
            get(handlers::appointment::list_appointments),
        )
        .route(
            "/api/appointments/:id/status",
            put(handlers::appointment::update_appointment_status),
        )
}
