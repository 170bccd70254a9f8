use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/services", post(handlers::service::create_service))
        .route("/api/services/:id", get(handlers::service::get_service))
        .route(
            "/api/establishments/:id/services",
            get(handlers::service::list_services),
        )
}
