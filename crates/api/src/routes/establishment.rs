use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/establishments",
            post(handlers::establishment::create_establishment),
        )
        .route(
            "/api/establishments/:id",
            get(handlers::establishment::get_establishment),
        )
}
