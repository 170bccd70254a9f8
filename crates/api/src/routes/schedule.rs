use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/professionals/:id/schedules",
            get(handlers::schedule::get_weekly_schedule),
        )
        .route(
            "/api/professionals/:id/schedules",
            put(handlers::schedule::update_weekly_schedule),
        )
}
