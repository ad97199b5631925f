use axum::{Router, routing::post};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/appointments",
        post(handlers::appointments::submit_appointment)
            .options(handlers::appointments::preflight)
            .fallback(handlers::appointments::method_not_allowed),
    )
}
