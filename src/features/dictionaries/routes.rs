use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::dictionaries::handlers;
use crate::features::dictionaries::services::DictionaryService;

/// Create routes for the dictionaries feature (public)
pub fn routes(service: Arc<DictionaryService>) -> Router {
    Router::new()
        .route("/api/v1/departments", get(handlers::list_departments))
        .route("/api/v1/ticket_statuses", get(handlers::list_ticket_statuses))
        .route(
            "/api/v1/ticket_priorities",
            get(handlers::list_ticket_priorities),
        )
        .with_state(service)
}
