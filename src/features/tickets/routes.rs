use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::tickets::handlers;
use crate::features::tickets::services::TicketService;

/// Create routes for the tickets feature
///
/// Note: This feature requires authentication
pub fn routes(service: Arc<TicketService>) -> Router {
    Router::new()
        .route(
            "/api/v1/tickets",
            get(handlers::list_tickets).post(handlers::create_ticket),
        )
        .route(
            "/api/v1/tickets/{id}",
            get(handlers::get_ticket)
                .put(handlers::update_ticket)
                .delete(handlers::delete_ticket),
        )
        .route(
            "/api/v1/tickets/{id}/history",
            get(handlers::list_ticket_history),
        )
        .with_state(service)
}
