use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::attachments::handlers;
use crate::features::attachments::services::AttachmentService;

/// Create routes for the attachments feature
///
/// Note: This feature requires authentication
pub fn routes(service: Arc<AttachmentService>) -> Router {
    Router::new()
        .route(
            "/api/v1/tickets/{id}/attachments",
            get(handlers::list_attachments).post(handlers::upload_attachment),
        )
        .route(
            "/api/v1/tickets/{id}/attachments/{attachment_id}",
            get(handlers::get_attachment).delete(handlers::delete_attachment),
        )
        .route(
            "/api/v1/tickets/{id}/attachments/{attachment_id}/download",
            get(handlers::download_attachment),
        )
        .with_state(service)
}
