use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::comments::handlers;
use crate::features::comments::services::CommentService;

/// Create routes for the comments feature
///
/// Note: This feature requires authentication
pub fn routes(service: Arc<CommentService>) -> Router {
    Router::new()
        .route(
            "/api/v1/tickets/{id}/comments",
            get(handlers::list_comments).post(handlers::create_comment),
        )
        .route(
            "/api/v1/tickets/{id}/comments/{comment_id}",
            put(handlers::update_comment).delete(handlers::delete_comment),
        )
        .with_state(service)
}
