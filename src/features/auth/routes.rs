use crate::core::middleware::optional_auth_middleware;
use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use crate::features::auth::JwtValidator;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Public auth routes (no authentication required).
/// Register still reads a bearer token when one is sent, so admins can grant roles.
pub fn public_routes(service: Arc<AuthService>, validator: Arc<JwtValidator>) -> Router {
    let register = Router::new()
        .route("/api/v1/auth/register", post(handlers::register))
        .route_layer(from_fn_with_state(validator, optional_auth_middleware));

    Router::new()
        .merge(register)
        .route("/api/v1/auth/login", post(handlers::login))
        .with_state(service)
}

/// Protected auth routes (require JWT authentication)
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/v1/auth/me", get(handlers::get_me))
        .with_state(service)
}
