use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use sqlx::PgPool;

use crate::core::config::{AttachmentConfig, AuthConfig};
use crate::core::middleware;
use crate::features::attachments::{
    routes as attachments_routes, AttachmentRepository, AttachmentService, PgAttachmentRepository,
};
use crate::features::auth::routes as auth_routes;
use crate::features::auth::services::{AuthService, TokenService};
use crate::features::auth::JwtValidator;
use crate::features::comments::{
    routes as comments_routes, CommentRepository, CommentService, PgCommentRepository,
};
use crate::features::dictionaries::{
    routes as dictionaries_routes, DictionaryRepository, DictionaryService, PgDictionaryRepository,
};
use crate::features::tickets::{
    routes as tickets_routes, PgTicketHistoryRepository, PgTicketRepository,
    TicketHistoryRepository, TicketRepository, TicketService,
};
use crate::features::users::{
    routes as users_routes, PgUserRepository, UserRepository, UserService,
};

/// Storage backends used by the services
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub dictionaries: Arc<dyn DictionaryRepository>,
    pub tickets: Arc<dyn TicketRepository>,
    pub history: Arc<dyn TicketHistoryRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub attachments: Arc<dyn AttachmentRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            dictionaries: Arc::new(PgDictionaryRepository::new(pool.clone())),
            tickets: Arc::new(PgTicketRepository::new(pool.clone())),
            history: Arc::new(PgTicketHistoryRepository::new(pool.clone())),
            comments: Arc::new(PgCommentRepository::new(pool.clone())),
            attachments: Arc::new(PgAttachmentRepository::new(pool)),
        }
    }
}

pub struct AppServices {
    pub jwt_validator: Arc<JwtValidator>,
    pub auth: Arc<AuthService>,
    pub dictionaries: Arc<DictionaryService>,
    pub users: Arc<UserService>,
    pub tickets: Arc<TicketService>,
    pub comments: Arc<CommentService>,
    pub attachments: Arc<AttachmentService>,
}

impl AppServices {
    pub fn new(repos: Repositories, auth: &AuthConfig, attachments: &AttachmentConfig) -> Self {
        let jwt_validator = Arc::new(JwtValidator::new(&auth.jwt_secret, auth.jwt_leeway));
        let token_service = Arc::new(TokenService::new(auth));

        let dictionaries = Arc::new(DictionaryService::new(repos.dictionaries.clone()));
        let auth_service = Arc::new(AuthService::new(
            repos.users.clone(),
            Arc::clone(&dictionaries),
            token_service,
        ));
        let users = Arc::new(UserService::new(repos.users.clone()));
        let tickets = Arc::new(TicketService::new(
            repos.tickets.clone(),
            repos.history.clone(),
            repos.users.clone(),
            Arc::clone(&dictionaries),
        ));
        let comments = Arc::new(CommentService::new(
            repos.comments.clone(),
            repos.tickets.clone(),
        ));
        let attachment_service = Arc::new(AttachmentService::new(
            repos.attachments.clone(),
            repos.tickets.clone(),
            attachments.max_size,
        ));

        Self {
            jwt_validator,
            auth: auth_service,
            dictionaries,
            users,
            tickets,
            comments,
            attachments: attachment_service,
        }
    }
}

async fn health_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

/// All API routes: public ones plus the bearer-protected ones
pub fn api_router(services: &AppServices, max_body_size: usize) -> Router {
    // Protected routes (require JWT authentication)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(Arc::clone(&services.auth)))
        .merge(tickets_routes::routes(Arc::clone(&services.tickets)))
        .merge(comments_routes::routes(Arc::clone(&services.comments)))
        .merge(attachments_routes::routes(Arc::clone(&services.attachments)))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&services.jwt_validator),
            middleware::auth_middleware,
        ));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(auth_routes::public_routes(
            Arc::clone(&services.auth),
            Arc::clone(&services.jwt_validator),
        ))
        .merge(dictionaries_routes::routes(Arc::clone(&services.dictionaries)))
        .merge(users_routes::routes(Arc::clone(&services.users)))
        .route("/health", get(health_check));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(DefaultBodyLimit::max(max_body_size))
}
