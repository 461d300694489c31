use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::attachments::{dtos as attachments_dtos, handlers as attachments_handlers};
use crate::features::auth;
use crate::features::comments::{dtos as comments_dtos, handlers as comments_handlers};
use crate::features::dictionaries::{dtos as dictionaries_dtos, handlers as dictionaries_handlers};
use crate::features::tickets::{dtos as tickets_dtos, handlers as tickets_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, DeletedResponseDto, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::get_me,
        // Dictionaries (public)
        dictionaries_handlers::list_departments,
        dictionaries_handlers::list_ticket_statuses,
        dictionaries_handlers::list_ticket_priorities,
        // Users (public)
        users_handlers::list_users,
        // Tickets
        tickets_handlers::list_tickets,
        tickets_handlers::create_ticket,
        tickets_handlers::get_ticket,
        tickets_handlers::update_ticket,
        tickets_handlers::delete_ticket,
        tickets_handlers::list_ticket_history,
        // Comments
        comments_handlers::list_comments,
        comments_handlers::create_comment,
        comments_handlers::update_comment,
        comments_handlers::delete_comment,
        // Attachments
        attachments_handlers::list_attachments,
        attachments_handlers::upload_attachment,
        attachments_handlers::get_attachment,
        attachments_handlers::download_attachment,
        attachments_handlers::delete_attachment,
    ),
    components(
        schemas(
            // Shared
            Meta,
            DeletedResponseDto,
            ApiResponse<DeletedResponseDto>,
            // Auth
            auth::model::Role,
            auth::dtos::RegisterRequestDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::AuthUserDto,
            auth::dtos::MeResponseDto,
            ApiResponse<auth::dtos::AuthResponseDto>,
            ApiResponse<auth::dtos::MeResponseDto>,
            // Dictionaries
            dictionaries_dtos::DepartmentResponseDto,
            dictionaries_dtos::TicketStatusResponseDto,
            dictionaries_dtos::TicketPriorityResponseDto,
            ApiResponse<Vec<dictionaries_dtos::DepartmentResponseDto>>,
            ApiResponse<Vec<dictionaries_dtos::TicketStatusResponseDto>>,
            ApiResponse<Vec<dictionaries_dtos::TicketPriorityResponseDto>>,
            // Users
            users_dtos::UserSummaryDto,
            ApiResponse<Vec<users_dtos::UserSummaryDto>>,
            // Tickets
            tickets_dtos::TicketRequestDto,
            tickets_dtos::TicketResponseDto,
            tickets_dtos::TicketHistoryResponseDto,
            ApiResponse<tickets_dtos::TicketResponseDto>,
            ApiResponse<Vec<tickets_dtos::TicketResponseDto>>,
            ApiResponse<Vec<tickets_dtos::TicketHistoryResponseDto>>,
            // Comments
            comments_dtos::CommentRequestDto,
            comments_dtos::CommentResponseDto,
            ApiResponse<comments_dtos::CommentResponseDto>,
            ApiResponse<Vec<comments_dtos::CommentResponseDto>>,
            // Attachments
            attachments_dtos::UploadAttachmentDto,
            attachments_dtos::AttachmentResponseDto,
            ApiResponse<attachments_dtos::AttachmentResponseDto>,
            ApiResponse<Vec<attachments_dtos::AttachmentResponseDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Login, registration and current user"),
        (name = "dictionaries", description = "Departments, ticket statuses and priorities"),
        (name = "users", description = "User directory"),
        (name = "tickets", description = "Ticket CRUD, search and history"),
        (name = "comments", description = "Ticket comments"),
        (name = "attachments", description = "Ticket attachments"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Helpdesk API",
        version = "0.1.0",
        description = "API documentation for the helpdesk ticket tracker",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
