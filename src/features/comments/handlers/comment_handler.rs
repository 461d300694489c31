use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::comments::dtos::{CommentRequestDto, CommentResponseDto};
use crate::features::comments::services::CommentService;
use crate::shared::types::{ApiResponse, DeletedResponseDto, Meta};
use crate::shared::validation::collect_messages;

/// List comments of a ticket
#[utoipa::path(
    get,
    path = "/api/v1/tickets/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Ticket ID")
    ),
    responses(
        (status = 200, description = "Comments, oldest first", body = ApiResponse<Vec<CommentResponseDto>>),
        (status = 404, description = "Ticket not found")
    ),
    security(("bearer_auth" = [])),
    tag = "comments"
)]
pub async fn list_comments(
    _user: AuthenticatedUser,
    State(service): State<Arc<CommentService>>,
    AppPath(ticket_id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<Vec<CommentResponseDto>>>> {
    let comments = service.list(ticket_id).await?;
    let total = comments.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(comments),
        None,
        Some(Meta { total }),
    )))
}

/// Add a comment to a ticket
#[utoipa::path(
    post,
    path = "/api/v1/tickets/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Ticket ID")
    ),
    request_body = CommentRequestDto,
    responses(
        (status = 201, description = "Comment created", body = ApiResponse<CommentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Ticket not found")
    ),
    security(("bearer_auth" = [])),
    tag = "comments"
)]
pub async fn create_comment(
    user: AuthenticatedUser,
    State(service): State<Arc<CommentService>>,
    AppPath(ticket_id): AppPath<Uuid>,
    AppJson(dto): AppJson<CommentRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<CommentResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(collect_messages(&e)))?;

    let comment = service.create(&user, ticket_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(comment), None, None)),
    ))
}

/// Edit a comment (author or admin)
#[utoipa::path(
    put,
    path = "/api/v1/tickets/{id}/comments/{comment_id}",
    params(
        ("id" = Uuid, Path, description = "Ticket ID"),
        ("comment_id" = Uuid, Path, description = "Comment ID")
    ),
    request_body = CommentRequestDto,
    responses(
        (status = 200, description = "Comment updated", body = ApiResponse<CommentResponseDto>),
        (status = 403, description = "Not the author or an admin"),
        (status = 404, description = "Ticket or comment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "comments"
)]
pub async fn update_comment(
    user: AuthenticatedUser,
    State(service): State<Arc<CommentService>>,
    AppPath((ticket_id, comment_id)): AppPath<(Uuid, Uuid)>,
    AppJson(dto): AppJson<CommentRequestDto>,
) -> Result<Json<ApiResponse<CommentResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(collect_messages(&e)))?;

    let comment = service.update(&user, ticket_id, comment_id, dto).await?;
    Ok(Json(ApiResponse::success(Some(comment), None, None)))
}

/// Delete a comment (author or admin)
#[utoipa::path(
    delete,
    path = "/api/v1/tickets/{id}/comments/{comment_id}",
    params(
        ("id" = Uuid, Path, description = "Ticket ID"),
        ("comment_id" = Uuid, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment deleted", body = ApiResponse<DeletedResponseDto>),
        (status = 403, description = "Not the author or an admin"),
        (status = 404, description = "Ticket or comment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "comments"
)]
pub async fn delete_comment(
    user: AuthenticatedUser,
    State(service): State<Arc<CommentService>>,
    AppPath((ticket_id, comment_id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<DeletedResponseDto>>> {
    service.delete(&user, ticket_id, comment_id).await?;
    Ok(Json(ApiResponse::success(
        Some(DeletedResponseDto {
            id: comment_id,
            deleted: true,
        }),
        Some("Comment deleted".to_string()),
        None,
    )))
}
