use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppPath;
use crate::features::attachments::dtos::{
    AttachmentResponseDto, AttachmentUpload, UploadAttachmentDto, DEFAULT_FILENAME,
};
use crate::features::attachments::services::AttachmentService;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::types::{ApiResponse, DeletedResponseDto, Meta};

/// List attachments of a ticket
#[utoipa::path(
    get,
    path = "/api/v1/tickets/{id}/attachments",
    params(
        ("id" = Uuid, Path, description = "Ticket ID")
    ),
    responses(
        (status = 200, description = "Attachment metadata, oldest first", body = ApiResponse<Vec<AttachmentResponseDto>>),
        (status = 404, description = "Ticket not found")
    ),
    security(("bearer_auth" = [])),
    tag = "attachments"
)]
pub async fn list_attachments(
    _user: AuthenticatedUser,
    State(service): State<Arc<AttachmentService>>,
    AppPath(ticket_id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<Vec<AttachmentResponseDto>>>> {
    let attachments = service.list(ticket_id).await?;
    let total = attachments.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(attachments),
        None,
        Some(Meta { total }),
    )))
}

/// Upload an attachment
///
/// Accepts multipart/form-data with a single `file` part.
#[utoipa::path(
    post,
    path = "/api/v1/tickets/{id}/attachments",
    params(
        ("id" = Uuid, Path, description = "Ticket ID")
    ),
    request_body(
        content = UploadAttachmentDto,
        content_type = "multipart/form-data",
        description = "File to attach",
    ),
    responses(
        (status = 201, description = "Attachment stored", body = ApiResponse<AttachmentResponseDto>),
        (status = 400, description = "Missing, empty or oversized file"),
        (status = 404, description = "Ticket not found")
    ),
    security(("bearer_auth" = [])),
    tag = "attachments"
)]
pub async fn upload_attachment(
    user: AuthenticatedUser,
    State(service): State<Arc<AttachmentService>>,
    AppPath(ticket_id): AppPath<Uuid>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<AttachmentResponseDto>>)> {
    let mut upload: Option<AttachmentUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name != "file" {
            debug!("Ignoring unknown field: {}", field_name);
            continue;
        }

        let content_type = field.content_type().map(|s| s.to_string());
        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());

        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read file bytes: {}", e);
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;

        upload = Some(AttachmentUpload {
            filename,
            content_type,
            data: data.to_vec(),
        });
    }

    let upload = upload.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    let attachment = service.upload(&user, ticket_id, upload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(attachment), None, None)),
    ))
}

/// Get attachment metadata
#[utoipa::path(
    get,
    path = "/api/v1/tickets/{id}/attachments/{attachment_id}",
    params(
        ("id" = Uuid, Path, description = "Ticket ID"),
        ("attachment_id" = Uuid, Path, description = "Attachment ID")
    ),
    responses(
        (status = 200, description = "Attachment metadata", body = ApiResponse<AttachmentResponseDto>),
        (status = 404, description = "Ticket or attachment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "attachments"
)]
pub async fn get_attachment(
    _user: AuthenticatedUser,
    State(service): State<Arc<AttachmentService>>,
    AppPath((ticket_id, attachment_id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<AttachmentResponseDto>>> {
    let attachment = service.get(ticket_id, attachment_id).await?;
    Ok(Json(ApiResponse::success(Some(attachment), None, None)))
}

/// Download attachment bytes
#[utoipa::path(
    get,
    path = "/api/v1/tickets/{id}/attachments/{attachment_id}/download",
    params(
        ("id" = Uuid, Path, description = "Ticket ID"),
        ("attachment_id" = Uuid, Path, description = "Attachment ID")
    ),
    responses(
        (status = 200, description = "Raw file content", content_type = "application/octet-stream", body = Vec<u8>),
        (status = 404, description = "Ticket or attachment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "attachments"
)]
pub async fn download_attachment(
    _user: AuthenticatedUser,
    State(service): State<Arc<AttachmentService>>,
    AppPath((ticket_id, attachment_id)): AppPath<(Uuid, Uuid)>,
) -> Result<Response> {
    let content = service.download(ticket_id, attachment_id).await?;

    let disposition = format!("attachment; filename=\"{}\"", content.filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        content.file_data,
    )
        .into_response())
}

/// Delete an attachment (uploader or admin)
#[utoipa::path(
    delete,
    path = "/api/v1/tickets/{id}/attachments/{attachment_id}",
    params(
        ("id" = Uuid, Path, description = "Ticket ID"),
        ("attachment_id" = Uuid, Path, description = "Attachment ID")
    ),
    responses(
        (status = 200, description = "Attachment deleted", body = ApiResponse<DeletedResponseDto>),
        (status = 403, description = "Not the uploader or an admin"),
        (status = 404, description = "Ticket or attachment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "attachments"
)]
pub async fn delete_attachment(
    user: AuthenticatedUser,
    State(service): State<Arc<AttachmentService>>,
    AppPath((ticket_id, attachment_id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<DeletedResponseDto>>> {
    service.delete(&user, ticket_id, attachment_id).await?;
    Ok(Json(ApiResponse::success(
        Some(DeletedResponseDto {
            id: attachment_id,
            deleted: true,
        }),
        Some("Attachment deleted".to_string()),
        None,
    )))
}
