use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::tickets::dtos::{
    TicketHistoryResponseDto, TicketQueryParams, TicketRequestDto, TicketResponseDto,
};
use crate::features::tickets::services::TicketService;
use crate::shared::types::{ApiResponse, DeletedResponseDto, Meta};
use crate::shared::validation::collect_messages;

/// Search tickets
#[utoipa::path(
    get,
    path = "/api/v1/tickets",
    params(TicketQueryParams),
    responses(
        (status = 200, description = "Matching tickets, newest first", body = ApiResponse<Vec<TicketResponseDto>>),
        (status = 400, description = "Malformed filter value"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "tickets"
)]
pub async fn list_tickets(
    _user: AuthenticatedUser,
    State(service): State<Arc<TicketService>>,
    AppQuery(params): AppQuery<TicketQueryParams>,
) -> Result<Json<ApiResponse<Vec<TicketResponseDto>>>> {
    let (tickets, total) = service.search(params).await?;
    Ok(Json(ApiResponse::success(
        Some(tickets),
        None,
        Some(Meta { total }),
    )))
}

/// Create a ticket
#[utoipa::path(
    post,
    path = "/api/v1/tickets",
    request_body = TicketRequestDto,
    responses(
        (status = 201, description = "Ticket created", body = ApiResponse<TicketResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "tickets"
)]
pub async fn create_ticket(
    user: AuthenticatedUser,
    State(service): State<Arc<TicketService>>,
    AppJson(dto): AppJson<TicketRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<TicketResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(collect_messages(&e)))?;

    let ticket = service.create(&user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(ticket),
            Some("Ticket created".to_string()),
            None,
        )),
    ))
}

/// Get ticket by ID
#[utoipa::path(
    get,
    path = "/api/v1/tickets/{id}",
    params(
        ("id" = Uuid, Path, description = "Ticket ID")
    ),
    responses(
        (status = 200, description = "Ticket found", body = ApiResponse<TicketResponseDto>),
        (status = 404, description = "Ticket not found")
    ),
    security(("bearer_auth" = [])),
    tag = "tickets"
)]
pub async fn get_ticket(
    _user: AuthenticatedUser,
    State(service): State<Arc<TicketService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<TicketResponseDto>>> {
    let ticket = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(ticket), None, None)))
}

/// Update a ticket
///
/// Status, priority and description changes are recorded in the ticket history.
#[utoipa::path(
    put,
    path = "/api/v1/tickets/{id}",
    params(
        ("id" = Uuid, Path, description = "Ticket ID")
    ),
    request_body = TicketRequestDto,
    responses(
        (status = 200, description = "Ticket updated", body = ApiResponse<TicketResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Ticket not found")
    ),
    security(("bearer_auth" = [])),
    tag = "tickets"
)]
pub async fn update_ticket(
    user: AuthenticatedUser,
    State(service): State<Arc<TicketService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<TicketRequestDto>,
) -> Result<Json<ApiResponse<TicketResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(collect_messages(&e)))?;

    let ticket = service.update(&user, id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(ticket),
        Some("Ticket updated".to_string()),
        None,
    )))
}

/// Delete a ticket (creator or admin)
#[utoipa::path(
    delete,
    path = "/api/v1/tickets/{id}",
    params(
        ("id" = Uuid, Path, description = "Ticket ID")
    ),
    responses(
        (status = 200, description = "Ticket deleted", body = ApiResponse<DeletedResponseDto>),
        (status = 403, description = "Not the creator or an admin"),
        (status = 404, description = "Ticket not found")
    ),
    security(("bearer_auth" = [])),
    tag = "tickets"
)]
pub async fn delete_ticket(
    user: AuthenticatedUser,
    State(service): State<Arc<TicketService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<DeletedResponseDto>>> {
    service.delete(&user, id).await?;
    Ok(Json(ApiResponse::success(
        Some(DeletedResponseDto { id, deleted: true }),
        Some("Ticket deleted".to_string()),
        None,
    )))
}

/// List the change history of a ticket
#[utoipa::path(
    get,
    path = "/api/v1/tickets/{id}/history",
    params(
        ("id" = Uuid, Path, description = "Ticket ID")
    ),
    responses(
        (status = 200, description = "History entries, newest first", body = ApiResponse<Vec<TicketHistoryResponseDto>>),
        (status = 404, description = "Ticket not found")
    ),
    security(("bearer_auth" = [])),
    tag = "tickets"
)]
pub async fn list_ticket_history(
    _user: AuthenticatedUser,
    State(service): State<Arc<TicketService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<Vec<TicketHistoryResponseDto>>>> {
    let history = service.history(id).await?;
    let total = history.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(history),
        None,
        Some(Meta { total }),
    )))
}
