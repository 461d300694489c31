use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::dictionaries::dtos::{
    DepartmentResponseDto, TicketPriorityResponseDto, TicketStatusResponseDto,
};
use crate::features::dictionaries::services::DictionaryService;
use crate::shared::types::ApiResponse;

/// List departments
#[utoipa::path(
    get,
    path = "/api/v1/departments",
    responses(
        (status = 200, description = "List of departments", body = ApiResponse<Vec<DepartmentResponseDto>>),
    ),
    tag = "dictionaries"
)]
pub async fn list_departments(
    State(service): State<Arc<DictionaryService>>,
) -> Result<Json<ApiResponse<Vec<DepartmentResponseDto>>>> {
    let departments = service.list_departments().await?;
    let dtos: Vec<DepartmentResponseDto> = departments.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// List ticket statuses
#[utoipa::path(
    get,
    path = "/api/v1/ticket_statuses",
    responses(
        (status = 200, description = "List of ticket statuses", body = ApiResponse<Vec<TicketStatusResponseDto>>),
    ),
    tag = "dictionaries"
)]
pub async fn list_ticket_statuses(
    State(service): State<Arc<DictionaryService>>,
) -> Result<Json<ApiResponse<Vec<TicketStatusResponseDto>>>> {
    let statuses = service.list_statuses().await?;
    let dtos: Vec<TicketStatusResponseDto> = statuses.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// List ticket priorities, least urgent first
#[utoipa::path(
    get,
    path = "/api/v1/ticket_priorities",
    responses(
        (status = 200, description = "List of ticket priorities", body = ApiResponse<Vec<TicketPriorityResponseDto>>),
    ),
    tag = "dictionaries"
)]
pub async fn list_ticket_priorities(
    State(service): State<Arc<DictionaryService>>,
) -> Result<Json<ApiResponse<Vec<TicketPriorityResponseDto>>>> {
    let priorities = service.list_priorities().await?;
    let dtos: Vec<TicketPriorityResponseDto> = priorities.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}
