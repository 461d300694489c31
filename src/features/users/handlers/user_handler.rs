use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::users::dtos::UserSummaryDto;
use crate::features::users::services::UserService;
use crate::shared::types::{ApiResponse, Meta};

/// List active users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Active users", body = ApiResponse<Vec<UserSummaryDto>>),
    ),
    tag = "users"
)]
pub async fn list_users(
    State(service): State<Arc<UserService>>,
) -> Result<Json<ApiResponse<Vec<UserSummaryDto>>>> {
    let users = service.list().await?;
    let total = users.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(users),
        None,
        Some(Meta { total }),
    )))
}
