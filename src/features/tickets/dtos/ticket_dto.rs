use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::tickets::models::{TicketChanges, TicketDetail, TicketFilter};
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::shared::validation::not_blank;

/// Request body for creating a ticket and for replacing its fields on update
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TicketRequestDto {
    #[validate(
        custom(function = "not_blank", message = "Title is required"),
        length(max = 255, message = "Title must be at most 255 characters")
    )]
    pub title: String,

    #[validate(
        custom(function = "not_blank", message = "Description is required"),
        length(max = 10000, message = "Description must be at most 10000 characters")
    )]
    pub description: String,

    #[validate(range(min = 1, message = "Valid status is required"))]
    pub status_id: i16,

    #[validate(range(min = 1, message = "Valid priority is required"))]
    pub priority_id: i16,

    /// Unassigned when absent
    pub assignee_id: Option<Uuid>,

    #[validate(range(min = 1, message = "Valid department is required"))]
    pub department_id: i16,
}

impl From<TicketRequestDto> for TicketChanges {
    fn from(dto: TicketRequestDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            status_id: dto.status_id,
            priority_id: dto.priority_id,
            assignee_id: dto.assignee_id,
            department_id: dto.department_id,
        }
    }
}

/// Query parameters for ticket search. Empty values are treated as absent.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TicketQueryParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status_id: Option<i16>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub priority_id: Option<i16>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub assignee_id: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub department_id: Option<i16>,
    /// Full-text search over title and description
    pub q: Option<String>,
    /// Page size, 1-100 (default 50)
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub offset: Option<i64>,
}

impl TicketQueryParams {
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn into_filter(self) -> TicketFilter {
        let limit = self.limit();
        let offset = self.offset();

        TicketFilter {
            status_id: self.status_id,
            priority_id: self.priority_id,
            assignee_id: self.assignee_id,
            department_id: self.department_id,
            q: self
                .q
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
            limit,
            offset,
        }
    }
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Response DTO for ticket
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TicketResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status_id: i16,
    pub status_label: String,
    pub priority_id: i16,
    pub priority_label: String,
    pub department_id: i16,
    pub department_name: String,
    pub creator_id: Uuid,
    pub creator_username: String,
    pub assignee_id: Option<Uuid>,
    pub assignee_username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TicketDetail> for TicketResponseDto {
    fn from(d: TicketDetail) -> Self {
        let t = d.ticket;
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            status_id: t.status_id,
            status_label: d.status_label,
            priority_id: t.priority_id,
            priority_label: d.priority_label,
            department_id: t.department_id,
            department_name: d.department_name,
            creator_id: t.creator_id,
            creator_username: d.creator_username,
            assignee_id: t.assignee_id,
            assignee_username: d.assignee_username,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}
