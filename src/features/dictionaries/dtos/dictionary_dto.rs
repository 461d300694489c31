use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::dictionaries::models::{Department, TicketPriority, TicketStatus};

/// Response DTO for department data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentResponseDto {
    pub id: i16,
    pub code: String,
    pub name: String,
}

impl From<Department> for DepartmentResponseDto {
    fn from(d: Department) -> Self {
        Self {
            id: d.id,
            code: d.code,
            name: d.name,
        }
    }
}

/// Response DTO for ticket status data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TicketStatusResponseDto {
    pub id: i16,
    pub code: String,
    pub label: String,
}

impl From<TicketStatus> for TicketStatusResponseDto {
    fn from(s: TicketStatus) -> Self {
        Self {
            id: s.id,
            code: s.code,
            label: s.label,
        }
    }
}

/// Response DTO for ticket priority data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TicketPriorityResponseDto {
    pub id: i16,
    pub code: String,
    pub label: String,
    pub level: i16,
}

impl From<TicketPriority> for TicketPriorityResponseDto {
    fn from(p: TicketPriority) -> Self {
        Self {
            id: p.id,
            code: p.code,
            label: p.label,
            level: p.level,
        }
    }
}
