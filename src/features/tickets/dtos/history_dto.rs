use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::tickets::models::TicketHistory;

/// Response DTO for a ticket history entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TicketHistoryResponseDto {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub changed_at: DateTime<Utc>,
    pub changed_by: Uuid,
    /// `status`, `priority`, `description`, or `ticket` for the creation marker
    pub field_name: String,
    pub old_value: String,
    pub new_value: String,
}

impl From<TicketHistory> for TicketHistoryResponseDto {
    fn from(h: TicketHistory) -> Self {
        Self {
            id: h.id,
            ticket_id: h.ticket_id,
            changed_at: h.changed_at,
            changed_by: h.changed_by,
            field_name: h.field_name,
            old_value: h.old_value,
            new_value: h.new_value,
        }
    }
}
