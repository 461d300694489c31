use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// One audited field change. Rows are never updated or deleted.
#[derive(Debug, Clone, FromRow)]
pub struct TicketHistory {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub changed_at: DateTime<Utc>,
    pub changed_by: Uuid,
    pub field_name: String,
    pub old_value: String,
    pub new_value: String,
}
