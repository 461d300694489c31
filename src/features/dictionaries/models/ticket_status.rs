use serde::Serialize;
use sqlx::FromRow;

/// Lifecycle state of a ticket (open, in_progress, resolved, closed)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TicketStatus {
    pub id: i16,
    pub code: String,
    pub label: String,
}
