use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TicketPriority {
    pub id: i16,
    pub code: String,
    pub label: String,
    /// Sort weight, higher is more urgent
    pub level: i16,
}
