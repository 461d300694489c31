use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for ticket
#[derive(Debug, Clone, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status_id: i16,
    pub priority_id: i16,
    pub creator_id: Uuid,
    pub assignee_id: Option<Uuid>,
    pub department_id: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Ticket joined with the display names of everything it references
#[derive(Debug, Clone, FromRow)]
pub struct TicketDetail {
    #[sqlx(flatten)]
    pub ticket: Ticket,
    pub status_label: String,
    pub priority_label: String,
    pub department_name: String,
    pub creator_username: String,
    pub assignee_username: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewTicket {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status_id: i16,
    pub priority_id: i16,
    pub creator_id: Uuid,
    pub assignee_id: Option<Uuid>,
    pub department_id: i16,
}

/// Full replacement of the editable fields
#[derive(Debug, Clone)]
pub struct TicketChanges {
    pub title: String,
    pub description: String,
    pub status_id: i16,
    pub priority_id: i16,
    pub assignee_id: Option<Uuid>,
    pub department_id: i16,
}

/// Search criteria; `None` filters match everything
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub status_id: Option<i16>,
    pub priority_id: Option<i16>,
    pub assignee_id: Option<Uuid>,
    pub department_id: Option<i16>,
    pub q: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
