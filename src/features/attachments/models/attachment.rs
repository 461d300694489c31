use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Attachment metadata; the bytes are only loaded for downloads
#[derive(Debug, Clone, FromRow)]
pub struct TicketAttachment {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_by: Uuid,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct AttachmentContent {
    pub filename: String,
    pub content_type: String,
    pub file_data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct NewAttachment {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub file_data: Vec<u8>,
    pub uploaded_by: Uuid,
}
