use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::attachments::models::{AttachmentContent, NewAttachment, TicketAttachment};

#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Oldest first, metadata only
    async fn list_by_ticket(&self, ticket_id: Uuid) -> Result<Vec<TicketAttachment>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TicketAttachment>>;

    async fn fetch_content(&self, id: Uuid) -> Result<Option<AttachmentContent>>;

    async fn create(&self, attachment: NewAttachment) -> Result<TicketAttachment>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

const METADATA_COLUMNS: &str =
    "id, ticket_id, filename, content_type, size_bytes, uploaded_by, uploaded_at";

pub struct PgAttachmentRepository {
    pool: PgPool,
}

impl PgAttachmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttachmentRepository for PgAttachmentRepository {
    async fn list_by_ticket(&self, ticket_id: Uuid) -> Result<Vec<TicketAttachment>> {
        let query = format!(
            "SELECT {} FROM ticket_attachments WHERE ticket_id = $1 ORDER BY uploaded_at ASC, id ASC",
            METADATA_COLUMNS
        );

        sqlx::query_as::<_, TicketAttachment>(&query)
            .bind(ticket_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list attachments for ticket {}: {:?}", ticket_id, e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TicketAttachment>> {
        let query = format!(
            "SELECT {} FROM ticket_attachments WHERE id = $1",
            METADATA_COLUMNS
        );

        sqlx::query_as::<_, TicketAttachment>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get attachment {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn fetch_content(&self, id: Uuid) -> Result<Option<AttachmentContent>> {
        sqlx::query_as::<_, AttachmentContent>(
            "SELECT filename, content_type, file_data FROM ticket_attachments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load attachment content {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn create(&self, attachment: NewAttachment) -> Result<TicketAttachment> {
        let query = format!(
            r#"
            INSERT INTO ticket_attachments
                (id, ticket_id, filename, content_type, size_bytes, file_data, uploaded_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            METADATA_COLUMNS
        );

        sqlx::query_as::<_, TicketAttachment>(&query)
            .bind(attachment.id)
            .bind(attachment.ticket_id)
            .bind(&attachment.filename)
            .bind(&attachment.content_type)
            .bind(attachment.file_data.len() as i64)
            .bind(&attachment.file_data)
            .bind(attachment.uploaded_by)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to store attachment: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM ticket_attachments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete attachment {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
