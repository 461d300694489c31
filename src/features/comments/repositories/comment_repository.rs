use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::comments::models::{NewComment, TicketComment};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Oldest first
    async fn list_by_ticket(&self, ticket_id: Uuid) -> Result<Vec<TicketComment>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TicketComment>>;

    async fn create(&self, comment: NewComment) -> Result<TicketComment>;

    async fn update_content(&self, id: Uuid, content: &str) -> Result<Option<TicketComment>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

const COMMENT_COLUMNS: &str = "id, ticket_id, author_id, content, created_at, updated_at";

pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn list_by_ticket(&self, ticket_id: Uuid) -> Result<Vec<TicketComment>> {
        let query = format!(
            "SELECT {} FROM ticket_comments WHERE ticket_id = $1 ORDER BY created_at ASC, id ASC",
            COMMENT_COLUMNS
        );

        sqlx::query_as::<_, TicketComment>(&query)
            .bind(ticket_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list comments for ticket {}: {:?}", ticket_id, e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TicketComment>> {
        let query = format!("SELECT {} FROM ticket_comments WHERE id = $1", COMMENT_COLUMNS);

        sqlx::query_as::<_, TicketComment>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get comment {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn create(&self, comment: NewComment) -> Result<TicketComment> {
        let query = format!(
            r#"
            INSERT INTO ticket_comments (id, ticket_id, author_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            COMMENT_COLUMNS
        );

        sqlx::query_as::<_, TicketComment>(&query)
            .bind(comment.id)
            .bind(comment.ticket_id)
            .bind(comment.author_id)
            .bind(&comment.content)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create comment: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn update_content(&self, id: Uuid, content: &str) -> Result<Option<TicketComment>> {
        let query = format!(
            r#"
            UPDATE ticket_comments
            SET content = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COMMENT_COLUMNS
        );

        sqlx::query_as::<_, TicketComment>(&query)
            .bind(id)
            .bind(content)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update comment {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM ticket_comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete comment {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
