use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::tickets::models::TicketHistory;

#[async_trait]
pub trait TicketHistoryRepository: Send + Sync {
    /// Newest first
    async fn list_by_ticket(&self, ticket_id: Uuid) -> Result<Vec<TicketHistory>>;
}

pub struct PgTicketHistoryRepository {
    pool: PgPool,
}

impl PgTicketHistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketHistoryRepository for PgTicketHistoryRepository {
    async fn list_by_ticket(&self, ticket_id: Uuid) -> Result<Vec<TicketHistory>> {
        sqlx::query_as::<_, TicketHistory>(
            r#"
            SELECT id, ticket_id, changed_at, changed_by, field_name, old_value, new_value
            FROM ticket_history
            WHERE ticket_id = $1
            ORDER BY changed_at DESC, id DESC
            "#,
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list history for ticket {}: {:?}", ticket_id, e);
            AppError::Database(e)
        })
    }
}

/// Appends history rows on the caller's connection, normally inside its transaction
pub async fn insert_history(
    conn: &mut PgConnection,
    rows: &[TicketHistory],
) -> std::result::Result<(), sqlx::Error> {
    for row in rows {
        sqlx::query(
            r#"
            INSERT INTO ticket_history
                (id, ticket_id, changed_at, changed_by, field_name, old_value, new_value)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(row.id)
        .bind(row.ticket_id)
        .bind(row.changed_at)
        .bind(row.changed_by)
        .bind(&row.field_name)
        .bind(&row.old_value)
        .bind(&row.new_value)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
