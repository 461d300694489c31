use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::tickets::audit::{self, FieldChange};
use crate::features::tickets::models::{
    NewTicket, Ticket, TicketChanges, TicketDetail, TicketFilter,
};
use crate::features::tickets::repositories::ticket_history_repository::insert_history;

/// Persistence for tickets. Soft-deleted tickets are invisible to every method.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Inserts the ticket together with its `created` history entry
    async fn create(&self, ticket: NewTicket) -> Result<Ticket>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>>;

    async fn find_detail(&self, id: Uuid) -> Result<Option<TicketDetail>>;

    /// Returns one page of matches, newest first, and the unpaginated match count
    async fn search(&self, filter: &TicketFilter) -> Result<(Vec<TicketDetail>, i64)>;

    /// Applies `changes` and appends one history row per changed tracked field,
    /// atomically. Returns `None` when the ticket does not exist.
    async fn update_with_history(
        &self,
        id: Uuid,
        changes: TicketChanges,
        changed_by: Uuid,
    ) -> Result<Option<Ticket>>;

    /// Returns false when there was nothing to delete
    async fn soft_delete(&self, id: Uuid) -> Result<bool>;
}

const TICKET_COLUMNS: &str = r#"
    id, title, description, status_id, priority_id, creator_id, assignee_id,
    department_id, created_at, updated_at, deleted_at
"#;

const DETAIL_SELECT: &str = r#"
    SELECT
        t.id, t.title, t.description, t.status_id, t.priority_id, t.creator_id,
        t.assignee_id, t.department_id, t.created_at, t.updated_at, t.deleted_at,
        s.label AS status_label,
        p.label AS priority_label,
        d.name AS department_name,
        c.username AS creator_username,
        a.username AS assignee_username
    FROM tickets t
    JOIN ticket_statuses s ON s.id = t.status_id
    JOIN ticket_priorities p ON p.id = t.priority_id
    JOIN departments d ON d.id = t.department_id
    JOIN users c ON c.id = t.creator_id
    LEFT JOIN users a ON a.id = t.assignee_id
"#;

/// Every filter is always bound; a NULL parameter disables its condition.
const SEARCH_CONDITIONS: &str = r#"
    WHERE t.deleted_at IS NULL
      AND ($1::smallint IS NULL OR t.status_id = $1)
      AND ($2::smallint IS NULL OR t.priority_id = $2)
      AND ($3::uuid IS NULL OR t.assignee_id = $3)
      AND ($4::smallint IS NULL OR t.department_id = $4)
      AND ($5::text IS NULL
           OR to_tsvector('simple', t.title || ' ' || t.description)
              @@ plainto_tsquery('simple', $5))
"#;

pub struct PgTicketRepository {
    pool: PgPool,
}

impl PgTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> AppError {
    move |e| {
        tracing::error!("{}: {:?}", context, e);
        AppError::Database(e)
    }
}

#[async_trait]
impl TicketRepository for PgTicketRepository {
    async fn create(&self, ticket: NewTicket) -> Result<Ticket> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let query = format!(
            r#"
            INSERT INTO tickets (
                id, title, description, status_id, priority_id, creator_id,
                assignee_id, department_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            TICKET_COLUMNS
        );

        let created = sqlx::query_as::<_, Ticket>(&query)
            .bind(ticket.id)
            .bind(&ticket.title)
            .bind(&ticket.description)
            .bind(ticket.status_id)
            .bind(ticket.priority_id)
            .bind(ticket.creator_id)
            .bind(ticket.assignee_id)
            .bind(ticket.department_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("Failed to create ticket"))?;

        let marker =
            FieldChange::created().into_history(created.id, created.creator_id, created.created_at);
        insert_history(&mut *tx, &[marker])
            .await
            .map_err(db_error("Failed to record ticket creation"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit ticket creation"))?;

        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>> {
        let query = format!(
            "SELECT {} FROM tickets WHERE id = $1 AND deleted_at IS NULL",
            TICKET_COLUMNS
        );

        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to get ticket by ID"))
    }

    async fn find_detail(&self, id: Uuid) -> Result<Option<TicketDetail>> {
        let query = format!(
            "{} WHERE t.id = $1 AND t.deleted_at IS NULL",
            DETAIL_SELECT
        );

        sqlx::query_as::<_, TicketDetail>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to get ticket detail"))
    }

    async fn search(&self, filter: &TicketFilter) -> Result<(Vec<TicketDetail>, i64)> {
        let count_query = format!("SELECT COUNT(*) FROM tickets t {}", SEARCH_CONDITIONS);
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(filter.status_id)
            .bind(filter.priority_id)
            .bind(filter.assignee_id)
            .bind(filter.department_id)
            .bind(filter.q.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count tickets"))?;

        let query = format!(
            r#"
            {}
            {}
            ORDER BY t.created_at DESC, t.id DESC
            LIMIT $6 OFFSET $7
            "#,
            DETAIL_SELECT, SEARCH_CONDITIONS
        );

        let tickets = sqlx::query_as::<_, TicketDetail>(&query)
            .bind(filter.status_id)
            .bind(filter.priority_id)
            .bind(filter.assignee_id)
            .bind(filter.department_id)
            .bind(filter.q.as_deref())
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to search tickets"))?;

        Ok((tickets, total))
    }

    async fn update_with_history(
        &self,
        id: Uuid,
        changes: TicketChanges,
        changed_by: Uuid,
    ) -> Result<Option<Ticket>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let lock_query = format!(
            "SELECT {} FROM tickets WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
            TICKET_COLUMNS
        );
        let old = sqlx::query_as::<_, Ticket>(&lock_query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("Failed to lock ticket"))?;

        // dropping the transaction rolls it back
        let Some(old) = old else {
            return Ok(None);
        };

        let changed_at = Utc::now();
        let rows = audit::history_rows(id, changed_by, changed_at, audit::diff(&old, &changes));

        let update_query = format!(
            r#"
            UPDATE tickets
            SET title = $2, description = $3, status_id = $4, priority_id = $5,
                assignee_id = $6, department_id = $7, updated_at = $8
            WHERE id = $1
            RETURNING {}
            "#,
            TICKET_COLUMNS
        );
        let updated = sqlx::query_as::<_, Ticket>(&update_query)
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(changes.status_id)
            .bind(changes.priority_id)
            .bind(changes.assignee_id)
            .bind(changes.department_id)
            .bind(changed_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("Failed to update ticket"))?;

        insert_history(&mut *tx, &rows)
            .await
            .map_err(db_error("Failed to record ticket history"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit ticket update"))?;

        tracing::debug!("Ticket {} updated with {} history rows", id, rows.len());

        Ok(Some(updated))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE tickets SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to delete ticket"))?;

        Ok(result.rows_affected() > 0)
    }
}
