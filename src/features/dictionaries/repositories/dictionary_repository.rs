use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::dictionaries::models::{Department, TicketPriority, TicketStatus};

/// Read access to the static reference tables
#[async_trait]
pub trait DictionaryRepository: Send + Sync {
    async fn list_departments(&self) -> Result<Vec<Department>>;

    async fn list_statuses(&self) -> Result<Vec<TicketStatus>>;

    async fn list_priorities(&self) -> Result<Vec<TicketPriority>>;

    async fn department_exists(&self, id: i16) -> Result<bool>;

    async fn status_exists(&self, id: i16) -> Result<bool>;

    async fn priority_exists(&self, id: i16) -> Result<bool>;
}

pub struct PgDictionaryRepository {
    pool: PgPool,
}

impl PgDictionaryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, table: &str, id: i16) -> Result<bool> {
        // table names come from the fixed set below, never from input
        let query = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", table);

        sqlx::query_scalar::<_, bool>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check {} id={}: {:?}", table, id, e);
                AppError::Database(e)
            })
    }
}

#[async_trait]
impl DictionaryRepository for PgDictionaryRepository {
    async fn list_departments(&self) -> Result<Vec<Department>> {
        sqlx::query_as::<_, Department>("SELECT id, code, name FROM departments ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch departments: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_statuses(&self) -> Result<Vec<TicketStatus>> {
        sqlx::query_as::<_, TicketStatus>("SELECT id, code, label FROM ticket_statuses ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch ticket statuses: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_priorities(&self) -> Result<Vec<TicketPriority>> {
        sqlx::query_as::<_, TicketPriority>(
            "SELECT id, code, label, level FROM ticket_priorities ORDER BY level, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch ticket priorities: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn department_exists(&self, id: i16) -> Result<bool> {
        self.exists("departments", id).await
    }

    async fn status_exists(&self, id: i16) -> Result<bool> {
        self.exists("ticket_statuses", id).await
    }

    async fn priority_exists(&self, id: i16) -> Result<bool> {
        self.exists("ticket_priorities", id).await
    }
}
