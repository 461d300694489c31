use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{map_unique_violation, AppError, Result};
use crate::features::users::models::{NewUser, User};

/// Persistence for user accounts. Soft-deleted users are invisible to every lookup.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Fails with `Conflict` when the username or email is taken
    async fn create(&self, user: NewUser) -> Result<User>;

    async fn list_active(&self) -> Result<Vec<User>>;

    async fn record_login(&self, id: Uuid) -> Result<()>;

    async fn role_exists(&self, role_id: Uuid) -> Result<bool>;
}

const USER_COLUMNS: &str = r#"
    id, username, password_hash, email, role_id, department_id,
    created_at, last_login, deleted_at
"#;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let query = format!(
            "SELECT {} FROM users WHERE username = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to find user by username: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let query = format!(
            "SELECT {} FROM users WHERE id = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to find user by id: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn create(&self, user: NewUser) -> Result<User> {
        let query = format!(
            r#"
            INSERT INTO users (id, username, password_hash, email, role_id, department_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(&user.email)
            .bind(user.role_id)
            .bind(user.department_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "Username or email is already registered"))
    }

    async fn list_active(&self) -> Result<Vec<User>> {
        let query = format!(
            "SELECT {} FROM users WHERE deleted_at IS NULL ORDER BY username",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list users: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn record_login(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn role_exists(&self, role_id: Uuid) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM roles WHERE id = $1)")
            .bind(role_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
