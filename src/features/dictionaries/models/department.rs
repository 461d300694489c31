use serde::Serialize;
use sqlx::FromRow;

/// Department a user belongs to and a ticket is routed to
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Department {
    pub id: i16,
    pub code: String,
    pub name: String,
}
