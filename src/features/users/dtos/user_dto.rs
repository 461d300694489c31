use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::users::models::User;

/// Public view of a user, used for assignee pickers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummaryDto {
    pub id: Uuid,
    pub username: String,
    pub department_id: i16,
}

impl From<User> for UserSummaryDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            department_id: u.department_id,
        }
    }
}
