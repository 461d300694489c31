use std::sync::Arc;

use crate::core::error::Result;
use crate::features::users::dtos::UserSummaryDto;
use crate::features::users::repositories::UserRepository;

/// Read-only access to the user directory
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<UserSummaryDto>> {
        let users = self.repo.list_active().await?;
        Ok(users.into_iter().map(UserSummaryDto::from).collect())
    }
}
