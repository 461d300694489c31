use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::dictionaries::models::{Department, TicketPriority, TicketStatus};
use crate::features::dictionaries::repositories::DictionaryRepository;

/// Service for reference data: departments, ticket statuses and priorities
pub struct DictionaryService {
    repo: Arc<dyn DictionaryRepository>,
}

impl DictionaryService {
    pub fn new(repo: Arc<dyn DictionaryRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_departments(&self) -> Result<Vec<Department>> {
        self.repo.list_departments().await
    }

    pub async fn list_statuses(&self) -> Result<Vec<TicketStatus>> {
        self.repo.list_statuses().await
    }

    pub async fn list_priorities(&self) -> Result<Vec<TicketPriority>> {
        self.repo.list_priorities().await
    }

    // ==================== Reference checks ====================

    pub async fn ensure_department(&self, id: i16) -> Result<()> {
        if id < 1 || !self.repo.department_exists(id).await? {
            return Err(AppError::invalid_field(
                "department_id",
                "Valid department is required",
            ));
        }
        Ok(())
    }

    pub async fn ensure_status(&self, id: i16) -> Result<()> {
        if id < 1 || !self.repo.status_exists(id).await? {
            return Err(AppError::invalid_field("status_id", "Valid status is required"));
        }
        Ok(())
    }

    pub async fn ensure_priority(&self, id: i16) -> Result<()> {
        if id < 1 || !self.repo.priority_exists(id).await? {
            return Err(AppError::invalid_field(
                "priority_id",
                "Valid priority is required",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::InMemoryDb;

    fn service() -> DictionaryService {
        DictionaryService::new(Arc::new(InMemoryDb::seeded()))
    }

    #[tokio::test]
    async fn test_lists_seeded_reference_data() {
        let service = service();
        assert_eq!(service.list_departments().await.unwrap().len(), 4);
        assert_eq!(service.list_statuses().await.unwrap().len(), 4);

        let priorities = service.list_priorities().await.unwrap();
        let levels: Vec<i16> = priorities.iter().map(|p| p.level).collect();
        let mut sorted = levels.clone();
        sorted.sort();
        assert_eq!(levels, sorted);
    }

    #[tokio::test]
    async fn test_unknown_references_are_validation_errors() {
        let service = service();
        assert!(service.ensure_status(1).await.is_ok());

        match service.ensure_status(99).await {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors, vec!["status_id: Valid status is required".to_string()])
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(matches!(
            service.ensure_priority(0).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.ensure_department(-3).await,
            Err(AppError::Validation(_))
        ));
    }
}
