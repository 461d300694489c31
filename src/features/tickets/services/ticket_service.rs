use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::dictionaries::DictionaryService;
use crate::features::tickets::dtos::{
    TicketHistoryResponseDto, TicketQueryParams, TicketRequestDto, TicketResponseDto,
};
use crate::features::tickets::models::{NewTicket, Ticket, TicketChanges};
use crate::features::tickets::repositories::{TicketHistoryRepository, TicketRepository};
use crate::features::users::repositories::UserRepository;

/// Service for ticket operations
pub struct TicketService {
    tickets: Arc<dyn TicketRepository>,
    history: Arc<dyn TicketHistoryRepository>,
    users: Arc<dyn UserRepository>,
    dictionaries: Arc<DictionaryService>,
}

impl TicketService {
    pub fn new(
        tickets: Arc<dyn TicketRepository>,
        history: Arc<dyn TicketHistoryRepository>,
        users: Arc<dyn UserRepository>,
        dictionaries: Arc<DictionaryService>,
    ) -> Self {
        Self {
            tickets,
            history,
            users,
            dictionaries,
        }
    }

    /// Checks every id the request refers to
    async fn validate_references(&self, dto: &TicketRequestDto) -> Result<()> {
        self.dictionaries.ensure_status(dto.status_id).await?;
        self.dictionaries.ensure_priority(dto.priority_id).await?;
        self.dictionaries.ensure_department(dto.department_id).await?;

        if let Some(assignee_id) = dto.assignee_id {
            if self.users.find_by_id(assignee_id).await?.is_none() {
                return Err(AppError::invalid_field(
                    "assignee_id",
                    "Assignee does not exist",
                ));
            }
        }

        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<Ticket> {
        self.tickets
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ticket '{}' not found", id)))
    }

    async fn detail(&self, id: Uuid) -> Result<TicketResponseDto> {
        self.tickets
            .find_detail(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Ticket '{}' not found", id)))
    }

    /// Create a ticket owned by `user`
    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        dto: TicketRequestDto,
    ) -> Result<TicketResponseDto> {
        self.validate_references(&dto).await?;

        let ticket = self
            .tickets
            .create(NewTicket {
                id: Uuid::now_v7(),
                title: dto.title,
                description: dto.description,
                status_id: dto.status_id,
                priority_id: dto.priority_id,
                creator_id: user.user_id,
                assignee_id: dto.assignee_id,
                department_id: dto.department_id,
            })
            .await?;

        tracing::info!("Ticket created: id={}, creator={}", ticket.id, user.user_id);

        self.detail(ticket.id).await
    }

    /// Get ticket by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<TicketResponseDto> {
        self.detail(id).await
    }

    /// Search tickets; returns the page and the total number of matches
    pub async fn search(&self, params: TicketQueryParams) -> Result<(Vec<TicketResponseDto>, i64)> {
        let filter = params.into_filter();
        let (tickets, total) = self.tickets.search(&filter).await?;
        Ok((tickets.into_iter().map(Into::into).collect(), total))
    }

    /// Replace the ticket's fields, auditing status, priority and description
    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        dto: TicketRequestDto,
    ) -> Result<TicketResponseDto> {
        self.validate_references(&dto).await?;

        self.tickets
            .update_with_history(id, TicketChanges::from(dto), user.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ticket '{}' not found", id)))?;

        tracing::info!("Ticket updated: id={}, by={}", id, user.user_id);

        self.detail(id).await
    }

    /// Soft-delete; only the creator or an admin may do this
    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<()> {
        let ticket = self.load(id).await?;

        if !user.can_manage(ticket.creator_id) {
            return Err(AppError::Forbidden(
                "Only the ticket creator or an admin can delete this ticket".to_string(),
            ));
        }

        if !self.tickets.soft_delete(id).await? {
            return Err(AppError::NotFound(format!("Ticket '{}' not found", id)));
        }

        tracing::info!("Ticket deleted: id={}, by={}", id, user.user_id);
        Ok(())
    }

    /// History of a live ticket, newest first
    pub async fn history(&self, id: Uuid) -> Result<Vec<TicketHistoryResponseDto>> {
        self.load(id).await?;

        let entries = self.history.list_by_ticket(id).await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::User;
    use crate::shared::constants::{ROLE_ADMIN_ID, ROLE_USER_ID};
    use crate::shared::test_helpers::{auth_user, InMemoryDb};

    struct Fixture {
        service: TicketService,
        owner: User,
        other: User,
        admin: User,
    }

    fn fixture() -> Fixture {
        let db = Arc::new(InMemoryDb::seeded());
        let owner = db.add_user("owner", ROLE_USER_ID);
        let other = db.add_user("other", ROLE_USER_ID);
        let admin = db.add_user("boss", ROLE_ADMIN_ID);

        let service = TicketService::new(
            db.clone(),
            db.clone(),
            db.clone(),
            Arc::new(DictionaryService::new(db.clone())),
        );

        Fixture {
            service,
            owner,
            other,
            admin,
        }
    }

    fn request(title: &str) -> TicketRequestDto {
        TicketRequestDto {
            title: title.to_string(),
            description: format!("{} - details", title),
            status_id: 1,
            priority_id: 2,
            assignee_id: None,
            department_id: 1,
        }
    }

    #[tokio::test]
    async fn test_create_returns_labels_and_records_creation() {
        let f = fixture();
        let created = f
            .service
            .create(&auth_user(&f.owner), request("Laptop will not boot"))
            .await
            .unwrap();

        assert_eq!(created.creator_id, f.owner.id);
        assert_eq!(created.status_label, "Open");
        assert_eq!(created.priority_label, "Medium");
        assert_eq!(created.creator_username, "owner");

        let history = f.service.history(created.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].field_name, "ticket");
        assert_eq!(history[0].new_value, "created");
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_references() {
        let f = fixture();
        let user = auth_user(&f.owner);

        let mut bad_status = request("x");
        bad_status.status_id = 77;
        assert!(matches!(
            f.service.create(&user, bad_status).await,
            Err(AppError::Validation(_))
        ));

        let mut bad_assignee = request("y");
        bad_assignee.assignee_id = Some(Uuid::new_v4());
        match f.service.create(&user, bad_assignee).await {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors, vec!["assignee_id: Assignee does not exist".to_string()])
            }
            other => panic!("expected validation error, got {:?}", other.map(|t| t.id)),
        }
    }

    #[tokio::test]
    async fn test_update_writes_one_row_per_changed_field() {
        let f = fixture();
        let actor = auth_user(&f.other);
        let ticket = f
            .service
            .create(&auth_user(&f.owner), request("Email bounce"))
            .await
            .unwrap();

        let mut changes = request("Email bounce, renamed");
        changes.description = ticket.description.clone();
        changes.status_id = 2;
        changes.priority_id = 4;
        changes.assignee_id = Some(f.admin.id);
        let updated = f.service.update(&actor, ticket.id, changes).await.unwrap();

        assert_eq!(updated.title, "Email bounce, renamed");
        assert_eq!(updated.assignee_username.as_deref(), Some("boss"));

        let history = f.service.history(ticket.id).await.unwrap();
        let mut changed: Vec<(String, String, String)> = history
            .iter()
            .filter(|h| h.field_name != "ticket")
            .map(|h| (h.field_name.clone(), h.old_value.clone(), h.new_value.clone()))
            .collect();
        changed.sort();

        assert_eq!(
            changed,
            vec![
                ("priority".to_string(), "2".to_string(), "4".to_string()),
                ("status".to_string(), "1".to_string(), "2".to_string()),
            ]
        );
        assert!(history
            .iter()
            .filter(|h| h.field_name != "ticket")
            .all(|h| h.changed_by == f.other.id));
    }

    #[tokio::test]
    async fn test_update_without_tracked_changes_writes_nothing() {
        let f = fixture();
        let user = auth_user(&f.owner);
        let ticket = f.service.create(&user, request("Slow wifi")).await.unwrap();

        f.service
            .update(&user, ticket.id, request("Slow wifi"))
            .await
            .unwrap();

        assert_eq!(f.service.history(ticket.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_untracked_field_changes_write_no_history() {
        let f = fixture();
        let user = auth_user(&f.owner);
        let ticket = f.service.create(&user, request("VPN drops")).await.unwrap();

        let mut changes = request("VPN drops every hour");
        changes.description = ticket.description.clone();
        changes.assignee_id = Some(f.admin.id);
        changes.department_id = 4;
        let updated = f.service.update(&user, ticket.id, changes).await.unwrap();

        assert_eq!(updated.title, "VPN drops every hour");
        assert_eq!(updated.assignee_username.as_deref(), Some("boss"));
        assert_eq!(updated.department_name, "Customer Support");

        let history = f.service.history(ticket.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].field_name, "ticket");
    }

    #[tokio::test]
    async fn test_update_missing_ticket_is_not_found() {
        let f = fixture();
        let result = f
            .service
            .update(&auth_user(&f.owner), Uuid::new_v4(), request("ghost"))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_requires_owner_or_admin() {
        let f = fixture();
        let first = f
            .service
            .create(&auth_user(&f.owner), request("First"))
            .await
            .unwrap();
        let second = f
            .service
            .create(&auth_user(&f.owner), request("Second"))
            .await
            .unwrap();

        assert!(matches!(
            f.service.delete(&auth_user(&f.other), first.id).await,
            Err(AppError::Forbidden(_))
        ));

        f.service.delete(&auth_user(&f.owner), first.id).await.unwrap();
        f.service.delete(&auth_user(&f.admin), second.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_deleted_ticket_is_hidden() {
        let f = fixture();
        let user = auth_user(&f.owner);
        let kept = f.service.create(&user, request("Keep me")).await.unwrap();
        let gone = f.service.create(&user, request("Delete me")).await.unwrap();

        f.service.delete(&user, gone.id).await.unwrap();

        assert!(matches!(
            f.service.get_by_id(gone.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            f.service.history(gone.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            f.service.delete(&user, gone.id).await,
            Err(AppError::NotFound(_))
        ));

        let (results, total) = f.service.search(TicketQueryParams::default()).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(results[0].id, kept.id);
    }

    #[tokio::test]
    async fn test_search_filters_and_paging() {
        let f = fixture();
        let user = auth_user(&f.owner);

        let mut urgent = request("Server room flooding");
        urgent.priority_id = 4;
        urgent.assignee_id = Some(f.admin.id);
        f.service.create(&user, urgent).await.unwrap();
        f.service.create(&user, request("Printer out of toner")).await.unwrap();
        f.service.create(&user, request("Printer offline")).await.unwrap();

        let (printers, total) = f
            .service
            .search(TicketQueryParams {
                q: Some("PRINTER".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(printers.len(), 2);

        let (assigned, _) = f
            .service
            .search(TicketQueryParams {
                assignee_id: Some(f.admin.id),
                priority_id: Some(4),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].title, "Server room flooding");

        let (page, total) = f
            .service
            .search(TicketQueryParams {
                limit: Some(2),
                offset: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 1);
    }
}
