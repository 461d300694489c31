use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::comments::dtos::{CommentRequestDto, CommentResponseDto};
use crate::features::comments::models::{NewComment, TicketComment};
use crate::features::comments::repositories::CommentRepository;
use crate::features::tickets::repositories::TicketRepository;

/// Service for comments on live tickets
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    tickets: Arc<dyn TicketRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, tickets: Arc<dyn TicketRepository>) -> Self {
        Self { comments, tickets }
    }

    async fn ensure_ticket(&self, ticket_id: Uuid) -> Result<()> {
        match self.tickets.find_by_id(ticket_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("Ticket '{}' not found", ticket_id))),
        }
    }

    /// Loads a comment that belongs to a live ticket and that `user` may manage
    async fn load_manageable(
        &self,
        user: &AuthenticatedUser,
        ticket_id: Uuid,
        comment_id: Uuid,
    ) -> Result<TicketComment> {
        self.ensure_ticket(ticket_id).await?;

        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .filter(|c| c.ticket_id == ticket_id)
            .ok_or_else(|| AppError::NotFound(format!("Comment '{}' not found", comment_id)))?;

        if !user.can_manage(comment.author_id) {
            return Err(AppError::Forbidden(
                "Only the author or an admin can modify this comment".to_string(),
            ));
        }

        Ok(comment)
    }

    pub async fn list(&self, ticket_id: Uuid) -> Result<Vec<CommentResponseDto>> {
        self.ensure_ticket(ticket_id).await?;

        let comments = self.comments.list_by_ticket(ticket_id).await?;
        Ok(comments.into_iter().map(Into::into).collect())
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        ticket_id: Uuid,
        dto: CommentRequestDto,
    ) -> Result<CommentResponseDto> {
        self.ensure_ticket(ticket_id).await?;

        let comment = self
            .comments
            .create(NewComment {
                id: Uuid::now_v7(),
                ticket_id,
                author_id: user.user_id,
                content: dto.content,
            })
            .await?;

        tracing::info!(
            "Comment added: id={}, ticket_id={}, author={}",
            comment.id,
            ticket_id,
            user.user_id
        );

        Ok(comment.into())
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        ticket_id: Uuid,
        comment_id: Uuid,
        dto: CommentRequestDto,
    ) -> Result<CommentResponseDto> {
        self.load_manageable(user, ticket_id, comment_id).await?;

        let comment = self
            .comments
            .update_content(comment_id, &dto.content)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment '{}' not found", comment_id)))?;

        Ok(comment.into())
    }

    pub async fn delete(
        &self,
        user: &AuthenticatedUser,
        ticket_id: Uuid,
        comment_id: Uuid,
    ) -> Result<()> {
        self.load_manageable(user, ticket_id, comment_id).await?;

        if !self.comments.delete(comment_id).await? {
            return Err(AppError::NotFound(format!("Comment '{}' not found", comment_id)));
        }

        tracing::info!(
            "Comment deleted: id={}, ticket_id={}, by={}",
            comment_id,
            ticket_id,
            user.user_id
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::{ROLE_ADMIN_ID, ROLE_USER_ID};
    use crate::shared::test_helpers::{auth_user, InMemoryDb};

    fn comment(text: &str) -> CommentRequestDto {
        CommentRequestDto {
            content: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_comments_listed_oldest_first() {
        let db = Arc::new(InMemoryDb::seeded());
        let author = auth_user(&db.add_user("author", ROLE_USER_ID));
        let ticket = db.add_ticket(author.user_id);
        let service = CommentService::new(db.clone(), db.clone());

        service.create(&author, ticket.id, comment("first")).await.unwrap();
        service.create(&author, ticket.id, comment("second")).await.unwrap();

        let listed = service.list(ticket.id).await.unwrap();
        let contents: Vec<&str> = listed.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_delete_by_stranger_is_forbidden() {
        let db = Arc::new(InMemoryDb::seeded());
        let author = auth_user(&db.add_user("author", ROLE_USER_ID));
        let stranger = auth_user(&db.add_user("stranger", ROLE_USER_ID));
        let admin = auth_user(&db.add_user("admin", ROLE_ADMIN_ID));
        let ticket = db.add_ticket(author.user_id);
        let service = CommentService::new(db.clone(), db.clone());

        let first = service.create(&author, ticket.id, comment("mine")).await.unwrap();
        let second = service.create(&author, ticket.id, comment("also mine")).await.unwrap();

        assert!(matches!(
            service.delete(&stranger, ticket.id, first.id).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            service.update(&stranger, ticket.id, first.id, comment("hijack")).await,
            Err(AppError::Forbidden(_))
        ));

        service.delete(&author, ticket.id, first.id).await.unwrap();
        service.delete(&admin, ticket.id, second.id).await.unwrap();
        assert!(service.list(ticket.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit_sets_updated_at() {
        let db = Arc::new(InMemoryDb::seeded());
        let author = auth_user(&db.add_user("author", ROLE_USER_ID));
        let ticket = db.add_ticket(author.user_id);
        let service = CommentService::new(db.clone(), db.clone());

        let created = service.create(&author, ticket.id, comment("typo")).await.unwrap();
        assert!(created.updated_at.is_none());

        let edited = service
            .update(&author, ticket.id, created.id, comment("fixed"))
            .await
            .unwrap();
        assert_eq!(edited.content, "fixed");
        assert!(edited.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_comment_of_other_ticket_is_not_found() {
        let db = Arc::new(InMemoryDb::seeded());
        let author = auth_user(&db.add_user("author", ROLE_USER_ID));
        let ticket_a = db.add_ticket(author.user_id);
        let ticket_b = db.add_ticket(author.user_id);
        let service = CommentService::new(db.clone(), db.clone());

        let on_a = service.create(&author, ticket_a.id, comment("on a")).await.unwrap();

        assert!(matches!(
            service.delete(&author, ticket_b.id, on_a.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_ticket_is_not_found() {
        let db = Arc::new(InMemoryDb::seeded());
        let author = auth_user(&db.add_user("author", ROLE_USER_ID));
        let service = CommentService::new(db.clone(), db.clone());

        assert!(matches!(
            service.list(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.create(&author, Uuid::new_v4(), comment("x")).await,
            Err(AppError::NotFound(_))
        ));
    }
}
