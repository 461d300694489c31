use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::comments::models::TicketComment;
use crate::shared::validation::not_blank;

/// Request body for adding or editing a comment
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CommentRequestDto {
    #[validate(
        custom(function = "not_blank", message = "Content is required"),
        length(max = 5000, message = "Content must be at most 5000 characters")
    )]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentResponseDto {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<TicketComment> for CommentResponseDto {
    fn from(c: TicketComment) -> Self {
        Self {
            id: c.id,
            ticket_id: c.ticket_id,
            author_id: c.author_id,
            content: c.content,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_content_rules() {
        let ok = CommentRequestDto {
            content: "Rebooted, looks fine now".to_string(),
        };
        assert!(ok.validate().is_ok());

        let blank = CommentRequestDto {
            content: " \n ".to_string(),
        };
        assert!(blank.validate().is_err());

        let at_limit = CommentRequestDto {
            content: "a".repeat(5000),
        };
        assert!(at_limit.validate().is_ok());

        let long = CommentRequestDto {
            content: "a".repeat(5001),
        };
        let errors = long.validate().unwrap_err();
        assert_eq!(
            crate::shared::validation::collect_messages(&errors),
            vec!["content: Content must be at most 5000 characters"]
        );
    }
}
