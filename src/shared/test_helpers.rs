//! In-memory repositories and fixtures shared by unit and router tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;
use uuid::Uuid;

use crate::core::app::{api_router, AppServices, Repositories};
use crate::core::config::{AttachmentConfig, AuthConfig};
use crate::core::error::{AppError, Result};
use crate::features::attachments::models::{AttachmentContent, NewAttachment, TicketAttachment};
use crate::features::attachments::AttachmentRepository;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::TokenService;
use crate::features::comments::models::{NewComment, TicketComment};
use crate::features::comments::CommentRepository;
use crate::features::dictionaries::models::{Department, TicketPriority, TicketStatus};
use crate::features::dictionaries::DictionaryRepository;
use crate::features::tickets::audit::{self, FieldChange};
use crate::features::tickets::models::{
    NewTicket, Ticket, TicketChanges, TicketDetail, TicketFilter, TicketHistory,
};
use crate::features::tickets::{TicketHistoryRepository, TicketRepository};
use crate::features::users::models::{NewUser, User};
use crate::features::users::UserRepository;
use crate::shared::constants::{ROLE_ADMIN_ID, ROLE_USER_ID};

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hs256";

/// Upload limit used by router tests
pub const TEST_MAX_ATTACHMENT_SIZE: usize = 64 * 1024;

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        token_ttl: Duration::from_secs(3600),
        jwt_leeway: Duration::from_secs(0),
    }
}

/// A user row whose hash never verifies; log in through `register` when a password is needed
pub fn sample_user(username: &str, role_id: Uuid) -> User {
    User {
        id: Uuid::now_v7(),
        username: username.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$placeholder".to_string(),
        email: format!("{}@example.com", username),
        role_id,
        department_id: 1,
        created_at: Utc::now(),
        last_login: None,
        deleted_at: None,
    }
}

pub fn auth_user(user: &User) -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: user.id,
        username: user.username.clone(),
        role_id: user.role_id,
    }
}

pub fn bearer_token(user: &User) -> String {
    TokenService::new(&test_auth_config())
        .issue(user)
        .unwrap()
        .access_token
}

/// Router over a fresh seeded in-memory database
pub fn test_server() -> (TestServer, Arc<InMemoryDb>) {
    let db = Arc::new(InMemoryDb::seeded());
    let repos = Repositories {
        users: db.clone(),
        dictionaries: db.clone(),
        tickets: db.clone(),
        history: db.clone(),
        comments: db.clone(),
        attachments: db.clone(),
    };
    let services = AppServices::new(
        repos,
        &test_auth_config(),
        &AttachmentConfig {
            max_size: TEST_MAX_ATTACHMENT_SIZE,
        },
    );

    let server = TestServer::new(api_router(&services, TEST_MAX_ATTACHMENT_SIZE * 2)).unwrap();
    (server, db)
}

struct StoredAttachment {
    meta: TicketAttachment,
    data: Vec<u8>,
}

/// Implements every repository trait over plain vectors
#[derive(Default)]
pub struct InMemoryDb {
    roles: Vec<Uuid>,
    departments: Vec<Department>,
    statuses: Vec<TicketStatus>,
    priorities: Vec<TicketPriority>,
    users: Mutex<Vec<User>>,
    tickets: Mutex<Vec<Ticket>>,
    history: Mutex<Vec<TicketHistory>>,
    comments: Mutex<Vec<TicketComment>>,
    attachments: Mutex<Vec<StoredAttachment>>,
}

impl InMemoryDb {
    /// Same reference data as the seed migration
    pub fn seeded() -> Self {
        let departments = [
            (1, "it", "IT"),
            (2, "hr", "Human Resources"),
            (3, "finance", "Finance"),
            (4, "support", "Customer Support"),
        ]
        .into_iter()
        .map(|(id, code, name)| Department {
            id,
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect();

        let statuses = [
            (1, "open", "Open"),
            (2, "in_progress", "In Progress"),
            (3, "resolved", "Resolved"),
            (4, "closed", "Closed"),
        ]
        .into_iter()
        .map(|(id, code, label)| TicketStatus {
            id,
            code: code.to_string(),
            label: label.to_string(),
        })
        .collect();

        // inserted out of order so sorting by level is observable
        let priorities = [
            (4, "critical", "Critical"),
            (1, "low", "Low"),
            (3, "high", "High"),
            (2, "medium", "Medium"),
        ]
        .into_iter()
        .map(|(id, code, label)| TicketPriority {
            id,
            code: code.to_string(),
            label: label.to_string(),
            level: id,
        })
        .collect();

        Self {
            roles: vec![ROLE_USER_ID, ROLE_ADMIN_ID],
            departments,
            statuses,
            priorities,
            ..Default::default()
        }
    }

    pub fn add_user(&self, username: &str, role_id: Uuid) -> User {
        let user = sample_user(username, role_id);
        self.users.lock().unwrap().push(user.clone());
        user
    }

    /// Open, medium priority IT ticket with a random title
    pub fn add_ticket(&self, creator_id: Uuid) -> Ticket {
        let now = Utc::now();
        let ticket = Ticket {
            id: Uuid::now_v7(),
            title: Sentence(3..6).fake(),
            description: Paragraph(1..3).fake(),
            status_id: 1,
            priority_id: 2,
            creator_id,
            assignee_id: None,
            department_id: 1,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.tickets.lock().unwrap().push(ticket.clone());
        self.history
            .lock()
            .unwrap()
            .push(FieldChange::created().into_history(ticket.id, creator_id, now));
        ticket
    }

    pub fn soft_delete_ticket(&self, id: Uuid) {
        if let Some(ticket) = self.tickets.lock().unwrap().iter_mut().find(|t| t.id == id) {
            ticket.deleted_at = Some(Utc::now());
        }
    }

    fn live_ticket(&self, id: Uuid) -> Option<Ticket> {
        self.tickets
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id && t.deleted_at.is_none())
            .cloned()
    }

    fn username(&self, id: Uuid) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.username.clone())
    }

    fn detail(&self, ticket: Ticket) -> TicketDetail {
        TicketDetail {
            status_label: self
                .statuses
                .iter()
                .find(|s| s.id == ticket.status_id)
                .map(|s| s.label.clone())
                .unwrap_or_default(),
            priority_label: self
                .priorities
                .iter()
                .find(|p| p.id == ticket.priority_id)
                .map(|p| p.label.clone())
                .unwrap_or_default(),
            department_name: self
                .departments
                .iter()
                .find(|d| d.id == ticket.department_id)
                .map(|d| d.name.clone())
                .unwrap_or_default(),
            creator_username: self.username(ticket.creator_id).unwrap_or_default(),
            assignee_username: ticket.assignee_id.and_then(|id| self.username(id)),
            ticket,
        }
    }
}

fn matches_filter(ticket: &Ticket, filter: &TicketFilter) -> bool {
    let text_matches = filter.q.as_deref().map_or(true, |q| {
        let haystack = format!("{} {}", ticket.title, ticket.description).to_lowercase();
        q.split_whitespace()
            .all(|word| haystack.contains(&word.to_lowercase()))
    });

    ticket.deleted_at.is_none()
        && filter.status_id.map_or(true, |id| ticket.status_id == id)
        && filter.priority_id.map_or(true, |id| ticket.priority_id == id)
        && filter.assignee_id.map_or(true, |id| ticket.assignee_id == Some(id))
        && filter.department_id.map_or(true, |id| ticket.department_id == id)
        && text_matches
}

#[async_trait]
impl UserRepository for InMemoryDb {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username && u.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id && u.deleted_at.is_none())
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(AppError::Conflict(
                "Username or email is already registered".to_string(),
            ));
        }

        let stored = User {
            id: user.id,
            username: user.username,
            password_hash: user.password_hash,
            email: user.email,
            role_id: user.role_id,
            department_id: user.department_id,
            created_at: Utc::now(),
            last_login: None,
            deleted_at: None,
        };
        users.push(stored.clone());
        Ok(stored)
    }

    async fn list_active(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.deleted_at.is_none())
            .cloned()
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn record_login(&self, id: Uuid) -> Result<()> {
        if let Some(user) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            user.last_login = Some(Utc::now());
        }
        Ok(())
    }

    async fn role_exists(&self, role_id: Uuid) -> Result<bool> {
        Ok(self.roles.contains(&role_id))
    }
}

#[async_trait]
impl DictionaryRepository for InMemoryDb {
    async fn list_departments(&self) -> Result<Vec<Department>> {
        Ok(self.departments.clone())
    }

    async fn list_statuses(&self) -> Result<Vec<TicketStatus>> {
        Ok(self.statuses.clone())
    }

    async fn list_priorities(&self) -> Result<Vec<TicketPriority>> {
        let mut priorities = self.priorities.clone();
        priorities.sort_by_key(|p| (p.level, p.id));
        Ok(priorities)
    }

    async fn department_exists(&self, id: i16) -> Result<bool> {
        Ok(self.departments.iter().any(|d| d.id == id))
    }

    async fn status_exists(&self, id: i16) -> Result<bool> {
        Ok(self.statuses.iter().any(|s| s.id == id))
    }

    async fn priority_exists(&self, id: i16) -> Result<bool> {
        Ok(self.priorities.iter().any(|p| p.id == id))
    }
}

#[async_trait]
impl TicketRepository for InMemoryDb {
    async fn create(&self, ticket: NewTicket) -> Result<Ticket> {
        let now = Utc::now();
        let created = Ticket {
            id: ticket.id,
            title: ticket.title,
            description: ticket.description,
            status_id: ticket.status_id,
            priority_id: ticket.priority_id,
            creator_id: ticket.creator_id,
            assignee_id: ticket.assignee_id,
            department_id: ticket.department_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.tickets.lock().unwrap().push(created.clone());
        self.history
            .lock()
            .unwrap()
            .push(FieldChange::created().into_history(created.id, created.creator_id, now));
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>> {
        Ok(self.live_ticket(id))
    }

    async fn find_detail(&self, id: Uuid) -> Result<Option<TicketDetail>> {
        Ok(self.live_ticket(id).map(|t| self.detail(t)))
    }

    async fn search(&self, filter: &TicketFilter) -> Result<(Vec<TicketDetail>, i64)> {
        let mut matches: Vec<Ticket> = self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .filter(|t| matches_filter(t, filter))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matches.len() as i64;
        let page = matches
            .into_iter()
            .skip(filter.offset.max(0) as usize)
            .take(filter.limit.max(0) as usize)
            .map(|t| self.detail(t))
            .collect();

        Ok((page, total))
    }

    async fn update_with_history(
        &self,
        id: Uuid,
        changes: TicketChanges,
        changed_by: Uuid,
    ) -> Result<Option<Ticket>> {
        let mut tickets = self.tickets.lock().unwrap();
        let Some(ticket) = tickets
            .iter_mut()
            .find(|t| t.id == id && t.deleted_at.is_none())
        else {
            return Ok(None);
        };

        let changed_at = Utc::now();
        let rows = audit::history_rows(id, changed_by, changed_at, audit::diff(ticket, &changes));

        ticket.title = changes.title;
        ticket.description = changes.description;
        ticket.status_id = changes.status_id;
        ticket.priority_id = changes.priority_id;
        ticket.assignee_id = changes.assignee_id;
        ticket.department_id = changes.department_id;
        ticket.updated_at = changed_at;
        let updated = ticket.clone();
        drop(tickets);

        self.history.lock().unwrap().extend(rows);
        Ok(Some(updated))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool> {
        let mut tickets = self.tickets.lock().unwrap();
        match tickets
            .iter_mut()
            .find(|t| t.id == id && t.deleted_at.is_none())
        {
            Some(ticket) => {
                ticket.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl TicketHistoryRepository for InMemoryDb {
    async fn list_by_ticket(&self, ticket_id: Uuid) -> Result<Vec<TicketHistory>> {
        let mut rows: Vec<TicketHistory> = self
            .history
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.ticket_id == ticket_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.changed_at.cmp(&a.changed_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }
}

#[async_trait]
impl CommentRepository for InMemoryDb {
    async fn list_by_ticket(&self, ticket_id: Uuid) -> Result<Vec<TicketComment>> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.ticket_id == ticket_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TicketComment>> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn create(&self, comment: NewComment) -> Result<TicketComment> {
        let stored = TicketComment {
            id: comment.id,
            ticket_id: comment.ticket_id,
            author_id: comment.author_id,
            content: comment.content,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.comments.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update_content(&self, id: Uuid, content: &str) -> Result<Option<TicketComment>> {
        let mut comments = self.comments.lock().unwrap();
        Ok(comments.iter_mut().find(|c| c.id == id).map(|comment| {
            comment.content = content.to_string();
            comment.updated_at = Some(Utc::now());
            comment.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut comments = self.comments.lock().unwrap();
        let before = comments.len();
        comments.retain(|c| c.id != id);
        Ok(comments.len() < before)
    }
}

#[async_trait]
impl AttachmentRepository for InMemoryDb {
    async fn list_by_ticket(&self, ticket_id: Uuid) -> Result<Vec<TicketAttachment>> {
        Ok(self
            .attachments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.meta.ticket_id == ticket_id)
            .map(|a| a.meta.clone())
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TicketAttachment>> {
        Ok(self
            .attachments
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.meta.id == id)
            .map(|a| a.meta.clone()))
    }

    async fn fetch_content(&self, id: Uuid) -> Result<Option<AttachmentContent>> {
        Ok(self
            .attachments
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.meta.id == id)
            .map(|a| AttachmentContent {
                filename: a.meta.filename.clone(),
                content_type: a.meta.content_type.clone(),
                file_data: a.data.clone(),
            }))
    }

    async fn create(&self, attachment: NewAttachment) -> Result<TicketAttachment> {
        let meta = TicketAttachment {
            id: attachment.id,
            ticket_id: attachment.ticket_id,
            filename: attachment.filename,
            content_type: attachment.content_type,
            size_bytes: attachment.file_data.len() as i64,
            uploaded_by: attachment.uploaded_by,
            uploaded_at: Utc::now(),
        };
        self.attachments.lock().unwrap().push(StoredAttachment {
            meta: meta.clone(),
            data: attachment.file_data,
        });
        Ok(meta)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut attachments = self.attachments.lock().unwrap();
        let before = attachments.len();
        attachments.retain(|a| a.meta.id != id);
        Ok(attachments.len() < before)
    }
}
