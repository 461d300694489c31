use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::attachments::dtos::{
    resolve_content_type, sanitize_filename, AttachmentResponseDto, AttachmentUpload,
};
use crate::features::attachments::models::{AttachmentContent, NewAttachment, TicketAttachment};
use crate::features::attachments::repositories::AttachmentRepository;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::tickets::repositories::TicketRepository;

/// Service for files attached to live tickets
pub struct AttachmentService {
    attachments: Arc<dyn AttachmentRepository>,
    tickets: Arc<dyn TicketRepository>,
    max_size: usize,
}

impl AttachmentService {
    pub fn new(
        attachments: Arc<dyn AttachmentRepository>,
        tickets: Arc<dyn TicketRepository>,
        max_size: usize,
    ) -> Self {
        Self {
            attachments,
            tickets,
            max_size,
        }
    }

    async fn ensure_ticket(&self, ticket_id: Uuid) -> Result<()> {
        match self.tickets.find_by_id(ticket_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("Ticket '{}' not found", ticket_id))),
        }
    }

    async fn load(&self, ticket_id: Uuid, attachment_id: Uuid) -> Result<TicketAttachment> {
        self.ensure_ticket(ticket_id).await?;

        self.attachments
            .find_by_id(attachment_id)
            .await?
            .filter(|a| a.ticket_id == ticket_id)
            .ok_or_else(|| AppError::NotFound(format!("Attachment '{}' not found", attachment_id)))
    }

    pub async fn list(&self, ticket_id: Uuid) -> Result<Vec<AttachmentResponseDto>> {
        self.ensure_ticket(ticket_id).await?;

        let attachments = self.attachments.list_by_ticket(ticket_id).await?;
        Ok(attachments.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, ticket_id: Uuid, attachment_id: Uuid) -> Result<AttachmentResponseDto> {
        Ok(self.load(ticket_id, attachment_id).await?.into())
    }

    pub async fn download(
        &self,
        ticket_id: Uuid,
        attachment_id: Uuid,
    ) -> Result<AttachmentContent> {
        self.load(ticket_id, attachment_id).await?;

        self.attachments
            .fetch_content(attachment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Attachment '{}' not found", attachment_id)))
    }

    pub async fn upload(
        &self,
        user: &AuthenticatedUser,
        ticket_id: Uuid,
        upload: AttachmentUpload,
    ) -> Result<AttachmentResponseDto> {
        if upload.data.is_empty() {
            return Err(AppError::BadRequest("File is empty".to_string()));
        }
        if upload.data.len() > self.max_size {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {} bytes",
                self.max_size
            )));
        }

        self.ensure_ticket(ticket_id).await?;

        let filename = sanitize_filename(&upload.filename);
        let content_type = resolve_content_type(&filename, upload.content_type.as_deref());

        let attachment = self
            .attachments
            .create(NewAttachment {
                id: Uuid::now_v7(),
                ticket_id,
                filename,
                content_type,
                file_data: upload.data,
                uploaded_by: user.user_id,
            })
            .await?;

        tracing::info!(
            "Attachment uploaded: id={}, ticket_id={}, size={}",
            attachment.id,
            ticket_id,
            attachment.size_bytes
        );

        Ok(attachment.into())
    }

    /// Only the uploader or an admin may delete
    pub async fn delete(
        &self,
        user: &AuthenticatedUser,
        ticket_id: Uuid,
        attachment_id: Uuid,
    ) -> Result<()> {
        let attachment = self.load(ticket_id, attachment_id).await?;

        if !user.can_manage(attachment.uploaded_by) {
            return Err(AppError::Forbidden(
                "Only the uploader or an admin can delete this attachment".to_string(),
            ));
        }

        if !self.attachments.delete(attachment_id).await? {
            return Err(AppError::NotFound(format!(
                "Attachment '{}' not found",
                attachment_id
            )));
        }

        tracing::info!(
            "Attachment deleted: id={}, ticket_id={}, by={}",
            attachment_id,
            ticket_id,
            user.user_id
        );
        Ok(())
    }
}
