use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::attachments::models::TicketAttachment;

/// Multipart form accepted by the upload endpoint
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadAttachmentDto {
    /// The file to attach
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Attachment metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttachmentResponseDto {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_by: Uuid,
    pub uploaded_at: DateTime<Utc>,
}

impl From<TicketAttachment> for AttachmentResponseDto {
    fn from(a: TicketAttachment) -> Self {
        Self {
            id: a.id,
            ticket_id: a.ticket_id,
            filename: a.filename,
            content_type: a.content_type,
            size_bytes: a.size_bytes,
            uploaded_by: a.uploaded_by,
            uploaded_at: a.uploaded_at,
        }
    }
}

/// File received from a multipart upload, before validation
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    pub filename: String,
    /// As declared by the client, if any
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

pub const DEFAULT_FILENAME: &str = "unnamed";
const OCTET_STREAM: &str = "application/octet-stream";

/// Content type derived from the file extension, for clients that send none
pub fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        "txt" | "log" => "text/plain",
        _ => OCTET_STREAM,
    }
}

/// Declared type unless it is missing or the generic octet-stream
pub fn resolve_content_type(filename: &str, declared: Option<&str>) -> String {
    match declared.map(str::trim) {
        Some(ct) if !ct.is_empty() && ct != OCTET_STREAM => ct.to_string(),
        _ => content_type_for(filename).to_string(),
    }
}

/// Keeps only the final path component and drops characters unsafe in headers
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let cleaned: String = base
        .chars()
        .filter(|c| !c.is_control() && *c != '"')
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        cleaned.chars().take(255).collect()
    }
}
