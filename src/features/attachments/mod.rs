//! Files attached to tickets, stored in the database.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/v1/tickets/{id}/attachments` | List attachment metadata |
//! | POST | `/api/v1/tickets/{id}/attachments` | Upload (multipart `file`) |
//! | GET | `/api/v1/tickets/{id}/attachments/{attachment_id}` | Metadata |
//! | GET | `/api/v1/tickets/{id}/attachments/{attachment_id}/download` | Raw bytes |
//! | DELETE | `/api/v1/tickets/{id}/attachments/{attachment_id}` | Delete (uploader or admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{AttachmentRepository, PgAttachmentRepository};
pub use services::AttachmentService;
