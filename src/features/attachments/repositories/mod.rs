pub mod attachment_repository;

pub use attachment_repository::{AttachmentRepository, PgAttachmentRepository};
