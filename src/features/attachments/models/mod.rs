mod attachment;

pub use attachment::{AttachmentContent, NewAttachment, TicketAttachment};
