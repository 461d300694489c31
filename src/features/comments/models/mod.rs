mod comment;

pub use comment::{NewComment, TicketComment};
