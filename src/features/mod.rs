pub mod attachments;
pub mod auth;
pub mod comments;
pub mod dictionaries;
pub mod tickets;
pub mod users;
