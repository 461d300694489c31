pub mod history_dto;
pub mod ticket_dto;

pub use history_dto::*;
pub use ticket_dto::*;
