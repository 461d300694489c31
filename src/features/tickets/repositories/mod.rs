pub mod ticket_history_repository;
pub mod ticket_repository;

pub use ticket_history_repository::{PgTicketHistoryRepository, TicketHistoryRepository};
pub use ticket_repository::{PgTicketRepository, TicketRepository};
