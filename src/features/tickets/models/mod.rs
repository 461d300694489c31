mod ticket;
mod ticket_history;

pub use ticket::{NewTicket, Ticket, TicketChanges, TicketDetail, TicketFilter};
pub use ticket_history::TicketHistory;
