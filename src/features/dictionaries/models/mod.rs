mod department;
mod ticket_priority;
mod ticket_status;

pub use department::Department;
pub use ticket_priority::TicketPriority;
pub use ticket_status::TicketStatus;
