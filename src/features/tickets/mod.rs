//! Tickets: create, search, update with audit history, soft delete.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/v1/tickets` | Search tickets |
//! | POST | `/api/v1/tickets` | Create a ticket |
//! | GET | `/api/v1/tickets/{id}` | Get a ticket |
//! | PUT | `/api/v1/tickets/{id}` | Update a ticket |
//! | DELETE | `/api/v1/tickets/{id}` | Delete a ticket (creator or admin) |
//! | GET | `/api/v1/tickets/{id}/history` | Change history |

pub mod audit;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{
    PgTicketHistoryRepository, PgTicketRepository, TicketHistoryRepository, TicketRepository,
};
pub use services::TicketService;
