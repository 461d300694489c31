//! Comments on tickets.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/v1/tickets/{id}/comments` | List comments |
//! | POST | `/api/v1/tickets/{id}/comments` | Add a comment |
//! | PUT | `/api/v1/tickets/{id}/comments/{comment_id}` | Edit (author or admin) |
//! | DELETE | `/api/v1/tickets/{id}/comments/{comment_id}` | Delete (author or admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{CommentRepository, PgCommentRepository};
pub use services::CommentService;
