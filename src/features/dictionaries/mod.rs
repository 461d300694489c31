//! Static reference data (dictionaries).
//!
//! Departments, ticket statuses and ticket priorities are seeded by migration
//! and never written through the API. Other features use [`DictionaryService`]
//! to validate the ids they receive.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/v1/departments` | List departments |
//! | GET | `/api/v1/ticket_statuses` | List ticket statuses |
//! | GET | `/api/v1/ticket_priorities` | List ticket priorities |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{DictionaryRepository, PgDictionaryRepository};
pub use services::DictionaryService;
