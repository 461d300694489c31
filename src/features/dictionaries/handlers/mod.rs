pub mod dictionary_handler;

pub use dictionary_handler::*;
