pub mod dictionary_dto;

pub use dictionary_dto::*;
