pub mod dictionary_repository;

pub use dictionary_repository::{DictionaryRepository, PgDictionaryRepository};
