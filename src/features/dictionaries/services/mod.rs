pub mod dictionary_service;

pub use dictionary_service::DictionaryService;
