//! Note and settings persistence backends.

pub mod inmemory;
pub mod json;

pub use inmemory::InMemoryRepository;
pub use json::JsonFileRepository;
