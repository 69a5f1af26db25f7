//! Storage adapters implementing the profile repository port.

mod in_memory_repository;
mod json_file_repository;

pub use in_memory_repository::InMemoryProfileRepository;
pub use json_file_repository::JsonFileProfileRepository;
