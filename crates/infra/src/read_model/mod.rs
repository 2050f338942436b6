//! Scoped record storage.

pub mod repository;

pub use repository::{InMemoryRepository, Repository};
