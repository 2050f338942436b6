//! Infrastructure layer: storage adapters behind the scoping and profile traits.
//!
//! Only in-memory adapters live here; a SQL backend would translate
//! [`edupath_scoping::Query`] predicates into `WHERE` clauses the same way.

pub mod directory;
pub mod read_model;

pub use directory::InMemoryDirectory;
pub use read_model::{InMemoryRepository, Repository};
