//! `edupath-scoping`: visibility scope engine.
//!
//! Decides which rows of an entity type an actor may see and expresses the
//! decision as a predicate on a composable [`Query`].

pub mod engine;
pub mod entity;
pub mod filter;
pub mod query;

pub use engine::{ScopeConfig, ScopeEngine, UnauthenticatedScope, apply_visibility_scope};
pub use entity::ScopedEntity;
pub use filter::{ScopeField, ScopeFilter};
pub use query::{Predicate, Query};
