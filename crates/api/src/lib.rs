//! Request-facing facade over profile resolution, scoping and policies.
//!
//! Every call starts from a [`RequestContext`]; nothing is cached between
//! requests, so role and profile changes apply to the next call.

pub mod authz;
pub mod binding;
pub mod config;
pub mod context;
pub mod errors;
pub mod service;

pub use binding::resolve_bound;
pub use config::AccessConfig;
pub use context::RequestContext;
pub use errors::{AccessError, AccessResult};
pub use service::AccessService;
