//! `edupath-auth`: roles, permission grants and actor profile resolution.
//!
//! This crate is intentionally decoupled from HTTP and storage; storage is
//! reached only through the [`ProfileSource`] and [`PermissionGrants`] traits.

pub mod catalogue;
pub mod permissions;
pub mod principal;
pub mod resolver;
pub mod roles;

pub use catalogue::RoleCatalogue;
pub use permissions::Permission;
pub use principal::{ActorProfile, AgentLink, EmployeeLink, ScopedRole, StudentLink};
pub use resolver::{NoGrants, PermissionGrants, ProfileSource, resolve_profile};
pub use roles::Role;
