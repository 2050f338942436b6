//! Actor profile resolution.
//!
//! Profiles are resolved fresh for every request; nothing here caches, so a
//! role or profile change is visible to the very next decision.

use std::collections::BTreeSet;
use std::sync::Arc;

use edupath_core::ActorId;

use crate::principal::{ActorProfile, AgentLink, EmployeeLink, StudentLink};
use crate::{Permission, Role};

/// Storage-backed source of role assignments and profile links.
pub trait ProfileSource: Send + Sync {
    /// Raw role names as stored (may contain legacy spellings).
    fn role_names(&self, actor: ActorId) -> Result<Vec<String>, anyhow::Error>;
    fn employee_for(&self, actor: ActorId) -> Result<Option<EmployeeLink>, anyhow::Error>;
    fn agent_for(&self, actor: ActorId) -> Result<Option<AgentLink>, anyhow::Error>;
    fn student_for(&self, actor: ActorId) -> Result<Option<StudentLink>, anyhow::Error>;
}

impl<S> ProfileSource for Arc<S>
where
    S: ProfileSource + ?Sized,
{
    fn role_names(&self, actor: ActorId) -> Result<Vec<String>, anyhow::Error> {
        (**self).role_names(actor)
    }

    fn employee_for(&self, actor: ActorId) -> Result<Option<EmployeeLink>, anyhow::Error> {
        (**self).employee_for(actor)
    }

    fn agent_for(&self, actor: ActorId) -> Result<Option<AgentLink>, anyhow::Error> {
        (**self).agent_for(actor)
    }

    fn student_for(&self, actor: ActorId) -> Result<Option<StudentLink>, anyhow::Error> {
        (**self).student_for(actor)
    }
}

/// Flat `(actor, permission) -> bool` lookup.
pub trait PermissionGrants: Send + Sync {
    fn is_granted(&self, actor: ActorId, permission: Permission) -> bool;
}

impl<G> PermissionGrants for Arc<G>
where
    G: PermissionGrants + ?Sized,
{
    fn is_granted(&self, actor: ActorId, permission: Permission) -> bool {
        (**self).is_granted(actor, permission)
    }
}

/// Grant store that grants nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGrants;

impl PermissionGrants for NoGrants {
    fn is_granted(&self, _actor: ActorId, _permission: Permission) -> bool {
        false
    }
}

/// Resolve roles and every profile link for an already-authenticated actor.
///
/// Role names are normalized into [`Role`]; names this layer does not know
/// are dropped (they can never grant anything).
pub fn resolve_profile<S>(source: &S, actor: ActorId) -> Result<ActorProfile, anyhow::Error>
where
    S: ProfileSource + ?Sized,
{
    let mut roles = BTreeSet::new();
    for name in source.role_names(actor)? {
        match Role::parse(&name) {
            Some(role) => {
                roles.insert(role);
            }
            None => tracing::warn!(actor = %actor, role = %name, "ignoring unknown role name"),
        }
    }

    let profile = ActorProfile {
        actor_id: actor,
        roles,
        employee: source.employee_for(actor)?,
        agent: source.agent_for(actor)?,
        student: source.student_for(actor)?,
    };

    let links = [
        profile.employee.is_some(),
        profile.agent.is_some(),
        profile.student.is_some(),
    ]
    .into_iter()
    .filter(|linked| *linked)
    .count();
    if links > 1 {
        tracing::debug!(actor = %actor, links, "actor has more than one linked profile");
    }

    Ok(profile)
}
