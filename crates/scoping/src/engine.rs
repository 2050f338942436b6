//! Visibility scope engine.
//!
//! Turns (actor, entity type) into a [`ScopeFilter`] and appends it to a
//! caller's [`Query`]. Scoping is explicit: every list read must go through
//! [`ScopeEngine::apply`] before it reaches storage.
//!
//! Rules, first match wins:
//!
//! 1. super admin → unrestricted
//! 2. governing role (branch_admin → agent → employee → student, each
//!    requiring its linked profile):
//!    - branch_admin / employee: `branch_id = employee.branch_id`, else entity hook
//!    - agent: `agent_id = agent.id`, else `branch_id = agent.branch_id`, else entity hook
//!    - student: `id = student.id` on students, deny on everything else
//! 3. anything else → deny

use serde::Deserialize;

use edupath_auth::{ActorProfile, ScopedRole};
use edupath_core::{DomainError, DomainResult, EntityKind};

use crate::entity::ScopedEntity;
use crate::filter::{ScopeField, ScopeFilter};
use crate::query::Query;

/// What an unauthenticated read is scoped to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnauthenticatedScope {
    /// Match nothing.
    #[default]
    DenyAll,
    /// Leave the query untouched (the session layer is trusted to block first).
    PassThrough,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    pub unauthenticated: UnauthenticatedScope,
    /// Reject entities that need an override hook but do not provide one.
    pub strict_overrides: bool,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            unauthenticated: UnauthenticatedScope::DenyAll,
            strict_overrides: cfg!(debug_assertions),
        }
    }
}

/// Stateless scope engine; cheap to copy and share.
#[derive(Debug, Copy, Clone, Default)]
pub struct ScopeEngine {
    config: ScopeConfig,
}

impl ScopeEngine {
    pub fn new(config: ScopeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScopeConfig {
        &self.config
    }

    /// Append the actor's visibility scope for `E` to `query`.
    pub fn apply<E: ScopedEntity>(
        &self,
        actor: Option<&ActorProfile>,
        query: Query<E>,
    ) -> DomainResult<Query<E>> {
        let scope = self.scope_for::<E>(actor)?;
        Ok(query.and_scope(scope))
    }

    /// Compute the scope filter for `E` without touching a query.
    pub fn scope_for<E: ScopedEntity>(
        &self,
        actor: Option<&ActorProfile>,
    ) -> DomainResult<ScopeFilter> {
        let Some(actor) = actor else {
            let scope = match self.config.unauthenticated {
                UnauthenticatedScope::DenyAll => ScopeFilter::DenyAll,
                UnauthenticatedScope::PassThrough => ScopeFilter::Unrestricted,
            };
            tracing::debug!(entity = %E::KIND, %scope, "scoping unauthenticated read");
            return Ok(scope);
        };

        if actor.is_super_admin() {
            return Ok(ScopeFilter::Unrestricted);
        }

        let Some(role) = actor.scoped_role() else {
            tracing::debug!(
                actor = %actor.actor_id,
                entity = %E::KIND,
                "no role/profile combination applies; denying"
            );
            return Ok(ScopeFilter::DenyAll);
        };

        let scope = match role {
            ScopedRole::BranchAdmin(employee) | ScopedRole::Employee(employee) => {
                if E::has_field(ScopeField::BranchId) {
                    ScopeFilter::eq_or_deny(ScopeField::BranchId, employee.branch_id)
                } else {
                    self.specific_scope::<E>(&role)?
                }
            }
            ScopedRole::Agent(agent) => {
                if E::has_field(ScopeField::AgentId) {
                    ScopeFilter::eq(ScopeField::AgentId, agent.id)
                } else if E::has_field(ScopeField::BranchId) {
                    ScopeFilter::eq_or_deny(ScopeField::BranchId, agent.branch_id)
                } else {
                    self.specific_scope::<E>(&role)?
                }
            }
            ScopedRole::Student(student) => {
                if E::KIND == EntityKind::Student {
                    ScopeFilter::eq(ScopeField::Id, student.id)
                } else {
                    ScopeFilter::DenyAll
                }
            }
        };

        tracing::debug!(
            actor = %actor.actor_id,
            role = %role.role(),
            entity = %E::KIND,
            %scope,
            "visibility scope resolved"
        );
        Ok(scope)
    }

    fn specific_scope<E: ScopedEntity>(&self, role: &ScopedRole<'_>) -> DomainResult<ScopeFilter> {
        if let Some(scope) = E::specific_scope(role) {
            return Ok(scope);
        }
        if self.config.strict_overrides {
            return Err(DomainError::configuration(format!(
                "entity '{}' has neither branch_id nor agent_id and registers no scope override",
                E::KIND
            )));
        }
        tracing::warn!(
            entity = %E::KIND,
            role = %role.role(),
            "no scope override registered; falling back to unrestricted"
        );
        Ok(ScopeFilter::Unrestricted)
    }
}

/// Scope `query` with the default engine configuration.
pub fn apply_visibility_scope<E: ScopedEntity>(
    actor: Option<&ActorProfile>,
    query: Query<E>,
) -> DomainResult<Query<E>> {
    ScopeEngine::default().apply(actor, query)
}
