//! Access facade: profile resolution → visibility scope → policy.

use std::sync::Arc;

use edupath_auth::{PermissionGrants, ProfileSource, resolve_profile};
use edupath_core::{ActorId, EntityKind};
use edupath_infra::Repository;
use edupath_policy::{Action, AsRecord, Gate, PolicyExplanation, RecordRef, Subject};
use edupath_scoping::{Query, ScopeEngine, ScopedEntity};

use crate::authz::authorize_action;
use crate::binding::resolve_bound;
use crate::config::AccessConfig;
use crate::context::RequestContext;
use crate::errors::AccessResult;

/// Composes the access layer around its storage collaborators.
///
/// Holds no per-request state; share one instance across requests.
pub struct AccessService {
    profiles: Arc<dyn ProfileSource>,
    grants: Arc<dyn PermissionGrants>,
    scopes: ScopeEngine,
    gate: Gate,
}

impl core::fmt::Debug for AccessService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AccessService")
            .field("scopes", &self.scopes)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

impl AccessService {
    pub fn new(
        config: AccessConfig,
        profiles: Arc<dyn ProfileSource>,
        grants: Arc<dyn PermissionGrants>,
    ) -> Self {
        Self {
            profiles,
            grants,
            scopes: ScopeEngine::new(config.scope_config()),
            gate: Gate::new(config.policy_config()),
        }
    }

    pub fn scopes(&self) -> &ScopeEngine {
        &self.scopes
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    /// Resolve the request's actor (if any) into a fresh context.
    pub fn context(&self, actor: Option<ActorId>) -> AccessResult<RequestContext> {
        match actor {
            None => Ok(RequestContext::anonymous()),
            Some(id) => Ok(RequestContext::for_actor(resolve_profile(
                self.profiles.as_ref(),
                id,
            )?)),
        }
    }

    /// Append the actor's visibility scope to `query`.
    pub fn scope<E: ScopedEntity>(
        &self,
        ctx: &RequestContext,
        query: Query<E>,
    ) -> AccessResult<Query<E>> {
        Ok(self.scopes.apply(ctx.actor(), query)?)
    }

    /// Scoped list read.
    pub fn list<E, R>(&self, ctx: &RequestContext, repo: &R, query: Query<E>) -> AccessResult<Vec<E>>
    where
        E: ScopedEntity,
        R: Repository<E> + ?Sized,
    {
        let query = self.scope(ctx, query)?;
        Ok(repo.fetch(&query))
    }

    /// Route binding for a raw identifier.
    pub fn bind<E, R>(&self, ctx: &RequestContext, repo: &R, raw: &str) -> AccessResult<E>
    where
        E: ScopedEntity,
        R: Repository<E> + ?Sized,
    {
        Ok(resolve_bound(&self.scopes, repo, ctx.actor(), raw)?)
    }

    /// Yes/no policy answer. Anonymous requests are never allowed.
    pub fn authorize(
        &self,
        ctx: &RequestContext,
        action: Action,
        entity: EntityKind,
        record: Option<RecordRef<'_>>,
    ) -> AccessResult<bool> {
        let Some(profile) = ctx.actor() else {
            return Ok(false);
        };
        let subject = Subject::new(profile, self.grants.as_ref());
        Ok(self.gate.authorize(&subject, action, entity, record)?)
    }

    pub fn allows<R: AsRecord>(
        &self,
        ctx: &RequestContext,
        action: Action,
        record: Option<&R>,
    ) -> AccessResult<bool> {
        self.authorize(ctx, action, R::KIND, record.map(AsRecord::as_record))
    }

    /// Like [`AccessService::authorize`] but fails with `Forbidden` on a denial.
    pub fn ensure(
        &self,
        ctx: &RequestContext,
        action: Action,
        entity: EntityKind,
        record: Option<RecordRef<'_>>,
    ) -> AccessResult<()> {
        authorize_action(&self.gate, self.grants.as_ref(), ctx, action, entity, record)
    }

    /// Bind a record and check `action` on it in one step.
    pub fn bind_authorized<E, R>(
        &self,
        ctx: &RequestContext,
        repo: &R,
        raw: &str,
        action: Action,
    ) -> AccessResult<E>
    where
        E: ScopedEntity + AsRecord,
        R: Repository<E> + ?Sized,
    {
        let record = self.bind(ctx, repo, raw)?;
        self.ensure(ctx, action, E::KIND, Some(record.as_record()))?;
        Ok(record)
    }

    pub fn can_access_panel(&self, ctx: &RequestContext) -> bool {
        ctx.actor().is_some_and(|profile| {
            self.gate
                .can_access_panel(&Subject::new(profile, self.grants.as_ref()))
        })
    }

    pub fn explain(
        &self,
        ctx: &RequestContext,
        action: Action,
        entity: EntityKind,
        record: Option<RecordRef<'_>>,
    ) -> AccessResult<PolicyExplanation> {
        let profile = ctx.require_actor()?;
        let subject = Subject::new(profile, self.grants.as_ref());
        Ok(self.gate.explain(&subject, action, entity, record)?)
    }
}
