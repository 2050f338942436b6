use edupath_auth::ActorProfile;
use edupath_core::{DomainError, DomainResult};

/// Per-request access context: the resolved actor, or none.
///
/// Built fresh for every request and never shared across requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestContext {
    actor: Option<ActorProfile>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { actor: None }
    }

    pub fn for_actor(profile: ActorProfile) -> Self {
        Self {
            actor: Some(profile),
        }
    }

    pub fn actor(&self) -> Option<&ActorProfile> {
        self.actor.as_ref()
    }

    /// The actor, or `Unauthenticated` when the request carries none.
    pub fn require_actor(&self) -> DomainResult<&ActorProfile> {
        self.actor.as_ref().ok_or(DomainError::Unauthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.actor.is_some()
    }
}
