//! Policy trait and the shared super-admin bypass.

use edupath_core::{BranchId, DomainError, DomainResult, EntityKind};

use crate::{Action, Decision, Subject};

/// Per-entity allow/deny rules.
///
/// Policies are pure: they look at the subject and (optionally) one record
/// and never touch storage.
pub trait Policy: Send + Sync {
    type Record;

    const ENTITY: EntityKind;

    fn check(
        &self,
        subject: &Subject<'_>,
        action: Action,
        record: Option<&Self::Record>,
    ) -> DomainResult<Decision>;
}

/// Wraps a policy so super admins are allowed before any rule runs.
///
/// Every policy registered in the [`Gate`](crate::Gate) is wrapped, so the
/// bypass exists in exactly one place.
#[derive(Debug, Default, Clone)]
pub struct AdminBypass<P>(P);

impl<P> AdminBypass<P> {
    pub fn new(inner: P) -> Self {
        Self(inner)
    }

    pub fn inner(&self) -> &P {
        &self.0
    }
}

impl<P: Policy> Policy for AdminBypass<P> {
    type Record = P::Record;

    const ENTITY: EntityKind = P::ENTITY;

    fn check(
        &self,
        subject: &Subject<'_>,
        action: Action,
        record: Option<&Self::Record>,
    ) -> DomainResult<Decision> {
        if subject.profile().is_super_admin() {
            return Ok(Decision::allow("super admin bypass"));
        }
        self.0.check(subject, action, record)
    }
}

/// Unwrap the record an action needs; a missing one is a programmer error.
pub(crate) fn require<R>(
    entity: EntityKind,
    action: Action,
    record: Option<&R>,
) -> DomainResult<&R> {
    record.ok_or_else(|| {
        DomainError::configuration(format!(
            "action '{action}' on '{entity}' requires a record"
        ))
    })
}

pub(crate) fn unsupported(entity: EntityKind, action: Action) -> DomainError {
    DomainError::configuration(format!("policy for '{entity}' does not define action '{action}'"))
}

/// Both sides known and equal; a missing branch never matches.
pub(crate) fn same_branch(record: Option<BranchId>, actor: Option<BranchId>) -> bool {
    matches!((record, actor), (Some(r), Some(a)) if r == a)
}
