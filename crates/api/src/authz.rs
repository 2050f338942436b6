//! Authorization guard at the operation boundary.
//!
//! Policies answer yes/no; this turns a "no" into `Forbidden` for callers
//! that must stop before performing an operation.

use edupath_auth::PermissionGrants;
use edupath_core::{DomainError, EntityKind};
use edupath_policy::{Action, Gate, RecordRef, Subject};

use crate::context::RequestContext;
use crate::errors::AccessResult;

/// Require that the request's actor may perform `action`.
///
/// Call this before the operation runs; an anonymous request fails with
/// `Unauthenticated`, a denied one with `Forbidden`.
pub fn authorize_action(
    gate: &Gate,
    grants: &dyn PermissionGrants,
    ctx: &RequestContext,
    action: Action,
    entity: EntityKind,
    record: Option<RecordRef<'_>>,
) -> AccessResult<()> {
    let profile = ctx.require_actor()?;
    let subject = Subject::new(profile, grants);
    let decision = gate.decide(&subject, action, entity, record)?;
    if decision.granted {
        Ok(())
    } else {
        Err(DomainError::Forbidden.into())
    }
}

#[cfg(test)]
mod tests {
    use edupath_auth::{ActorProfile, EmployeeLink, NoGrants, Role};
    use edupath_core::{ActorId, Branch, BranchId, EmployeeId};
    use edupath_policy::AsRecord;

    use super::*;

    #[test]
    fn denied_and_anonymous_requests_fail_distinctly() {
        let branch = Branch {
            id: BranchId::new(2),
            name: "Karachi".into(),
        };
        let gate = Gate::default();
        let staff = RequestContext::for_actor(
            ActorProfile::new(ActorId::new())
                .with_role(Role::Employee)
                .with_employee(EmployeeLink {
                    id: EmployeeId::new(1),
                    branch_id: Some(BranchId::new(2)),
                }),
        );

        assert!(
            authorize_action(&gate, &NoGrants, &staff, Action::View, EntityKind::Branch, Some(branch.as_record()))
                .is_ok()
        );

        let err = authorize_action(&gate, &NoGrants, &staff, Action::Update, EntityKind::Branch, Some(branch.as_record()))
            .unwrap_err();
        assert_eq!(err.http_status(), 403);

        let err = authorize_action(
            &gate,
            &NoGrants,
            &RequestContext::anonymous(),
            Action::View,
            EntityKind::Branch,
            Some(branch.as_record()),
        )
        .unwrap_err();
        assert_eq!(err.http_status(), 401);
    }
}
