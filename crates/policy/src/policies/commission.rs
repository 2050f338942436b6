use edupath_auth::ScopedRole;
use edupath_core::{Commission, DomainResult, EntityKind};

use crate::policy::{require, same_branch, unsupported};
use crate::{Action, Decision, Policy, Subject};

#[derive(Debug, Default, Clone, Copy)]
pub struct CommissionPolicy;

impl CommissionPolicy {
    fn branch_or_agent_match(role: Option<ScopedRole<'_>>, commission: &Commission) -> Decision {
        match role {
            Some(ScopedRole::BranchAdmin(e) | ScopedRole::Employee(e)) => Decision::when(
                same_branch(commission.branch_id, e.branch_id),
                "commission belongs to actor's branch",
                "commission belongs to another branch",
            ),
            Some(ScopedRole::Agent(a)) => Decision::when(
                commission.agent_id == Some(a.id),
                "commission is owed to the actor",
                "commission is owed to another agent",
            ),
            _ => Decision::deny("no rule grants access to commissions"),
        }
    }
}

impl Policy for CommissionPolicy {
    type Record = Commission;

    const ENTITY: EntityKind = EntityKind::Commission;

    fn check(
        &self,
        subject: &Subject<'_>,
        action: Action,
        record: Option<&Commission>,
    ) -> DomainResult<Decision> {
        let role = subject.scoped_role();
        let decision = match action {
            Action::ViewAny => Decision::when(
                matches!(
                    role,
                    Some(ScopedRole::BranchAdmin(_) | ScopedRole::Agent(_) | ScopedRole::Employee(_))
                ),
                "actor has a commission-visible role",
                "actor has no commission-visible role",
            ),
            Action::View | Action::Update => {
                let commission = require(Self::ENTITY, action, record)?;
                Self::branch_or_agent_match(role, commission)
            }
            Action::Delete => {
                let commission = require(Self::ENTITY, action, record)?;
                match role {
                    Some(ScopedRole::Agent(_)) => Decision::deny("agents cannot delete commissions"),
                    other => Self::branch_or_agent_match(other, commission),
                }
            }
            Action::Create => Decision::when(
                matches!(role, Some(ScopedRole::BranchAdmin(_))),
                "branch admins record commissions",
                "only branch admins record commissions",
            ),
            Action::Restore | Action::ForceDelete => {
                require(Self::ENTITY, action, record)?;
                Decision::deny("only super admins restore or purge commissions")
            }
            Action::Verify | Action::Download | Action::AccessPanel => {
                return Err(unsupported(Self::ENTITY, action));
            }
        };
        Ok(decision)
    }
}
