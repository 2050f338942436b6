use edupath_auth::{Permission, ScopedRole};
use edupath_core::{Branch, DomainResult, EntityKind};

use crate::policy::{require, same_branch, unsupported};
use crate::{Action, Decision, Policy, Subject};

/// Branches: everyone attached to a branch can read it; only its branch admin changes it.
#[derive(Debug, Default, Clone, Copy)]
pub struct BranchPolicy;

impl Policy for BranchPolicy {
    type Record = Branch;

    const ENTITY: EntityKind = EntityKind::Branch;

    fn check(
        &self,
        subject: &Subject<'_>,
        action: Action,
        record: Option<&Branch>,
    ) -> DomainResult<Decision> {
        let role = subject.scoped_role();
        let decision = match action {
            Action::ViewAny => Decision::when(
                matches!(
                    role,
                    Some(ScopedRole::BranchAdmin(_) | ScopedRole::Agent(_) | ScopedRole::Employee(_))
                ),
                "actor is attached to a branch",
                "actor is not attached to a branch",
            ),
            Action::View => {
                let branch = require(Self::ENTITY, action, record)?;
                match role {
                    Some(r @ (ScopedRole::BranchAdmin(_) | ScopedRole::Agent(_) | ScopedRole::Employee(_))) => {
                        Decision::when(
                            same_branch(Some(branch.id), r.branch_id()),
                            "branch is the actor's own",
                            "branch is not the actor's own",
                        )
                    }
                    _ => Decision::deny("no rule grants viewing branches"),
                }
            }
            Action::Update | Action::Delete => {
                let branch = require(Self::ENTITY, action, record)?;
                match role {
                    Some(ScopedRole::BranchAdmin(e)) => Decision::when(
                        same_branch(Some(branch.id), e.branch_id),
                        "actor administers this branch",
                        "actor administers another branch",
                    ),
                    _ => Decision::deny("only the branch admin changes a branch"),
                }
            }
            Action::Create => Decision::when(
                subject.has_permission(Permission::ManageBranches),
                "actor holds manage_branches",
                "actor lacks manage_branches",
            ),
            Action::Restore | Action::ForceDelete => {
                require(Self::ENTITY, action, record)?;
                Decision::deny("only super admins restore or purge branches")
            }
            Action::Verify | Action::Download | Action::AccessPanel => {
                return Err(unsupported(Self::ENTITY, action));
            }
        };
        Ok(decision)
    }
}
