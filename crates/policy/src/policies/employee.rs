use edupath_auth::{Permission, ScopedRole};
use edupath_core::{DomainResult, Employee, EntityKind};

use crate::policy::{require, same_branch, unsupported};
use crate::{Action, Decision, Policy, Subject};

/// Employees: branch admins manage their branch's staff; staff read their
/// branch and edit only themselves.
///
/// Agents may read the staff of their own branch, matching the list scope
/// they get for employees.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmployeePolicy;

impl Policy for EmployeePolicy {
    type Record = Employee;

    const ENTITY: EntityKind = EntityKind::Employee;

    fn check(
        &self,
        subject: &Subject<'_>,
        action: Action,
        record: Option<&Employee>,
    ) -> DomainResult<Decision> {
        let role = subject.scoped_role();
        let decision = match action {
            Action::ViewAny => Decision::when(
                matches!(
                    role,
                    Some(ScopedRole::BranchAdmin(_) | ScopedRole::Agent(_) | ScopedRole::Employee(_))
                ),
                "actor has a staff-visible role",
                "actor has no staff-visible role",
            ),
            Action::View => {
                let employee = require(Self::ENTITY, action, record)?;
                match role {
                    Some(r @ (ScopedRole::BranchAdmin(_) | ScopedRole::Agent(_) | ScopedRole::Employee(_))) => {
                        Decision::when(
                            same_branch(employee.branch_id, r.branch_id()),
                            "employee works in actor's branch",
                            "employee works in another branch",
                        )
                    }
                    _ => Decision::deny("no rule grants viewing employees"),
                }
            }
            Action::Update => {
                let employee = require(Self::ENTITY, action, record)?;
                match role {
                    Some(ScopedRole::BranchAdmin(e)) => Decision::when(
                        same_branch(employee.branch_id, e.branch_id),
                        "employee works in actor's branch",
                        "employee works in another branch",
                    ),
                    Some(ScopedRole::Employee(e)) => Decision::when(
                        employee.id == e.id,
                        "employee is the actor",
                        "employees may only edit themselves",
                    ),
                    _ => Decision::deny("no rule grants editing employees"),
                }
            }
            Action::Delete => {
                let employee = require(Self::ENTITY, action, record)?;
                match role {
                    Some(ScopedRole::BranchAdmin(e)) => Decision::when(
                        same_branch(employee.branch_id, e.branch_id),
                        "employee works in actor's branch",
                        "employee works in another branch",
                    ),
                    _ => Decision::deny("only branch admins delete employees"),
                }
            }
            Action::Create => Decision::when(
                subject.has_permission(Permission::ManageEmployees),
                "actor holds manage_employees",
                "actor lacks manage_employees",
            ),
            Action::Restore | Action::ForceDelete => {
                require(Self::ENTITY, action, record)?;
                Decision::deny("only super admins restore or purge employees")
            }
            Action::Verify | Action::Download | Action::AccessPanel => {
                return Err(unsupported(Self::ENTITY, action));
            }
        };
        Ok(decision)
    }
}
