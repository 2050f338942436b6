use edupath_auth::{Permission, ScopedRole};
use edupath_core::{DomainResult, EntityKind, Student};

use crate::policy::{require, same_branch, unsupported};
use crate::{Action, Decision, Policy, Subject};

#[derive(Debug, Default, Clone, Copy)]
pub struct StudentPolicy;

impl Policy for StudentPolicy {
    type Record = Student;

    const ENTITY: EntityKind = EntityKind::Student;

    fn check(
        &self,
        subject: &Subject<'_>,
        action: Action,
        record: Option<&Student>,
    ) -> DomainResult<Decision> {
        let role = subject.scoped_role();
        let decision = match action {
            Action::ViewAny => Decision::when(
                role.is_some(),
                "actor has a student-visible role",
                "actor has no recognized role/profile",
            ),
            Action::View => {
                let student = require(Self::ENTITY, action, record)?;
                match role {
                    Some(ScopedRole::BranchAdmin(e) | ScopedRole::Employee(e)) => Decision::when(
                        same_branch(student.branch_id, e.branch_id),
                        "student is enrolled in actor's branch",
                        "student is enrolled in another branch",
                    ),
                    Some(ScopedRole::Agent(a)) => Decision::when(
                        student.agent_id == Some(a.id),
                        "student was recruited by the actor",
                        "student was recruited by another agent",
                    ),
                    Some(ScopedRole::Student(s)) => Decision::when(
                        student.id == s.id,
                        "student is the actor",
                        "students may only view themselves",
                    ),
                    None => Decision::deny("no rule grants viewing students"),
                }
            }
            Action::Update | Action::Delete => {
                let student = require(Self::ENTITY, action, record)?;
                match role {
                    Some(ScopedRole::BranchAdmin(e)) => Decision::when(
                        same_branch(student.branch_id, e.branch_id),
                        "student is enrolled in actor's branch",
                        "student is enrolled in another branch",
                    ),
                    Some(ScopedRole::Agent(a)) => Decision::when(
                        student.agent_id == Some(a.id),
                        "student was recruited by the actor",
                        "student was recruited by another agent",
                    ),
                    Some(ScopedRole::Employee(_)) => Decision::deny("employees have read-only access to students"),
                    Some(ScopedRole::Student(_)) => Decision::deny("students cannot change student records"),
                    None => Decision::deny("no rule grants changing students"),
                }
            }
            Action::Create => Decision::when(
                subject.has_permission(Permission::ManageStudents),
                "actor holds manage_students",
                "actor lacks manage_students",
            ),
            Action::Restore | Action::ForceDelete => {
                require(Self::ENTITY, action, record)?;
                Decision::deny("only super admins restore or purge students")
            }
            Action::Verify | Action::Download | Action::AccessPanel => {
                return Err(unsupported(Self::ENTITY, action));
            }
        };
        Ok(decision)
    }
}
