use edupath_auth::{Permission, Role};
use edupath_core::{DomainResult, EntityKind, StudentDocument};

use crate::policy::{require, unsupported};
use crate::{Action, Decision, Policy, Subject};

/// Student documents.
///
/// The student who owns a document may view, update and download it.
/// Back-office `admin`/`staff` roles need the matching permission grant for
/// every action; restoring and purging is limited to `admin`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StudentDocumentPolicy;

impl StudentDocumentPolicy {
    fn is_owner(subject: &Subject<'_>, document: &StudentDocument) -> bool {
        subject
            .profile()
            .student
            .is_some_and(|s| s.id == document.student_id)
    }

    fn back_office(subject: &Subject<'_>, permission: Permission) -> Decision {
        let profile = subject.profile();
        if !(profile.has_role(Role::Admin) || profile.has_role(Role::Staff)) {
            return Decision::deny("actor is neither admin nor staff");
        }
        Decision::when(
            subject.has_permission(permission),
            "back-office role with matching grant",
            "back-office role without matching grant",
        )
    }

    fn owner_or_back_office(
        subject: &Subject<'_>,
        document: &StudentDocument,
        permission: Permission,
    ) -> Decision {
        if Self::is_owner(subject, document) {
            return Decision::allow("actor owns the document");
        }
        Self::back_office(subject, permission)
    }

    fn admin_only(subject: &Subject<'_>, permission: Permission) -> Decision {
        if !subject.profile().has_role(Role::Admin) {
            return Decision::deny("only admins restore or purge documents");
        }
        Decision::when(
            subject.has_permission(permission),
            "admin with matching grant",
            "admin without matching grant",
        )
    }
}

impl Policy for StudentDocumentPolicy {
    type Record = StudentDocument;

    const ENTITY: EntityKind = EntityKind::StudentDocument;

    fn check(
        &self,
        subject: &Subject<'_>,
        action: Action,
        record: Option<&StudentDocument>,
    ) -> DomainResult<Decision> {
        let decision = match action {
            Action::ViewAny => {
                if subject.profile().student.is_some() {
                    Decision::allow("students list their own documents")
                } else {
                    Self::back_office(subject, Permission::ViewStudentDocuments)
                }
            }
            Action::Create => {
                if subject.profile().student.is_some() {
                    Decision::allow("students upload their own documents")
                } else {
                    Self::back_office(subject, Permission::UpdateStudentDocuments)
                }
            }
            Action::View => {
                let doc = require(Self::ENTITY, action, record)?;
                Self::owner_or_back_office(subject, doc, Permission::ViewStudentDocuments)
            }
            Action::Update => {
                let doc = require(Self::ENTITY, action, record)?;
                Self::owner_or_back_office(subject, doc, Permission::UpdateStudentDocuments)
            }
            Action::Download => {
                let doc = require(Self::ENTITY, action, record)?;
                Self::owner_or_back_office(subject, doc, Permission::DownloadStudentDocuments)
            }
            Action::Delete => {
                require(Self::ENTITY, action, record)?;
                Self::back_office(subject, Permission::DeleteStudentDocuments)
            }
            Action::Verify => {
                require(Self::ENTITY, action, record)?;
                Self::back_office(subject, Permission::VerifyStudentDocuments)
            }
            Action::Restore => {
                require(Self::ENTITY, action, record)?;
                Self::admin_only(subject, Permission::RestoreStudentDocuments)
            }
            Action::ForceDelete => {
                require(Self::ENTITY, action, record)?;
                Self::admin_only(subject, Permission::ForceDeleteStudentDocuments)
            }
            Action::AccessPanel => return Err(unsupported(Self::ENTITY, action)),
        };
        Ok(decision)
    }
}
