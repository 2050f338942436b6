use core::str::FromStr;

use serde::{Deserialize, Serialize};

use edupath_core::DomainError;

/// Coarse-grained permission grant, orthogonal to roles and profiles.
///
/// The set is closed so a misspelled grant is a compile error rather than a
/// silent deny.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ManageAgents,
    ManageBranches,
    ManageEmployees,
    ManageStudents,
    ViewStudentDocuments,
    UpdateStudentDocuments,
    DeleteStudentDocuments,
    VerifyStudentDocuments,
    DownloadStudentDocuments,
    RestoreStudentDocuments,
    ForceDeleteStudentDocuments,
}

impl Permission {
    pub const ALL: [Permission; 11] = [
        Permission::ManageAgents,
        Permission::ManageBranches,
        Permission::ManageEmployees,
        Permission::ManageStudents,
        Permission::ViewStudentDocuments,
        Permission::UpdateStudentDocuments,
        Permission::DeleteStudentDocuments,
        Permission::VerifyStudentDocuments,
        Permission::DownloadStudentDocuments,
        Permission::RestoreStudentDocuments,
        Permission::ForceDeleteStudentDocuments,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Permission::ManageAgents => "manage_agents",
            Permission::ManageBranches => "manage_branches",
            Permission::ManageEmployees => "manage_employees",
            Permission::ManageStudents => "manage_students",
            Permission::ViewStudentDocuments => "view_student_documents",
            Permission::UpdateStudentDocuments => "update_student_documents",
            Permission::DeleteStudentDocuments => "delete_student_documents",
            Permission::VerifyStudentDocuments => "verify_student_documents",
            Permission::DownloadStudentDocuments => "download_student_documents",
            Permission::RestoreStudentDocuments => "restore_student_documents",
            Permission::ForceDeleteStudentDocuments => "force_delete_student_documents",
        }
    }
}

impl FromStr for Permission {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| DomainError::validation(format!("unknown permission '{s}'")))
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
