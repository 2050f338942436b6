use core::str::FromStr;

use serde::{Deserialize, Serialize};

use edupath_core::DomainError;

/// Canonical role.
///
/// Stored role names are normalized into this enum when a profile is
/// resolved; both legacy spellings of the highest-privilege role
/// (`super_admin` and `superadmin`) collapse into [`Role::SuperAdmin`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[serde(alias = "superadmin")]
    SuperAdmin,
    BranchAdmin,
    Agent,
    Employee,
    Student,
    /// Back-office role used by the student document workflow.
    Admin,
    /// Back-office role used by the student document workflow.
    Staff,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::SuperAdmin,
        Role::BranchAdmin,
        Role::Agent,
        Role::Employee,
        Role::Student,
        Role::Admin,
        Role::Staff,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::BranchAdmin => "branch_admin",
            Role::Agent => "agent",
            Role::Employee => "employee",
            Role::Student => "student",
            Role::Admin => "admin",
            Role::Staff => "staff",
        }
    }

    /// Normalize a stored role name. Returns `None` for names this layer does not know.
    pub fn parse(name: &str) -> Option<Role> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "super_admin" | "superadmin" => Some(Role::SuperAdmin),
            "branch_admin" => Some(Role::BranchAdmin),
            "agent" => Some(Role::Agent),
            "employee" => Some(Role::Employee),
            "student" => Some(Role::Student),
            "admin" => Some(Role::Admin),
            "staff" => Some(Role::Staff),
            _ => None,
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| DomainError::validation(format!("unknown role '{s}'")))
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
