//! Read-only catalogue of roles and permission grants, for admin display and audit.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Permission, Role};

/// Role definition (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct RoleDefinition {
    pub name: &'static str,
    pub description: &'static str,
    /// Which linked profile the role needs before it grants anything.
    pub requires_profile: Option<&'static str>,
}

/// Permission definition (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct PermissionDefinition {
    pub name: &'static str,
    pub description: String,
    pub category: &'static str,
}

/// Registry of all canonical roles and permission grants.
#[derive(Debug, Clone, Serialize)]
pub struct RoleCatalogue {
    pub roles: BTreeMap<&'static str, RoleDefinition>,
    pub permissions: BTreeMap<&'static str, PermissionDefinition>,
}

impl RoleCatalogue {
    pub fn build() -> Self {
        let roles = Role::ALL
            .into_iter()
            .map(|role| {
                (
                    role.as_str(),
                    RoleDefinition {
                        name: role.as_str(),
                        description: role_description(role),
                        requires_profile: required_profile(role),
                    },
                )
            })
            .collect();

        let permissions = Permission::ALL
            .into_iter()
            .map(|perm| {
                (
                    perm.as_str(),
                    PermissionDefinition {
                        name: perm.as_str(),
                        description: permission_description(perm),
                        category: permission_category(perm),
                    },
                )
            })
            .collect();

        Self { roles, permissions }
    }
}

fn role_description(role: Role) -> &'static str {
    match role {
        Role::SuperAdmin => "Unrestricted access; bypasses every scope and policy",
        Role::BranchAdmin => "Manages everything belonging to their own branch",
        Role::Agent => "Sees their own students and commissions",
        Role::Employee => "Works within their own branch, mostly read-only",
        Role::Student => "Sees their own student record only",
        Role::Admin => "Back-office document administration",
        Role::Staff => "Back-office document handling",
    }
}

fn required_profile(role: Role) -> Option<&'static str> {
    match role {
        Role::BranchAdmin | Role::Employee => Some("employee"),
        Role::Agent => Some("agent"),
        Role::Student => Some("student"),
        Role::SuperAdmin | Role::Admin | Role::Staff => None,
    }
}

fn permission_description(perm: Permission) -> String {
    // "manage_agents" -> "Create agents", "verify_student_documents" -> "Verify student documents"
    let name = perm.as_str();
    let (verb, resource) = name.split_once('_').unwrap_or((name, ""));
    let verb = match verb {
        "manage" => "Create",
        "view" => "View",
        "update" => "Update",
        "delete" => "Delete",
        "verify" => "Verify",
        "download" => "Download",
        "restore" => "Restore",
        "force" => "Permanently delete",
        other => other,
    };
    let resource = resource.strip_prefix("delete_").unwrap_or(resource);
    format!("{} {}", verb, resource.replace('_', " "))
}

fn permission_category(perm: Permission) -> &'static str {
    match perm {
        Permission::ManageAgents
        | Permission::ManageBranches
        | Permission::ManageEmployees
        | Permission::ManageStudents => "records",
        _ => "documents",
    }
}
