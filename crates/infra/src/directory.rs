//! In-memory role, profile-link and permission-grant directory.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use anyhow::anyhow;

use edupath_auth::{
    AgentLink, EmployeeLink, Permission, PermissionGrants, ProfileSource, StudentLink,
};
use edupath_core::{ActorId, Agent, Employee, Student};

#[derive(Debug, Default)]
struct DirectoryState {
    roles: HashMap<ActorId, Vec<String>>,
    employees: HashMap<ActorId, EmployeeLink>,
    agents: HashMap<ActorId, AgentLink>,
    students: HashMap<ActorId, StudentLink>,
    grants: HashSet<(ActorId, Permission)>,
}

/// Backs both [`ProfileSource`] and [`PermissionGrants`] for tests/dev.
///
/// Role names are stored raw so legacy spellings (`superadmin`) reach the
/// resolver exactly as a database would return them.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    inner: RwLock<DirectoryState>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign_role(&self, actor: ActorId, role: impl Into<String>) {
        if let Ok(mut state) = self.inner.write() {
            state.roles.entry(actor).or_default().push(role.into());
        }
    }

    pub fn revoke_role(&self, actor: ActorId, role: &str) {
        if let Ok(mut state) = self.inner.write() {
            if let Some(names) = state.roles.get_mut(&actor) {
                names.retain(|n| n != role);
            }
        }
    }

    pub fn link_employee(&self, employee: &Employee) {
        if let Ok(mut state) = self.inner.write() {
            state.employees.insert(employee.actor_id, employee.into());
        }
    }

    pub fn link_agent(&self, agent: &Agent) {
        if let Ok(mut state) = self.inner.write() {
            state.agents.insert(agent.actor_id, agent.into());
        }
    }

    /// Students without a login account have nothing to link.
    pub fn link_student(&self, student: &Student) {
        let Some(actor) = student.actor_id else {
            return;
        };
        if let Ok(mut state) = self.inner.write() {
            state.students.insert(actor, student.into());
        }
    }

    pub fn unlink_all(&self, actor: ActorId) {
        if let Ok(mut state) = self.inner.write() {
            state.employees.remove(&actor);
            state.agents.remove(&actor);
            state.students.remove(&actor);
        }
    }

    pub fn grant(&self, actor: ActorId, permission: Permission) {
        if let Ok(mut state) = self.inner.write() {
            state.grants.insert((actor, permission));
        }
    }

    pub fn revoke(&self, actor: ActorId, permission: Permission) {
        if let Ok(mut state) = self.inner.write() {
            state.grants.remove(&(actor, permission));
        }
    }

    fn read(&self) -> anyhow::Result<std::sync::RwLockReadGuard<'_, DirectoryState>> {
        self.inner.read().map_err(|_| {
            tracing::warn!("profile directory lock poisoned");
            anyhow!("profile directory lock poisoned")
        })
    }
}

impl ProfileSource for InMemoryDirectory {
    fn role_names(&self, actor: ActorId) -> Result<Vec<String>, anyhow::Error> {
        Ok(self.read()?.roles.get(&actor).cloned().unwrap_or_default())
    }

    fn employee_for(&self, actor: ActorId) -> Result<Option<EmployeeLink>, anyhow::Error> {
        Ok(self.read()?.employees.get(&actor).copied())
    }

    fn agent_for(&self, actor: ActorId) -> Result<Option<AgentLink>, anyhow::Error> {
        Ok(self.read()?.agents.get(&actor).copied())
    }

    fn student_for(&self, actor: ActorId) -> Result<Option<StudentLink>, anyhow::Error> {
        Ok(self.read()?.students.get(&actor).copied())
    }
}

impl PermissionGrants for InMemoryDirectory {
    fn is_granted(&self, actor: ActorId, permission: Permission) -> bool {
        match self.inner.read() {
            Ok(state) => state.grants.contains(&(actor, permission)),
            Err(_) => {
                tracing::warn!(%actor, %permission, "grant store lock poisoned; denying");
                false
            }
        }
    }
}
