use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use edupath_core::{
    ActorId, Agent, AgentId, BranchId, Employee, EmployeeId, Student, StudentId, ValueObject,
};

use crate::Role;

/// Employee profile linked to an actor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeLink {
    pub id: EmployeeId,
    pub branch_id: Option<BranchId>,
}

/// Agent profile linked to an actor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentLink {
    pub id: AgentId,
    pub branch_id: Option<BranchId>,
    pub parent_agent_id: Option<AgentId>,
}

/// Student profile linked to an actor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentLink {
    pub id: StudentId,
    pub branch_id: Option<BranchId>,
    pub agent_id: Option<AgentId>,
}

impl ValueObject for EmployeeLink {}
impl ValueObject for AgentLink {}
impl ValueObject for StudentLink {}

impl From<&Employee> for EmployeeLink {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id,
            branch_id: e.branch_id,
        }
    }
}

impl From<&Agent> for AgentLink {
    fn from(a: &Agent) -> Self {
        Self {
            id: a.id,
            branch_id: a.branch_id,
            parent_agent_id: a.parent_agent_id,
        }
    }
}

impl From<&Student> for StudentLink {
    fn from(s: &Student) -> Self {
        Self {
            id: s.id,
            branch_id: s.branch_id,
            agent_id: s.agent_id,
        }
    }
}

/// A fully resolved actor for access decisions.
///
/// All three profile links are carried even though an actor normally has at
/// most one; nothing enforces that at write time. Which link governs access
/// is decided by [`ActorProfile::scoped_role`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorProfile {
    pub actor_id: ActorId,
    pub roles: BTreeSet<Role>,
    pub employee: Option<EmployeeLink>,
    pub agent: Option<AgentLink>,
    pub student: Option<StudentLink>,
}

impl ValueObject for ActorProfile {}

/// The single role/profile combination that governs an actor's access.
///
/// Roles are not cumulative: an actor holding several roles is judged by the
/// first combination that applies, in the fixed order
/// branch_admin → agent → employee → student.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScopedRole<'a> {
    BranchAdmin(&'a EmployeeLink),
    Agent(&'a AgentLink),
    Employee(&'a EmployeeLink),
    Student(&'a StudentLink),
}

impl ScopedRole<'_> {
    pub fn role(&self) -> Role {
        match self {
            ScopedRole::BranchAdmin(_) => Role::BranchAdmin,
            ScopedRole::Agent(_) => Role::Agent,
            ScopedRole::Employee(_) => Role::Employee,
            ScopedRole::Student(_) => Role::Student,
        }
    }

    /// Branch of the governing profile.
    pub fn branch_id(&self) -> Option<BranchId> {
        match self {
            ScopedRole::BranchAdmin(e) | ScopedRole::Employee(e) => e.branch_id,
            ScopedRole::Agent(a) => a.branch_id,
            ScopedRole::Student(s) => s.branch_id,
        }
    }
}

impl ActorProfile {
    /// An actor with no roles and no linked profiles (sees nothing).
    pub fn new(actor_id: ActorId) -> Self {
        Self {
            actor_id,
            roles: BTreeSet::new(),
            employee: None,
            agent: None,
            student: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    pub fn with_employee(mut self, link: EmployeeLink) -> Self {
        self.employee = Some(link);
        self
    }

    pub fn with_agent(mut self, link: AgentLink) -> Self {
        self.agent = Some(link);
        self
    }

    pub fn with_student(mut self, link: StudentLink) -> Self {
        self.student = Some(link);
        self
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_super_admin(&self) -> bool {
        self.has_role(Role::SuperAdmin)
    }

    /// `true` when any of the employee/agent/student links is present.
    pub fn has_linked_profile(&self) -> bool {
        self.employee.is_some() || self.agent.is_some() || self.student.is_some()
    }

    /// Resolve the governing role/profile combination.
    ///
    /// Returns `None` when no recognized role has a matching link, which both
    /// the scope engine and the policies treat as deny.
    pub fn scoped_role(&self) -> Option<ScopedRole<'_>> {
        if self.has_role(Role::BranchAdmin) {
            if let Some(employee) = &self.employee {
                return Some(ScopedRole::BranchAdmin(employee));
            }
        }
        if self.has_role(Role::Agent) {
            if let Some(agent) = &self.agent {
                return Some(ScopedRole::Agent(agent));
            }
        }
        if self.has_role(Role::Employee) {
            if let Some(employee) = &self.employee {
                return Some(ScopedRole::Employee(employee));
            }
        }
        if self.has_role(Role::Student) {
            if let Some(student) = &self.student {
                return Some(ScopedRole::Student(student));
            }
        }
        None
    }
}
