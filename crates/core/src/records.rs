//! Plain records the access layer reads.
//!
//! These mirror stored rows; only the columns that visibility and policy rules
//! inspect are modelled, plus a display name. Persistence lives elsewhere.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityKind};
use crate::id::{
    ActorId, AgentId, BranchId, CommissionId, CountryId, CourseId, DocumentId, EmployeeId,
    StateId, StudentId, UniversityId,
};

/// Organizational unit; the primary visibility boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
}

/// Staff member, linked 1:1 to a login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub actor_id: ActorId,
    /// Branch scoping only applies when this is set.
    pub branch_id: Option<BranchId>,
    pub name: String,
}

/// Recruiting agent, linked 1:1 to a login.
///
/// `parent_agent_id` forms a single-level hierarchy: visibility rules only
/// ever look at direct children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub actor_id: ActorId,
    pub branch_id: Option<BranchId>,
    pub parent_agent_id: Option<AgentId>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    /// Students are not required to have a login.
    pub actor_id: Option<ActorId>,
    pub branch_id: Option<BranchId>,
    /// Recruiting agent.
    pub agent_id: Option<AgentId>,
    pub name: String,
}

/// Financial record owed to an agent for a placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commission {
    pub id: CommissionId,
    pub branch_id: Option<BranchId>,
    pub agent_id: Option<AgentId>,
    pub amount_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    pub country_id: CountryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct University {
    pub id: UniversityId,
    pub country_id: Option<CountryId>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub university_id: UniversityId,
    pub name: String,
}

/// Uploaded file attached to a student (passport, transcript, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDocument {
    pub id: DocumentId,
    pub student_id: StudentId,
    pub kind: String,
    pub verified: bool,
}

macro_rules! impl_entity {
    ($t:ty, $id:ty, $kind:expr) => {
        impl Entity for $t {
            type Id = $id;
            const KIND: EntityKind = $kind;

            fn id(&self) -> Self::Id {
                self.id
            }
        }
    };
}

impl_entity!(Branch, BranchId, EntityKind::Branch);
impl_entity!(Employee, EmployeeId, EntityKind::Employee);
impl_entity!(Agent, AgentId, EntityKind::Agent);
impl_entity!(Student, StudentId, EntityKind::Student);
impl_entity!(Commission, CommissionId, EntityKind::Commission);
impl_entity!(Country, CountryId, EntityKind::Country);
impl_entity!(State, StateId, EntityKind::State);
impl_entity!(University, UniversityId, EntityKind::University);
impl_entity!(Course, CourseId, EntityKind::Course);
impl_entity!(StudentDocument, DocumentId, EntityKind::StudentDocument);
