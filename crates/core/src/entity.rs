//! Entity trait: identity + the kind tag used by scopes and policies.

use serde::{Deserialize, Serialize};

/// Every entity type the access layer knows about.
///
/// `AdminPanel` is not a stored record; it is the target of the panel-access gate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Agent,
    Branch,
    Commission,
    Country,
    Course,
    Employee,
    State,
    Student,
    StudentDocument,
    University,
    AdminPanel,
}

impl EntityKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityKind::Agent => "agent",
            EntityKind::Branch => "branch",
            EntityKind::Commission => "commission",
            EntityKind::Country => "country",
            EntityKind::Course => "course",
            EntityKind::Employee => "employee",
            EntityKind::State => "state",
            EntityKind::Student => "student",
            EntityKind::StudentDocument => "student_document",
            EntityKind::University => "university",
            EntityKind::AdminPanel => "admin_panel",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier (an integer row key).
    type Id: Copy
        + Eq
        + core::hash::Hash
        + core::fmt::Debug
        + core::fmt::Display
        + Into<i64>
        + core::str::FromStr<Err = crate::DomainError>;

    /// Kind tag used for dispatch and logging.
    const KIND: EntityKind;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
