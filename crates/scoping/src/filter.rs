//! Scope filters: the predicate a visibility decision compiles to.

use serde::Serialize;

use crate::entity::ScopedEntity;

/// Column a scope (or caller) predicate can be keyed on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeField {
    Id,
    BranchId,
    AgentId,
    ParentAgentId,
    StudentId,
    CountryId,
    UniversityId,
}

impl ScopeField {
    pub const fn column(self) -> &'static str {
        match self {
            ScopeField::Id => "id",
            ScopeField::BranchId => "branch_id",
            ScopeField::AgentId => "agent_id",
            ScopeField::ParentAgentId => "parent_agent_id",
            ScopeField::StudentId => "student_id",
            ScopeField::CountryId => "country_id",
            ScopeField::UniversityId => "university_id",
        }
    }
}

impl core::fmt::Display for ScopeField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.column())
    }
}

/// Result of a visibility decision for one actor and one entity type.
///
/// | Filter | SQL equivalent |
/// |---|---|
/// | `Unrestricted` | no predicate |
/// | `Eq` | `WHERE field = value` |
/// | `DenyAll` | `WHERE false` |
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScopeFilter {
    Unrestricted,
    Eq { field: ScopeField, value: i64 },
    DenyAll,
}

impl ScopeFilter {
    pub fn eq(field: ScopeField, value: impl Into<i64>) -> Self {
        Self::Eq {
            field,
            value: value.into(),
        }
    }

    /// `field = value` when a value is known, otherwise match nothing.
    ///
    /// A missing profile column behaves like SQL `= NULL`: it never matches.
    pub fn eq_or_deny<V: Into<i64>>(field: ScopeField, value: Option<V>) -> Self {
        match value {
            Some(v) => Self::eq(field, v),
            None => Self::DenyAll,
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }

    pub fn is_deny_all(&self) -> bool {
        matches!(self, Self::DenyAll)
    }

    /// Evaluate the filter against a single in-memory record.
    pub fn matches<E: ScopedEntity>(&self, record: &E) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::DenyAll => false,
            Self::Eq { field, value } => record.field_value(*field) == Some(*value),
        }
    }
}

impl core::fmt::Display for ScopeFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unrestricted => f.write_str("unrestricted"),
            Self::DenyAll => f.write_str("deny_all"),
            Self::Eq { field, value } => write!(f, "{field} = {value}"),
        }
    }
}
