//! Scoped entities: which columns each record exposes to visibility rules.

use edupath_auth::ScopedRole;
use edupath_core::{
    Agent, Branch, Commission, Country, Course, Employee, Entity, State, Student,
    StudentDocument, University,
};

use crate::filter::{ScopeField, ScopeFilter};

/// An entity the scope engine can filter.
///
/// The engine keys its generic rules on `branch_id` and `agent_id`. An
/// entity without those columns must answer through
/// [`ScopedEntity::specific_scope`]; returning `None` there means "not
/// overridden", which the engine either rejects (strict mode) or treats as
/// no restriction.
pub trait ScopedEntity: Entity + Clone + Send + Sync + 'static {
    /// Columns present on this entity.
    const FIELDS: &'static [ScopeField];

    /// Value of `field` for this record; `None` for a null or absent column.
    fn field_value(&self, field: ScopeField) -> Option<i64>;

    fn has_field(field: ScopeField) -> bool {
        Self::FIELDS.contains(&field)
    }

    /// Entity-specific scope for roles the generic column rules cannot serve.
    fn specific_scope(_role: &ScopedRole<'_>) -> Option<ScopeFilter> {
        None
    }
}

impl ScopedEntity for Branch {
    const FIELDS: &'static [ScopeField] = &[ScopeField::Id];

    fn field_value(&self, field: ScopeField) -> Option<i64> {
        match field {
            ScopeField::Id => Some(self.id.get()),
            _ => None,
        }
    }

    /// A branch has no `branch_id`; staff and agents see their own branch row.
    fn specific_scope(role: &ScopedRole<'_>) -> Option<ScopeFilter> {
        Some(ScopeFilter::eq_or_deny(ScopeField::Id, role.branch_id()))
    }
}

impl ScopedEntity for Employee {
    const FIELDS: &'static [ScopeField] = &[ScopeField::Id, ScopeField::BranchId];

    fn field_value(&self, field: ScopeField) -> Option<i64> {
        match field {
            ScopeField::Id => Some(self.id.get()),
            ScopeField::BranchId => self.branch_id.map(|b| b.get()),
            _ => None,
        }
    }
}

/// An agent's `agent_id` is its own id, so an agent's list scope is itself.
impl ScopedEntity for Agent {
    const FIELDS: &'static [ScopeField] = &[
        ScopeField::Id,
        ScopeField::BranchId,
        ScopeField::AgentId,
        ScopeField::ParentAgentId,
    ];

    fn field_value(&self, field: ScopeField) -> Option<i64> {
        match field {
            ScopeField::Id | ScopeField::AgentId => Some(self.id.get()),
            ScopeField::BranchId => self.branch_id.map(|b| b.get()),
            ScopeField::ParentAgentId => self.parent_agent_id.map(|a| a.get()),
            _ => None,
        }
    }
}

impl ScopedEntity for Student {
    const FIELDS: &'static [ScopeField] =
        &[ScopeField::Id, ScopeField::BranchId, ScopeField::AgentId];

    fn field_value(&self, field: ScopeField) -> Option<i64> {
        match field {
            ScopeField::Id => Some(self.id.get()),
            ScopeField::BranchId => self.branch_id.map(|b| b.get()),
            ScopeField::AgentId => self.agent_id.map(|a| a.get()),
            _ => None,
        }
    }
}

impl ScopedEntity for Commission {
    const FIELDS: &'static [ScopeField] =
        &[ScopeField::Id, ScopeField::BranchId, ScopeField::AgentId];

    fn field_value(&self, field: ScopeField) -> Option<i64> {
        match field {
            ScopeField::Id => Some(self.id.get()),
            ScopeField::BranchId => self.branch_id.map(|b| b.get()),
            ScopeField::AgentId => self.agent_id.map(|a| a.get()),
            _ => None,
        }
    }
}

// Reference data is shared across branches.

impl ScopedEntity for Country {
    const FIELDS: &'static [ScopeField] = &[ScopeField::Id];

    fn field_value(&self, field: ScopeField) -> Option<i64> {
        match field {
            ScopeField::Id => Some(self.id.get()),
            _ => None,
        }
    }

    fn specific_scope(_role: &ScopedRole<'_>) -> Option<ScopeFilter> {
        Some(ScopeFilter::Unrestricted)
    }
}

impl ScopedEntity for State {
    const FIELDS: &'static [ScopeField] = &[ScopeField::Id, ScopeField::CountryId];

    fn field_value(&self, field: ScopeField) -> Option<i64> {
        match field {
            ScopeField::Id => Some(self.id.get()),
            ScopeField::CountryId => Some(self.country_id.get()),
            _ => None,
        }
    }

    fn specific_scope(_role: &ScopedRole<'_>) -> Option<ScopeFilter> {
        Some(ScopeFilter::Unrestricted)
    }
}

impl ScopedEntity for University {
    const FIELDS: &'static [ScopeField] = &[ScopeField::Id, ScopeField::CountryId];

    fn field_value(&self, field: ScopeField) -> Option<i64> {
        match field {
            ScopeField::Id => Some(self.id.get()),
            ScopeField::CountryId => self.country_id.map(|c| c.get()),
            _ => None,
        }
    }

    fn specific_scope(_role: &ScopedRole<'_>) -> Option<ScopeFilter> {
        Some(ScopeFilter::Unrestricted)
    }
}

impl ScopedEntity for Course {
    const FIELDS: &'static [ScopeField] = &[ScopeField::Id, ScopeField::UniversityId];

    fn field_value(&self, field: ScopeField) -> Option<i64> {
        match field {
            ScopeField::Id => Some(self.id.get()),
            ScopeField::UniversityId => Some(self.university_id.get()),
            _ => None,
        }
    }

    fn specific_scope(_role: &ScopedRole<'_>) -> Option<ScopeFilter> {
        Some(ScopeFilter::Unrestricted)
    }
}

impl ScopedEntity for StudentDocument {
    const FIELDS: &'static [ScopeField] = &[ScopeField::Id, ScopeField::StudentId];

    fn field_value(&self, field: ScopeField) -> Option<i64> {
        match field {
            ScopeField::Id => Some(self.id.get()),
            ScopeField::StudentId => Some(self.student_id.get()),
            _ => None,
        }
    }

    /// Documents are reached through their student, never listed across students.
    fn specific_scope(_role: &ScopedRole<'_>) -> Option<ScopeFilter> {
        Some(ScopeFilter::DenyAll)
    }
}
