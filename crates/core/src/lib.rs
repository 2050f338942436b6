//! `edupath-core`: record types and identifiers shared by the access layer.
//!
//! This crate contains **pure domain** primitives (no storage or transport).

pub mod entity;
pub mod error;
pub mod id;
pub mod records;
pub mod value_object;

pub use entity::{Entity, EntityKind};
pub use error::{DomainError, DomainResult};
pub use id::{
    ActorId, AgentId, BranchId, CommissionId, CountryId, CourseId, DocumentId, EmployeeId,
    StateId, StudentId, UniversityId,
};
pub use records::{
    Agent, Branch, Commission, Country, Course, Employee, State, Student, StudentDocument,
    University,
};
pub use value_object::ValueObject;
