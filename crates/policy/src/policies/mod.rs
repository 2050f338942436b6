//! One policy per entity type.

pub mod agent;
pub mod branch;
pub mod commission;
pub mod document;
pub mod employee;
pub mod panel;
pub mod reference;
pub mod state;
pub mod student;

pub use agent::AgentPolicy;
pub use branch::BranchPolicy;
pub use commission::CommissionPolicy;
pub use document::StudentDocumentPolicy;
pub use employee::EmployeePolicy;
pub use panel::AdminPanelPolicy;
pub use reference::{CountryPolicy, CoursePolicy, ReferencePolicy, UniversityPolicy};
pub use state::{StatePolicy, StatePolicyMode};
pub use student::StudentPolicy;
