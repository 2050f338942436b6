//! `edupath-policy`: per-record, per-action authorization.
//!
//! Policies use the same role priority as the scope engine
//! ([`edupath_auth::ActorProfile::scoped_role`]) so a list scope and a
//! direct-access check agree on which rule governs an actor.

pub mod action;
pub mod decision;
pub mod gate;
pub mod policies;
pub mod policy;
pub mod subject;

pub use action::Action;
pub use decision::Decision;
pub use gate::{AsRecord, Gate, PolicyConfig, PolicyExplanation, RecordRef};
pub use policies::StatePolicyMode;
pub use policy::{AdminBypass, Policy};
pub use subject::Subject;
