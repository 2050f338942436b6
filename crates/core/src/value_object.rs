//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. Profile links and
/// resolved actor profiles are value objects: two snapshots with the same
/// role set and links produce the same access decisions.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct BranchLink {
///     branch_id: BranchId,
/// }
///
/// impl ValueObject for BranchLink {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
