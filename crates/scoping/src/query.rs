//! Composable base query handed to the persistence layer.

use core::marker::PhantomData;

use serde::Serialize;

use crate::entity::ScopedEntity;
use crate::filter::{ScopeField, ScopeFilter};

/// A single `AND`-ed predicate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    Eq { field: ScopeField, value: i64 },
    MatchNothing,
}

/// Query over one entity type: a conjunction of predicates.
///
/// Scope filters and the caller's own predicates compose by conjunction, so
/// scoping can be applied before or after caller filters with the same
/// result. Adding a predicate that is already present is a no-op, which keeps
/// repeated scoping idempotent.
#[derive(Debug, Serialize)]
pub struct Query<E> {
    predicates: Vec<Predicate>,
    #[serde(skip)]
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Query<E> {
    fn clone(&self) -> Self {
        Self {
            predicates: self.predicates.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> PartialEq for Query<E> {
    fn eq(&self, other: &Self) -> bool {
        self.predicates == other.predicates
    }
}

impl<E> Eq for Query<E> {}

impl<E> Default for Query<E> {
    fn default() -> Self {
        Self::all()
    }
}

impl<E> Query<E> {
    /// Unfiltered base query (every row).
    pub fn all() -> Self {
        Self {
            predicates: Vec::new(),
            _entity: PhantomData,
        }
    }

    pub fn filter(self, field: ScopeField, value: impl Into<i64>) -> Self {
        self.and(Predicate::Eq {
            field,
            value: value.into(),
        })
    }

    pub fn match_nothing(self) -> Self {
        self.and(Predicate::MatchNothing)
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        if !self.predicates.contains(&predicate) {
            self.predicates.push(predicate);
        }
        self
    }

    /// Append a scope filter as a predicate.
    pub fn and_scope(self, scope: ScopeFilter) -> Self {
        match scope {
            ScopeFilter::Unrestricted => self,
            ScopeFilter::DenyAll => self.match_nothing(),
            ScopeFilter::Eq { field, value } => self.filter(field, value),
        }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// `true` when the query can never return a row.
    pub fn is_match_nothing(&self) -> bool {
        self.predicates.contains(&Predicate::MatchNothing)
    }
}

impl<E: ScopedEntity> Query<E> {
    /// Lookup by primary key.
    pub fn by_id(id: E::Id) -> Self {
        Self::all().filter(ScopeField::Id, id)
    }

    /// Evaluate every predicate against an in-memory record.
    ///
    /// A predicate on a column the entity does not have never matches.
    pub fn matches(&self, record: &E) -> bool {
        self.predicates.iter().all(|p| match p {
            Predicate::MatchNothing => false,
            Predicate::Eq { field, value } => record.field_value(*field) == Some(*value),
        })
    }

    /// Run the query over an in-memory collection.
    pub fn select<'a, I>(&self, records: I) -> Vec<&'a E>
    where
        I: IntoIterator<Item = &'a E>,
        E: 'a,
    {
        if self.is_match_nothing() {
            return Vec::new();
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
