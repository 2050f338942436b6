use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use edupath_scoping::{Query, ScopedEntity};

/// Record store for one entity type.
///
/// `fetch` is the only way to list records and always takes a [`Query`], so
/// callers that scope first cannot read outside the actor's scope.
/// `find_unscoped` exists for the route binder's forbidden/not-found split
/// and must not be used to return data.
pub trait Repository<E: ScopedEntity>: Send + Sync {
    fn fetch(&self, query: &Query<E>) -> Vec<E>;
    fn find_unscoped(&self, id: E::Id) -> Option<E>;
}

impl<E, R> Repository<E> for Arc<R>
where
    E: ScopedEntity,
    R: Repository<E> + ?Sized,
{
    fn fetch(&self, query: &Query<E>) -> Vec<E> {
        (**self).fetch(query)
    }

    fn find_unscoped(&self, id: E::Id) -> Option<E> {
        (**self).find_unscoped(id)
    }
}

/// In-memory repository for tests/dev, ordered by id.
#[derive(Debug)]
pub struct InMemoryRepository<E> {
    inner: RwLock<BTreeMap<i64, E>>,
}

impl<E> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ScopedEntity> InMemoryRepository<E> {
    pub fn with_records(records: impl IntoIterator<Item = E>) -> Self {
        let repo = Self::new();
        for record in records {
            repo.upsert(record);
        }
        repo
    }

    pub fn upsert(&self, record: E) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(record.id().into(), record);
        }
    }

    pub fn remove(&self, id: E::Id) -> Option<E> {
        let key: i64 = id.into();
        self.inner.write().ok()?.remove(&key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: ScopedEntity> Repository<E> for InMemoryRepository<E> {
    fn fetch(&self, query: &Query<E>) -> Vec<E> {
        if query.is_match_nothing() {
            return Vec::new();
        }
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => {
                tracing::warn!(entity = %E::KIND, "repository lock poisoned; returning no rows");
                return vec![];
            }
        };
        query.select(map.values()).into_iter().cloned().collect()
    }

    fn find_unscoped(&self, id: E::Id) -> Option<E> {
        let key: i64 = id.into();
        let Ok(map) = self.inner.read() else {
            tracing::warn!(entity = %E::KIND, record = %id, "repository lock poisoned; treating record as absent");
            return None;
        };
        map.get(&key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use edupath_core::{AgentId, BranchId, Student, StudentId};
    use edupath_scoping::ScopeField;

    use super::*;

    fn student(id: i64, branch: i64, agent: Option<i64>) -> Student {
        Student {
            id: StudentId::new(id),
            actor_id: None,
            branch_id: Some(BranchId::new(branch)),
            agent_id: agent.map(AgentId::new),
            name: format!("student-{id}"),
        }
    }

    #[test]
    fn fetch_applies_every_predicate() {
        let repo = InMemoryRepository::with_records([
            student(1, 1, Some(7)),
            student(2, 2, None),
            student(3, 2, Some(7)),
        ]);

        let q = Query::<Student>::all().filter(ScopeField::AgentId, 7);
        let ids: Vec<_> = repo.fetch(&q).into_iter().map(|s| s.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);

        let q = q.filter(ScopeField::BranchId, 2);
        assert_eq!(repo.fetch(&q).len(), 1);
    }

    #[test]
    fn match_nothing_returns_no_rows() {
        let repo = InMemoryRepository::with_records([student(1, 1, None)]);
        assert!(repo.fetch(&Query::all().match_nothing()).is_empty());
    }

    #[test]
    fn upsert_replaces_and_remove_deletes() {
        let repo = InMemoryRepository::new();
        repo.upsert(student(1, 1, None));
        repo.upsert(student(1, 2, None));
        assert_eq!(repo.len(), 1);
        assert_eq!(
            repo.find_unscoped(StudentId::new(1)).and_then(|s| s.branch_id),
            Some(BranchId::new(2))
        );

        assert!(repo.remove(StudentId::new(1)).is_some());
        assert!(repo.is_empty());
        assert!(repo.find_unscoped(StudentId::new(1)).is_none());
    }

    #[test]
    fn poisoned_store_degrades_to_empty_results() {
        let repo = Arc::new(InMemoryRepository::with_records([student(1, 1, None)]));
        let writer = Arc::clone(&repo);
        let crashed = std::thread::spawn(move || {
            let _guard = writer.inner.write().unwrap();
            panic!("writer crashed while holding the lock");
        })
        .join();
        assert!(crashed.is_err());

        assert!(repo.fetch(&Query::all()).is_empty());
        assert!(repo.find_unscoped(StudentId::new(1)).is_none());
    }

    #[test]
    fn shared_repository_delegates() {
        let repo: Arc<InMemoryRepository<Student>> =
            Arc::new(InMemoryRepository::with_records([student(4, 1, None)]));
        let as_trait: &dyn Repository<Student> = &repo;
        assert_eq!(as_trait.fetch(&Query::by_id(StudentId::new(4))).len(), 1);
    }
}
