//! Route binding: raw identifier → record, telling 403 apart from 404.

use edupath_auth::ActorProfile;
use edupath_core::{DomainError, DomainResult};
use edupath_infra::Repository;
use edupath_scoping::{Query, ScopeEngine, ScopedEntity};

/// Resolve `raw` to a record visible to `actor`.
///
/// The lookup runs through the scope engine first. On a miss the same id is
/// looked up without scoping only to decide between `Forbidden` (the record
/// exists) and `NotFound`; the unscoped record itself is never returned.
/// Without an actor a miss is `Unauthenticated` and the unscoped lookup never
/// runs, so existence is only disclosed to authenticated actors.
/// An identifier that does not parse names no record and yields `NotFound`.
pub fn resolve_bound<E, R>(
    engine: &ScopeEngine,
    repo: &R,
    actor: Option<&ActorProfile>,
    raw: &str,
) -> DomainResult<E>
where
    E: ScopedEntity,
    R: Repository<E> + ?Sized,
{
    let id: E::Id = match raw.parse() {
        Ok(id) => id,
        Err(err) => {
            tracing::debug!(entity = %E::KIND, raw, error = %err, "unparseable route identifier");
            return Err(DomainError::NotFound);
        }
    };

    let query = engine.apply(actor, Query::<E>::by_id(id))?;
    if let Some(record) = repo.fetch(&query).into_iter().next() {
        return Ok(record);
    }

    let Some(actor) = actor else {
        tracing::debug!(entity = %E::KIND, record = %id, "anonymous route binding missed scope");
        return Err(DomainError::Unauthenticated);
    };

    if repo.find_unscoped(id).is_some() {
        tracing::debug!(
            entity = %E::KIND,
            record = %id,
            actor = %actor.actor_id,
            "bound record exists outside actor scope"
        );
        Err(DomainError::Forbidden)
    } else {
        Err(DomainError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use edupath_auth::{AgentLink, Role};
    use edupath_core::{ActorId, AgentId, BranchId, Student, StudentId};
    use edupath_infra::InMemoryRepository;
    use edupath_scoping::{ScopeConfig, UnauthenticatedScope};

    use super::*;

    fn student(id: i64, agent: i64) -> Student {
        Student {
            id: StudentId::new(id),
            actor_id: None,
            branch_id: Some(BranchId::new(1)),
            agent_id: Some(AgentId::new(agent)),
            name: format!("student-{id}"),
        }
    }

    fn agent(id: i64) -> ActorProfile {
        ActorProfile::new(ActorId::new())
            .with_role(Role::Agent)
            .with_agent(AgentLink {
                id: AgentId::new(id),
                branch_id: Some(BranchId::new(1)),
                parent_agent_id: None,
            })
    }

    #[test]
    fn in_scope_record_is_returned() {
        let repo = InMemoryRepository::with_records([student(1, 7)]);
        let found: Student =
            resolve_bound(&ScopeEngine::default(), &repo, Some(&agent(7)), "1").unwrap();
        assert_eq!(found.id, StudentId::new(1));
    }

    #[test]
    fn out_of_scope_record_is_forbidden() {
        let repo = InMemoryRepository::with_records([student(1, 8)]);
        let err = resolve_bound::<Student, _>(&ScopeEngine::default(), &repo, Some(&agent(7)), "1")
            .unwrap_err();
        assert_eq!(err, DomainError::Forbidden);
    }

    #[test]
    fn missing_or_malformed_identifiers_are_not_found() {
        let repo = InMemoryRepository::with_records([student(1, 7)]);
        let engine = ScopeEngine::default();
        for raw in ["2", "abc", "-4", "0", ""] {
            let err = resolve_bound::<Student, _>(&engine, &repo, Some(&agent(7)), raw).unwrap_err();
            assert_eq!(err, DomainError::NotFound, "identifier {raw:?}");
        }
    }

    #[test]
    fn anonymous_lookup_never_reveals_existence() {
        let repo = InMemoryRepository::with_records([student(1, 7)]);
        let engine = ScopeEngine::default();
        for raw in ["1", "2"] {
            let err = resolve_bound::<Student, _>(&engine, &repo, None, raw).unwrap_err();
            assert_eq!(err, DomainError::Unauthenticated, "identifier {raw:?}");
        }
    }

    #[test]
    fn anonymous_pass_through_still_binds_existing_records() {
        let repo = InMemoryRepository::with_records([student(1, 7)]);
        let engine = ScopeEngine::new(ScopeConfig {
            unauthenticated: UnauthenticatedScope::PassThrough,
            strict_overrides: true,
        });
        let found: Student = resolve_bound(&engine, &repo, None, "1").unwrap();
        assert_eq!(found.id, StudentId::new(1));
        let err = resolve_bound::<Student, _>(&engine, &repo, None, "2").unwrap_err();
        assert_eq!(err, DomainError::Unauthenticated);
    }
}
