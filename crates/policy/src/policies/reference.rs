use core::marker::PhantomData;

use edupath_core::{Country, Course, DomainResult, Entity, EntityKind, University};

use crate::policy::{require, unsupported};
use crate::{Action, Decision, Policy, Subject};

/// Admin-managed reference data (courses, universities, countries).
///
/// Anyone with a linked employee, agent or student profile can read it;
/// changes are left to the super-admin bypass.
pub struct ReferencePolicy<R> {
    _record: PhantomData<fn() -> R>,
}

pub type CoursePolicy = ReferencePolicy<Course>;
pub type UniversityPolicy = ReferencePolicy<University>;
pub type CountryPolicy = ReferencePolicy<Country>;

impl<R> ReferencePolicy<R> {
    pub fn new() -> Self {
        Self {
            _record: PhantomData,
        }
    }
}

impl<R> Default for ReferencePolicy<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> core::fmt::Debug for ReferencePolicy<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReferencePolicy")
            .field("entity", &core::any::type_name::<R>())
            .finish()
    }
}

impl<R: Entity> Policy for ReferencePolicy<R> {
    type Record = R;

    const ENTITY: EntityKind = R::KIND;

    fn check(
        &self,
        subject: &Subject<'_>,
        action: Action,
        record: Option<&R>,
    ) -> DomainResult<Decision> {
        let linked = subject.profile().has_linked_profile();
        let decision = match action {
            Action::ViewAny => Decision::when(
                linked,
                "actor has a linked profile",
                "actor has no linked profile",
            ),
            Action::View => {
                require(Self::ENTITY, action, record)?;
                Decision::when(linked, "actor has a linked profile", "actor has no linked profile")
            }
            Action::Create => Decision::deny("reference data is managed by super admins"),
            Action::Update | Action::Delete | Action::Restore | Action::ForceDelete => {
                require(Self::ENTITY, action, record)?;
                Decision::deny("reference data is managed by super admins")
            }
            Action::Verify | Action::Download | Action::AccessPanel => {
                return Err(unsupported(Self::ENTITY, action));
            }
        };
        Ok(decision)
    }
}
