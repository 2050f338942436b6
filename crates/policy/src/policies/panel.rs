use edupath_core::{DomainResult, EntityKind};

use crate::policy::unsupported;
use crate::{Action, Decision, Policy, Subject};

/// Admin panel access. Only the super-admin bypass ever grants it.
#[derive(Debug, Default, Clone, Copy)]
pub struct AdminPanelPolicy;

impl Policy for AdminPanelPolicy {
    type Record = ();

    const ENTITY: EntityKind = EntityKind::AdminPanel;

    fn check(
        &self,
        _subject: &Subject<'_>,
        action: Action,
        _record: Option<&()>,
    ) -> DomainResult<Decision> {
        match action {
            Action::AccessPanel => Ok(Decision::deny("admin panel is reserved for super admins")),
            other => Err(unsupported(Self::ENTITY, other)),
        }
    }
}
