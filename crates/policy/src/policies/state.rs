use serde::Deserialize;

use edupath_core::{DomainResult, EntityKind, State};

use crate::policy::{require, unsupported};
use crate::{Action, Decision, Policy, Subject};

/// How much linked actors may do with states.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatePolicyMode {
    /// Any linked profile may read and write states, with no branch check.
    #[default]
    Permissive,
    /// States behave like the other reference data: read-only.
    ReadOnly,
}

/// States (provinces). Unlike countries, writes are open to every linked
/// profile in [`StatePolicyMode::Permissive`]; each such grant is logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatePolicy {
    mode: StatePolicyMode,
}

impl StatePolicy {
    pub fn new(mode: StatePolicyMode) -> Self {
        Self { mode }
    }

    fn write(&self, subject: &Subject<'_>, action: Action, state: Option<&State>) -> Decision {
        if !subject.profile().has_linked_profile() {
            return Decision::deny("actor has no linked profile");
        }
        match self.mode {
            StatePolicyMode::ReadOnly => Decision::deny("states are read-only"),
            StatePolicyMode::Permissive => {
                tracing::warn!(
                    actor = %subject.profile().actor_id,
                    %action,
                    state = ?state.map(|s| s.id),
                    "permissive state policy granted a write"
                );
                Decision::allow("permissive state policy: any linked profile may write")
            }
        }
    }
}

impl Policy for StatePolicy {
    type Record = State;

    const ENTITY: EntityKind = EntityKind::State;

    fn check(
        &self,
        subject: &Subject<'_>,
        action: Action,
        record: Option<&State>,
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
            Action::Create => self.write(subject, action, None),
            Action::Update | Action::Delete => {
                let state = require(Self::ENTITY, action, record)?;
                self.write(subject, action, Some(state))
            }
            Action::Restore | Action::ForceDelete => {
                require(Self::ENTITY, action, record)?;
                Decision::deny("only super admins restore or purge states")
            }
            Action::Verify | Action::Download | Action::AccessPanel => {
                return Err(unsupported(Self::ENTITY, action));
            }
        };
        Ok(decision)
    }
}
