use std::borrow::Cow;

use serde::Serialize;

/// Outcome of a policy check: a strict yes/no plus the rule that decided it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub granted: bool,
    pub reason: Cow<'static, str>,
}

impl Decision {
    pub fn allow(reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            granted: true,
            reason: reason.into(),
        }
    }

    pub fn deny(reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            granted: false,
            reason: reason.into(),
        }
    }

    /// Allow with `allow_reason` when `condition` holds, otherwise deny with `deny_reason`.
    pub fn when(condition: bool, allow_reason: &'static str, deny_reason: &'static str) -> Self {
        if condition {
            Self::allow(allow_reason)
        } else {
            Self::deny(deny_reason)
        }
    }

    pub fn is_granted(&self) -> bool {
        self.granted
    }
}
