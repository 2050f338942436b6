use core::str::FromStr;

use serde::{Deserialize, Serialize};

use edupath_core::DomainError;

/// Action a policy is asked about.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// May the actor query the list endpoint at all (no record).
    ViewAny,
    View,
    Create,
    Update,
    Delete,
    Restore,
    ForceDelete,
    /// Student documents only.
    Verify,
    /// Student documents only.
    Download,
    /// Admin panel only.
    AccessPanel,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::ViewAny,
        Action::View,
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::Restore,
        Action::ForceDelete,
        Action::Verify,
        Action::Download,
        Action::AccessPanel,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Action::ViewAny => "view_any",
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Restore => "restore",
            Action::ForceDelete => "force_delete",
            Action::Verify => "verify",
            Action::Download => "download",
            Action::AccessPanel => "access_panel",
        }
    }

    /// Whether the action is about one specific record.
    pub const fn requires_record(self) -> bool {
        !matches!(self, Action::ViewAny | Action::Create | Action::AccessPanel)
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the camelCase names used by route definitions as well.
        let normalized = match s.trim() {
            "viewAny" => "view_any",
            "forceDelete" => "force_delete",
            "accessPanel" => "access_panel",
            other => other,
        };
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| DomainError::validation(format!("unknown action '{s}'")))
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
