//! Access-layer configuration.

use serde::Deserialize;

use edupath_policy::{PolicyConfig, StatePolicyMode};
use edupath_scoping::{ScopeConfig, UnauthenticatedScope};

pub const ENV_UNAUTHENTICATED_SCOPE: &str = "EDUPATH_UNAUTHENTICATED_SCOPE";
pub const ENV_STRICT_SCOPE_OVERRIDES: &str = "EDUPATH_STRICT_SCOPE_OVERRIDES";
pub const ENV_STATE_POLICY: &str = "EDUPATH_STATE_POLICY";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Scope applied when a read arrives without an actor.
    pub unauthenticated_scope: UnauthenticatedScope,
    /// Fail with a configuration error when an entity needs a scope override
    /// it does not provide, instead of falling back to no restriction.
    pub strict_scope_overrides: bool,
    pub state_policy: StatePolicyMode,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            unauthenticated_scope: UnauthenticatedScope::DenyAll,
            strict_scope_overrides: cfg!(debug_assertions),
            state_policy: StatePolicyMode::Permissive,
        }
    }
}

impl AccessConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their default, invalid
    /// values keep their default and are logged.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_UNAUTHENTICATED_SCOPE) {
            match normalize(&raw).as_str() {
                "deny_all" => config.unauthenticated_scope = UnauthenticatedScope::DenyAll,
                "pass_through" => config.unauthenticated_scope = UnauthenticatedScope::PassThrough,
                _ => invalid(ENV_UNAUTHENTICATED_SCOPE, &raw, "deny_all"),
            }
        }

        if let Some(raw) = lookup(ENV_STRICT_SCOPE_OVERRIDES) {
            match normalize(&raw).as_str() {
                "1" | "true" | "yes" | "on" => config.strict_scope_overrides = true,
                "0" | "false" | "no" | "off" => config.strict_scope_overrides = false,
                _ => invalid(
                    ENV_STRICT_SCOPE_OVERRIDES,
                    &raw,
                    if config.strict_scope_overrides { "true" } else { "false" },
                ),
            }
        }

        if let Some(raw) = lookup(ENV_STATE_POLICY) {
            match normalize(&raw).as_str() {
                "permissive" => config.state_policy = StatePolicyMode::Permissive,
                "read_only" => config.state_policy = StatePolicyMode::ReadOnly,
                _ => invalid(ENV_STATE_POLICY, &raw, "permissive"),
            }
        }

        config
    }

    pub fn scope_config(&self) -> ScopeConfig {
        ScopeConfig {
            unauthenticated: self.unauthenticated_scope,
            strict_overrides: self.strict_scope_overrides,
        }
    }

    pub fn policy_config(&self) -> PolicyConfig {
        PolicyConfig {
            state_policy: self.state_policy,
        }
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace('-', "_")
}

fn invalid(key: &str, raw: &str, fallback: &str) {
    tracing::warn!(key, value = raw, fallback, "invalid access configuration value; using default");
}
