//! Registry configuration.

use std::collections::HashMap;

use serde::Deserialize;

/// What happens when a custom rule is registered under a built-in name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowPolicy {
    /// Refuse with [`RuleError::Conflict`](crate::RuleError::Conflict).
    #[default]
    Reject,
    /// Install the custom rule; the built-in stays reachable through
    /// [`Registry::builtin`](crate::Registry::builtin).
    Allow,
}

/// Settings for building a [`Registry`](crate::Registry).
///
/// Deserializable so hosts can carry it inside their own configuration:
///
/// ```
/// use rulebook_validator::{RegistryConfig, ShadowPolicy};
///
/// let config: RegistryConfig = serde_json::from_str(
///     r#"{ "shadow_policy": "allow", "aliases": { "oneOf": "enum" } }"#,
/// ).unwrap();
/// assert_eq!(config.shadow_policy, ShadowPolicy::Allow);
/// assert!(config.builtins);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Policy for custom rules that collide with built-ins.
    pub shadow_policy: ShadowPolicy,
    /// Install the built-in rule set and its aliases.
    pub builtins: bool,
    /// Extra `alias -> canonical` mappings.
    pub aliases: HashMap<String, String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            shadow_policy: ShadowPolicy::Reject,
            builtins: true,
            aliases: HashMap::new(),
        }
    }
}

impl RegistryConfig {
    /// Set the shadow policy.
    #[must_use]
    pub fn with_shadow_policy(mut self, policy: ShadowPolicy) -> Self {
        self.shadow_policy = policy;
        self
    }

    /// Start from an empty rule set.
    #[must_use]
    pub fn without_builtins(mut self) -> Self {
        self.builtins = false;
        self
    }

    /// Add an alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), canonical.into());
        self
    }
}
