//! Rule registry: canonical name → descriptor.
//!
//! Reads go through an [`ArcSwap`] snapshot and never block. Writers are
//! serialized by a mutex, copy the current map, apply their change and publish
//! the new map in one store, so a reader sees either the old or the new
//! descriptor for a name and nothing in between.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::alias::AliasTable;
use crate::config::{RegistryConfig, ShadowPolicy};
use crate::descriptor::RuleDescriptor;
use crate::error::{RuleError, RuleResult};
use crate::predicate::Predicate;

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::with_builtins);

/// The process-wide registry, with the built-in rule set installed.
pub fn global() -> &'static Registry {
    &GLOBAL
}

// ============================================================================
// ENTRIES
// ============================================================================

#[derive(Clone)]
struct RuleEntry {
    /// Descriptor invocations use.
    active: Arc<RuleDescriptor>,
    /// The built-in registered under this name, kept while shadowed.
    builtin: Option<Arc<RuleDescriptor>>,
}

type Entries = HashMap<String, RuleEntry>;

// ============================================================================
// REGISTRY
// ============================================================================

/// Maps canonical rule names to their descriptors.
///
/// ```
/// use rulebook_validator::{Predicate, Registry};
/// use serde_json::json;
///
/// let registry = Registry::new();
/// registry
///     .register_custom("isEven", Predicate::nullary(|n: i64| n % 2 == 0))
///     .unwrap();
///
/// assert!(registry.is_registered("isEven"));
/// assert!(registry.invoke("isEven", &json!(4), &[]).unwrap());
/// ```
pub struct Registry {
    entries: ArcSwap<Entries>,
    writer: Mutex<()>,
    aliases: Arc<AliasTable>,
    shadow_policy: ShadowPolicy,
}

impl Registry {
    /// An empty registry without aliases, rejecting built-in shadowing.
    pub fn new() -> Self {
        Self::with_parts(Arc::new(AliasTable::new()), ShadowPolicy::Reject)
    }

    /// Builder for a configured registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// A registry with the built-in rules and aliases installed.
    pub fn with_builtins() -> Self {
        // The built-in set is fixed at compile time; a failure here is a bug
        // caught by the crate's own tests.
        RegistryBuilder::new()
            .build()
            .expect("built-in rule set must be consistent")
    }

    fn with_parts(aliases: Arc<AliasTable>, shadow_policy: ShadowPolicy) -> Self {
        Self {
            entries: ArcSwap::from_pointee(Entries::new()),
            writer: Mutex::new(()),
            aliases,
            shadow_policy,
        }
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Registers `predicate` under `name`.
    ///
    /// Built-in names can be registered once. A custom registration over a
    /// built-in follows the registry's [`ShadowPolicy`]; over another custom
    /// rule, the last write wins. On error the registry is unchanged.
    pub fn register(
        &self,
        name: impl Into<String>,
        predicate: Predicate,
        is_builtin: bool,
    ) -> RuleResult<()> {
        let descriptor = RuleDescriptor::new(name.into(), predicate, is_builtin)?;

        let _guard = self.writer.lock();
        let mut next = Entries::clone(&self.entries.load());
        self.insert(&mut next, descriptor)?;
        self.entries.store(Arc::new(next));
        Ok(())
    }

    /// Registers a built-in rule.
    pub fn register_builtin(&self, name: impl Into<String>, predicate: Predicate) -> RuleResult<()> {
        self.register(name, predicate, true)
    }

    /// Registers a user rule.
    pub fn register_custom(&self, name: impl Into<String>, predicate: Predicate) -> RuleResult<()> {
        self.register(name, predicate, false)
    }

    /// Registers a batch of built-ins and publishes them together.
    ///
    /// Either every rule is installed or, on the first error, none is.
    /// Returns the number of rules installed.
    pub fn extend_builtins<N>(
        &self,
        rules: impl IntoIterator<Item = (N, Predicate)>,
    ) -> RuleResult<usize>
    where
        N: Into<String>,
    {
        let _guard = self.writer.lock();
        let mut next = Entries::clone(&self.entries.load());
        let mut count = 0;
        for (name, predicate) in rules {
            let descriptor = RuleDescriptor::new(name.into(), predicate, true)?;
            self.insert(&mut next, descriptor)?;
            count += 1;
        }
        self.entries.store(Arc::new(next));
        Ok(count)
    }

    fn insert(&self, entries: &mut Entries, descriptor: RuleDescriptor) -> RuleResult<()> {
        let name = descriptor.name().to_owned();
        if let Some(target) = self.aliases.get(&name) {
            return Err(RuleError::conflict(
                name,
                format!("name is an alias of '{target}'"),
            ));
        }

        let descriptor = Arc::new(descriptor);
        let entry = match entries.get(&name) {
            Some(_) if descriptor.is_builtin() => {
                return Err(RuleError::conflict(name, "a rule with this name is already registered"));
            }
            Some(RuleEntry {
                builtin: Some(builtin),
                ..
            }) => match self.shadow_policy {
                ShadowPolicy::Reject => {
                    return Err(RuleError::conflict(name, "name belongs to a built-in rule"));
                }
                ShadowPolicy::Allow => {
                    warn!(rule = %name, "custom rule shadows a built-in");
                    RuleEntry {
                        active: descriptor,
                        builtin: Some(Arc::clone(builtin)),
                    }
                }
            },
            Some(_) => {
                debug!(rule = %name, "replacing custom rule");
                RuleEntry {
                    active: descriptor,
                    builtin: None,
                }
            }
            None => {
                debug!(
                    rule = %name,
                    builtin = descriptor.is_builtin(),
                    signature = %descriptor.signature(),
                    "registering rule"
                );
                let builtin = descriptor.is_builtin().then(|| Arc::clone(&descriptor));
                RuleEntry {
                    active: descriptor,
                    builtin,
                }
            }
        };
        entries.insert(name, entry);
        Ok(())
    }

    /// Removes a custom rule, reinstating the built-in it shadowed if any.
    ///
    /// Returns the removed descriptor, or `None` when `name` has no custom
    /// rule. Built-ins are never removed. Removing a custom rule that an alias
    /// points at, with no built-in underneath, is a
    /// [`Conflict`](RuleError::Conflict).
    pub fn unregister_custom(&self, name: &str) -> RuleResult<Option<Arc<RuleDescriptor>>> {
        let _guard = self.writer.lock();
        let current = self.entries.load();
        let Some(entry) = current.get(name) else {
            return Ok(None);
        };
        if entry.active.is_builtin() {
            return Ok(None);
        }

        let mut next = Entries::clone(&current);
        match &entry.builtin {
            Some(builtin) => {
                next.insert(
                    name.to_owned(),
                    RuleEntry {
                        active: Arc::clone(builtin),
                        builtin: Some(Arc::clone(builtin)),
                    },
                );
                debug!(rule = %name, "custom rule removed, built-in reinstated");
            }
            None => {
                if let Some(alias) = self.aliases.aliases_of(name).first() {
                    return Err(RuleError::conflict(
                        name,
                        format!("alias '{alias}' still points at this rule"),
                    ));
                }
                next.remove(name);
                debug!(rule = %name, "custom rule removed");
            }
        }

        let removed = Arc::clone(&entry.active);
        self.entries.store(Arc::new(next));
        Ok(Some(removed))
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    /// Active descriptor for a canonical name. Aliases are not resolved.
    pub fn lookup(&self, canonical: &str) -> Option<Arc<RuleDescriptor>> {
        self.entries
            .load()
            .get(canonical)
            .map(|entry| Arc::clone(&entry.active))
    }

    /// The built-in registered under `canonical`, even while shadowed.
    pub fn builtin(&self, canonical: &str) -> Option<Arc<RuleDescriptor>> {
        self.entries
            .load()
            .get(canonical)
            .and_then(|entry| entry.builtin.clone())
    }

    /// Resolves an alias to its canonical name.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.resolve(name)
    }

    /// Whether `name` (canonical or alias) has a registered rule.
    pub fn is_registered(&self, name: &str) -> bool {
        self.contains(self.resolve(name))
    }

    fn contains(&self, canonical: &str) -> bool {
        self.entries.load().contains_key(canonical)
    }

    /// Canonical names of all registered rules, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.load().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered canonical names.
    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    /// Whether no rule is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.load().is_empty()
    }

    /// The registry's alias table.
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Policy applied to custom rules that collide with built-ins.
    pub fn shadow_policy(&self) -> ShadowPolicy {
        self.shadow_policy
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("rules", &self.len())
            .field("aliases", &self.aliases.len())
            .field("shadow_policy", &self.shadow_policy)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builds a [`Registry`] from a [`RegistryConfig`] plus custom rules.
///
/// [`build`](RegistryBuilder::build) installs the built-ins (unless disabled),
/// then the custom rules, and finally checks every alias against the result.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    config: RegistryConfig,
    rules: Vec<(String, Predicate)>,
}

impl RegistryBuilder {
    /// A builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder starting from `config`.
    pub fn from_config(config: RegistryConfig) -> Self {
        Self {
            config,
            rules: Vec::new(),
        }
    }

    /// Set the shadow policy.
    pub fn shadow_policy(mut self, policy: ShadowPolicy) -> Self {
        self.config.shadow_policy = policy;
        self
    }

    /// Skip the built-in rules and aliases.
    pub fn without_builtins(mut self) -> Self {
        self.config.builtins = false;
        self
    }

    /// Add an alias.
    pub fn alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.config.aliases.insert(alias.into(), canonical.into());
        self
    }

    /// Add a custom rule.
    pub fn rule(mut self, name: impl Into<String>, predicate: Predicate) -> Self {
        self.rules.push((name.into(), predicate));
        self
    }

    /// Builds the registry.
    pub fn build(self) -> RuleResult<Registry> {
        let RegistryConfig {
            shadow_policy,
            builtins,
            aliases,
        } = self.config;

        let table = if builtins {
            AliasTable::builtin().extended(aliases)
        } else {
            AliasTable::from_pairs(aliases)
        };
        let registry = Registry::with_parts(Arc::new(table), shadow_policy);

        if builtins {
            let count = registry.extend_builtins(builtin_rules())?;
            info!(count, "installed built-in rules");
        }
        for (name, predicate) in self.rules {
            registry.register_custom(name, predicate)?;
        }

        registry.aliases.check(|name| registry.contains(name))?;
        Ok(registry)
    }
}

#[cfg(feature = "builtins")]
fn builtin_rules() -> Vec<(&'static str, Predicate)> {
    crate::builtins::all()
}

#[cfg(not(feature = "builtins"))]
fn builtin_rules() -> Vec<(&'static str, Predicate)> {
    Vec::new()
}
