//! Converter rule registry.
//!
//! The registry is the edge set of the conversion graph. It is an explicit
//! context object: callers create one, register rules into it, and hand it
//! (or a shared handle to it) to the solver. Independent registries never
//! see each other's rules.
//!
//! ## Ordering
//!
//! Rules are kept in registration order. That order is the order in which
//! the solver visits the rules at every branching point, so it decides
//! which of several equal-cost paths is reported first.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use xxhash_rust::xxh64::Xxh64;

use crate::types::{same_rule, RuleRef};

/// Registry shared between threads.
///
/// Queries take the read lock for the duration of one enumeration;
/// registration takes the write lock.
pub type SharedRuleRegistry = Arc<RwLock<RuleRegistry>>;

/// Ordered set of converter rules, keyed by instance identity.
#[derive(Clone)]
pub struct RuleRegistry {
    rules: Vec<RuleRef>,
    registry_fingerprint: String,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        let mut registry = Self {
            rules: Vec::new(),
            registry_fingerprint: String::new(),
        };
        registry.update_fingerprint();
        registry
    }

    /// Create a registry holding `rules`, in order.
    pub fn with_rules(rules: impl IntoIterator<Item = RuleRef>) -> Self {
        let mut registry = Self::new();
        for rule in rules {
            registry.register(rule);
        }
        registry
    }

    /// Wrap this registry for shared, lock-protected access.
    pub fn into_shared(self) -> SharedRuleRegistry {
        Arc::new(RwLock::new(self))
    }

    /// Register a rule.
    ///
    /// Registering an instance that is already present is a no-op.
    /// Returns whether the rule was added.
    pub fn register(&mut self, rule: RuleRef) -> bool {
        if self.contains(&rule) {
            tracing::trace!(rule = rule.name(), "Rule already registered");
            return false;
        }

        tracing::debug!(
            rule = rule.name(),
            from = rule.source_representation_name(),
            to = rule.target_representation_name(),
            "Registered converter rule"
        );
        self.rules.push(rule);
        self.update_fingerprint();
        true
    }

    /// Unregister a rule instance.
    ///
    /// Returns whether the rule was present.
    pub fn unregister(&mut self, rule: &RuleRef) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| !same_rule(r, rule));

        let removed = self.rules.len() != before;
        if removed {
            tracing::debug!(rule = rule.name(), "Unregistered converter rule");
            self.update_fingerprint();
        }
        removed
    }

    /// Remove every rule converting `source` into `target`.
    ///
    /// Returns the number of rules removed.
    pub fn disable_rule(&mut self, source: &str, target: &str) -> usize {
        self.remove_where(|r| {
            r.source_representation_name() == source && r.target_representation_name() == target
        })
    }

    /// Remove every rule that reads or produces `name`.
    ///
    /// Returns the number of rules removed.
    pub fn disable_representation(&mut self, name: &str) -> usize {
        self.remove_where(|r| {
            r.source_representation_name() == name || r.target_representation_name() == name
        })
    }

    /// Remove all rules.
    pub fn clear(&mut self) {
        if !self.rules.is_empty() {
            self.rules.clear();
            self.update_fingerprint();
        }
    }

    /// All rules, in registration order.
    pub fn rules(&self) -> &[RuleRef] {
        &self.rules
    }

    /// Rules reading `source`, in registration order.
    pub fn rules_from(&self, source: &str) -> Vec<RuleRef> {
        self.indices_from(source).map(|i| Arc::clone(&self.rules[i])).collect()
    }

    /// Rules producing `target`, in registration order.
    pub fn rules_into(&self, target: &str) -> Vec<RuleRef> {
        self.indices_into(target).map(|i| Arc::clone(&self.rules[i])).collect()
    }

    /// Positions in [`rules`](Self::rules) of the rules reading `source`.
    pub(crate) fn indices_from<'a>(&'a self, source: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.rules
            .iter()
            .enumerate()
            .filter(move |(_, r)| r.source_representation_name() == source)
            .map(|(i, _)| i)
    }

    /// Positions in [`rules`](Self::rules) of the rules producing `target`.
    pub(crate) fn indices_into<'a>(&'a self, target: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.rules
            .iter()
            .enumerate()
            .filter(move |(_, r)| r.target_representation_name() == target)
            .map(|(i, _)| i)
    }

    /// Every representation name that appears in some rule.
    pub fn representation_names(&self) -> BTreeSet<String> {
        self.rules
            .iter()
            .flat_map(|r| [r.source_representation_name(), r.target_representation_name()])
            .map(str::to_string)
            .collect()
    }

    /// Whether this exact rule instance is registered.
    pub fn contains(&self, rule: &RuleRef) -> bool {
        self.rules.iter().any(|r| same_rule(r, rule))
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Get the registry fingerprint.
    ///
    /// This changes whenever rules are added or removed.
    pub fn fingerprint(&self) -> &str {
        &self.registry_fingerprint
    }

    fn remove_where(&mut self, predicate: impl Fn(&RuleRef) -> bool) -> usize {
        let before = self.rules.len();
        self.rules.retain(|r| !predicate(r));

        let removed = before - self.rules.len();
        if removed > 0 {
            tracing::debug!(removed, "Disabled converter rules");
            self.update_fingerprint();
        }
        removed
    }

    /// Update the registry fingerprint.
    ///
    /// Hashes `(name, source, target)` of every rule in registration order.
    /// Each field is length-prefixed so that field boundaries are part of
    /// the hash.
    fn update_fingerprint(&mut self) {
        let mut hasher = Xxh64::new(0);

        for rule in &self.rules {
            for field in [
                rule.name(),
                rule.source_representation_name(),
                rule.target_representation_name(),
            ] {
                hasher.update(&(field.len() as u64).to_le_bytes());
                hasher.update(field.as_bytes());
            }
        }

        self.registry_fingerprint = format!("{:016x}", hasher.digest());
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rules)
            .field("fingerprint", &self.registry_fingerprint)
            .finish()
    }
}
