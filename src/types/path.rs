//! Conversion paths.

use std::fmt;
use serde::{Deserialize, Serialize};

use super::rule::{same_rule, RuleRef};

/// An ordered chain of rules leading from one representation to another.
///
/// Consecutive rules are chained (each rule reads what the previous one
/// produced) and no representation appears twice. The empty path is the
/// trivial conversion of a representation into itself.
#[derive(Clone, Default)]
pub struct ConversionPath {
    rules: Vec<RuleRef>,
}

impl ConversionPath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path from rules, in application order.
    pub fn from_rules(rules: Vec<RuleRef>) -> Self {
        Self { rules }
    }

    /// Rules in application order.
    pub fn rules(&self) -> &[RuleRef] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether this is the trivial (identity) path.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Representation this path starts from, if it has any rules.
    pub fn source_representation_name(&self) -> Option<&str> {
        self.rules.first().map(|r| r.source_representation_name())
    }

    /// Representation this path produces, if it has any rules.
    pub fn target_representation_name(&self) -> Option<&str> {
        self.rules.last().map(|r| r.target_representation_name())
    }

    /// Representation names visited, source first.
    ///
    /// Empty for the trivial path.
    pub fn representation_chain(&self) -> Vec<&str> {
        let mut chain = Vec::with_capacity(self.rules.len() + 1);
        if let Some(first) = self.rules.first() {
            chain.push(first.source_representation_name());
        }
        chain.extend(self.rules.iter().map(|r| r.target_representation_name()));
        chain
    }

    /// Whether every rule reads what the previous rule produced.
    pub fn is_chained(&self) -> bool {
        self.rules.windows(2).all(|pair| {
            pair[0].target_representation_name() == pair[1].source_representation_name()
        })
    }

    /// Whether the path contains this exact rule instance.
    pub fn contains_rule(&self, rule: &RuleRef) -> bool {
        self.rules.iter().any(|r| same_rule(r, rule))
    }

    pub(crate) fn push(&mut self, rule: RuleRef) {
        self.rules.push(rule);
    }
}

impl PartialEq for ConversionPath {
    /// Paths are equal when they consist of the same rule instances.
    fn eq(&self, other: &Self) -> bool {
        self.rules.len() == other.rules.len()
            && self.rules.iter().zip(&other.rules).all(|(a, b)| same_rule(a, b))
    }
}

impl Eq for ConversionPath {}

impl fmt::Debug for ConversionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rules.iter()).finish()
    }
}

impl fmt::Display for ConversionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "<identity>");
        }
        write!(f, "{}", self.representation_chain().join(" -> "))
    }
}

/// A conversion path with its summed static cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPathAndCost {
    /// The path.
    pub path: ConversionPath,
    /// Sum of the rules' static costs.
    pub cost: u64,
}

impl ConversionPathAndCost {
    /// Create a new entry.
    pub fn new(path: ConversionPath, cost: u64) -> Self {
        Self { path, cost }
    }

    /// Serializable summary of this entry.
    pub fn summary(&self) -> PathSummary {
        PathSummary::from(self)
    }
}

/// Serializable view of a path, for reports and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSummary {
    /// Representation names visited, source first.
    pub representations: Vec<String>,
    /// Rule names in application order.
    pub rules: Vec<String>,
    /// Total static cost.
    pub cost: u64,
}

impl From<&ConversionPathAndCost> for PathSummary {
    fn from(entry: &ConversionPathAndCost) -> Self {
        Self {
            representations: entry
                .path
                .representation_chain()
                .into_iter()
                .map(str::to_string)
                .collect(),
            rules: entry.path.rules().iter().map(|r| r.name().to_string()).collect(),
            cost: entry.cost,
        }
    }
}
