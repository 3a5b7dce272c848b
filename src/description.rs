//! Declarative rule graph descriptions.
//!
//! A description lists static-cost rules as JSON:
//!
//! ```json
//! {
//!   "rules": [
//!     { "name": "Labelmap to surface", "source": "BinaryLabelmap", "target": "ClosedSurface", "cost": 5 }
//!   ]
//! }
//! ```
//!
//! Rules built from a description carry no conversion action; they are
//! meant for inspecting and testing conversion graphs.

use std::sync::Arc;
use serde::{Deserialize, Serialize};

use crate::registry::RuleRegistry;
use crate::rules::StaticRule;
use crate::types::{ConversionCost, RuleRef};

/// Error loading a description.
#[derive(Debug, thiserror::Error)]
pub enum DescriptionError {
    /// The document is not a valid description.
    #[error("Invalid graph description: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One rule of a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDescription {
    /// Display name. Defaults to `"<source> to <target>"`.
    #[serde(default)]
    pub name: Option<String>,
    /// Source representation.
    pub source: String,
    /// Target representation.
    pub target: String,
    /// Static cost.
    pub cost: ConversionCost,
}

impl RuleDescription {
    /// Create a description entry.
    pub fn new(source: impl Into<String>, target: impl Into<String>, cost: ConversionCost) -> Self {
        Self {
            name: None,
            source: source.into(),
            target: target.into(),
            cost,
        }
    }

    /// Build the rule.
    pub fn to_rule(&self) -> StaticRule {
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| format!("{} to {}", self.source, self.target));
        StaticRule::new(name, self.source.clone(), self.target.clone(), self.cost)
    }
}

/// A whole rule graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDescription {
    /// Rules in registration order.
    pub rules: Vec<RuleDescription>,
}

impl GraphDescription {
    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, DescriptionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a registry with one rule per entry, in document order.
    pub fn to_registry(&self) -> RuleRegistry {
        RuleRegistry::with_rules(
            self.rules
                .iter()
                .map(|entry| Arc::new(entry.to_rule()) as RuleRef),
        )
    }
}
