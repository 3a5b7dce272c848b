//! Serializable summary of a path query.

use serde::{Deserialize, Serialize};

use crate::registry::RuleRegistry;
use crate::solver::ConversionGraphSolver;
use crate::types::PathSummary;

/// Result of one `source -> target` query, ready for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Fingerprint of the registry the query ran against.
    pub registry_fingerprint: String,
    /// Number of registered rules.
    pub rule_count: usize,
    /// Requested source representation.
    pub source: String,
    /// Requested target representation.
    pub target: String,
    /// Every path, in enumeration order.
    pub paths: Vec<PathSummary>,
    /// The selected path, if any path exists.
    pub cheapest: Option<PathSummary>,
}

impl ConversionReport {
    /// Run the query and summarize it.
    pub fn build(
        solver: &ConversionGraphSolver,
        registry: &RuleRegistry,
        source: &str,
        target: &str,
    ) -> Self {
        let paths = solver.possible_conversions(registry, source, target);

        let cheapest = ConversionGraphSolver::cheapest_entry(&paths).map(PathSummary::from);

        Self {
            registry_fingerprint: registry.fingerprint().to_string(),
            rule_count: registry.len(),
            source: source.to_string(),
            target: target.to_string(),
            paths: paths.iter().map(PathSummary::from).collect(),
            cheapest,
        }
    }
}
