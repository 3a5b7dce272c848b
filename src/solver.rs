//! Conversion graph solver.
//!
//! Treats representation names as nodes and registered rules as weighted,
//! directed edges, enumerates every simple path between two
//! representations and picks the cheapest.

use std::sync::Arc;

use crate::limits::SolverLimits;
use crate::registry::RuleRegistry;
use crate::types::{static_cost, ConversionCost, ConversionPath, ConversionPathAndCost};

/// Error type for path selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolverError {
    /// Cheapest-path selection was asked to choose from nothing.
    #[error("Cannot select a cheapest path from an empty path set")]
    EmptyPathSet,
    /// No chain of registered rules connects the two representations.
    #[error("No conversion path from '{from}' to '{to}'")]
    NoPathFound {
        /// Requested source representation.
        from: String,
        /// Requested target representation.
        to: String,
    },
}

/// Stateless path solver over a registry snapshot.
///
/// ## Algorithm
///
/// 1. Evaluate every rule's static cost once (`conversion_cost(None, None)`)
/// 2. Depth-first search anchored at the target, extending the path one rule
///    toward the source at a time and tracking the representations already
///    on it so that no name is visited twice
/// 3. At each node, walk the rules producing it in registration order: a
///    rule reading the source completes a path, any other rule is descended
///    into before the next sibling is looked at
/// 4. Never extend a path past the source
///
/// Paths are reported in application order (source first).
///
/// The result order is therefore fully determined by registration order,
/// and [`ConversionGraphSolver::cheapest_path`] keeps the first of several
/// equally cheap paths.
///
/// Converting a representation into itself yields one empty path of cost 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversionGraphSolver {
    limits: SolverLimits,
}

impl ConversionGraphSolver {
    /// Create a solver without search limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with search limits.
    pub fn with_limits(limits: SolverLimits) -> Self {
        Self { limits }
    }

    /// Get the limits.
    pub fn limits(&self) -> &SolverLimits {
        &self.limits
    }

    /// Enumerate every simple path from `source` to `target`.
    ///
    /// An empty result means the representations are not connected; it is
    /// not an error.
    pub fn possible_conversions(
        &self,
        registry: &RuleRegistry,
        source: &str,
        target: &str,
    ) -> Vec<ConversionPathAndCost> {
        if source == target {
            tracing::trace!(representation = source, "Identity conversion");
            return vec![ConversionPathAndCost::new(ConversionPath::new(), 0)];
        }

        let mut search = PathSearch::new(registry, source, self.limits);
        search.visited.push(target);
        search.visit(target);

        if search.hit_path_limit {
            tracing::warn!(
                from = source,
                to = target,
                max_paths = ?self.limits.max_paths,
                "Path enumeration stopped at the path limit"
            );
        }
        if search.hit_depth_limit {
            tracing::warn!(
                from = source,
                to = target,
                max_depth = ?self.limits.max_depth,
                "Paths longer than the depth limit were not explored"
            );
        }

        tracing::debug!(
            from = source,
            to = target,
            paths = search.results.len(),
            rules = registry.len(),
            "Enumerated conversion paths"
        );

        search.results
    }

    /// Select the cheapest path.
    ///
    /// Ties go to the entry that comes first in `paths`.
    pub fn cheapest_path(
        paths: &[ConversionPathAndCost],
    ) -> Result<&ConversionPath, SolverError> {
        Self::cheapest_entry(paths)
            .map(|entry| &entry.path)
            .ok_or(SolverError::EmptyPathSet)
    }

    /// Select the cheapest entry, keeping the first of equally cheap ones.
    pub fn cheapest_entry(paths: &[ConversionPathAndCost]) -> Option<&ConversionPathAndCost> {
        let mut cheapest: Option<&ConversionPathAndCost> = None;
        for entry in paths {
            match cheapest {
                Some(best) if entry.cost >= best.cost => {}
                _ => cheapest = Some(entry),
            }
        }
        cheapest
    }

    /// Find the cheapest conversion from `source` to `target`.
    pub fn cheapest_conversion(
        &self,
        registry: &RuleRegistry,
        source: &str,
        target: &str,
    ) -> Result<ConversionPathAndCost, SolverError> {
        let paths = self.possible_conversions(registry, source, target);

        Self::cheapest_entry(&paths)
            .cloned()
            .ok_or_else(|| SolverError::NoPathFound {
                from: source.to_string(),
                to: target.to_string(),
            })
    }
}

/// State of one enumeration.
struct PathSearch<'a> {
    registry: &'a RuleRegistry,
    costs: Vec<ConversionCost>,
    source: &'a str,
    limits: SolverLimits,
    /// Representations on the current path, target first.
    visited: Vec<&'a str>,
    /// Indices into the registry's rules, from the target backwards.
    path: Vec<usize>,
    results: Vec<ConversionPathAndCost>,
    hit_path_limit: bool,
    hit_depth_limit: bool,
}

impl<'a> PathSearch<'a> {
    fn new(registry: &'a RuleRegistry, source: &'a str, limits: SolverLimits) -> Self {
        Self {
            registry,
            costs: registry.rules().iter().map(static_cost).collect(),
            source,
            limits,
            visited: Vec::new(),
            path: Vec::new(),
            results: Vec::new(),
            hit_path_limit: false,
            hit_depth_limit: false,
        }
    }

    fn visit(&mut self, node: &'a str) {
        let registry = self.registry;
        let rules = registry.rules();

        for i in registry.indices_into(node) {
            let previous = rules[i].source_representation_name();

            if previous == self.source {
                if self.fits_depth(self.path.len() + 1) && !self.record(i) {
                    return;
                }
                continue;
            }
            if self.visited.contains(&previous) {
                continue;
            }
            // At least one more rule is needed to get back to the source
            if !self.fits_depth(self.path.len() + 2) {
                continue;
            }

            self.path.push(i);
            self.visited.push(previous);
            self.visit(previous);
            self.visited.pop();
            self.path.pop();

            if self.hit_path_limit {
                return;
            }
        }
    }

    fn fits_depth(&mut self, length: usize) -> bool {
        match self.limits.max_depth {
            Some(max) if length > max => {
                self.hit_depth_limit = true;
                false
            }
            _ => true,
        }
    }

    /// Record the current path extended by `first`, the rule reading the
    /// source. Returns false once the path limit is reached.
    fn record(&mut self, first: usize) -> bool {
        if let Some(max) = self.limits.max_paths {
            if self.results.len() >= max {
                self.hit_path_limit = true;
                return false;
            }
        }

        let rules = self.registry.rules();
        let indices = std::iter::once(first).chain(self.path.iter().rev().copied());
        let mut path = ConversionPath::new();
        let mut cost: u64 = 0;
        for i in indices {
            path.push(Arc::clone(&rules[i]));
            cost = cost.saturating_add(u64::from(self.costs[i]));
        }

        tracing::trace!(path = %path, cost, "Found conversion path");
        self.results.push(ConversionPathAndCost::new(path, cost));
        true
    }
}
