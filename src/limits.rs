//! Search budget for path enumeration.
//!
//! Enumerating every simple path is exponential in the worst case. The
//! limits below cap that work; both are off by default, in which case the
//! solver reports every simple path.

use serde::{Deserialize, Serialize};

/// Environment variable holding the maximum number of rules per path.
pub const MAX_DEPTH_ENV: &str = "CONVGRAPH_MAX_DEPTH";

/// Environment variable holding the maximum number of reported paths.
pub const MAX_PATHS_ENV: &str = "CONVGRAPH_MAX_PATHS";

/// Limits applied by the solver.
///
/// - `max_depth`: longest path, in rules, that is explored
/// - `max_paths`: enumeration stops once this many paths were found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverLimits {
    /// Maximum number of rules in a reported path.
    pub max_depth: Option<usize>,
    /// Maximum number of reported paths.
    pub max_paths: Option<usize>,
}

impl SolverLimits {
    /// No limits: every simple path is reported.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Set the maximum path length in rules.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Set the maximum number of reported paths.
    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = Some(max_paths);
        self
    }

    /// Whether any limit is set.
    pub fn is_limited(&self) -> bool {
        self.max_depth.is_some() || self.max_paths.is_some()
    }

    /// Read limits from `CONVGRAPH_MAX_DEPTH` and `CONVGRAPH_MAX_PATHS`.
    ///
    /// Unset variables leave the limit off. Unparseable values are ignored
    /// with a warning.
    pub fn from_env() -> Self {
        Self {
            max_depth: read_env_limit(MAX_DEPTH_ENV),
            max_paths: read_env_limit(MAX_PATHS_ENV),
        }
    }
}

fn read_env_limit(key: &str) -> Option<usize> {
    let raw = std::env::var(key).ok()?;
    parse_limit(key, &raw)
}

fn parse_limit(key: &str, raw: &str) -> Option<usize> {
    match raw.trim().parse::<usize>() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(
                variable = key,
                value = raw,
                error = %e,
                "Ignoring invalid solver limit"
            );
            None
        }
    }
}
