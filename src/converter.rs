//! Representation converter.
//!
//! Binds a shared rule registry to a solver and a set of conversion
//! parameter overrides, and applies the cheapest path to a concrete
//! representation object.

use std::collections::BTreeMap;

use crate::limits::SolverLimits;
use crate::registry::SharedRuleRegistry;
use crate::solver::{ConversionGraphSolver, SolverError};
use crate::types::{
    deserialize_parameters, serialize_parameters, ConversionError, ConversionParameters,
    ConversionPath, ConversionPathAndCost, ParameterParseError, RepresentationObject, RuleRef,
};

/// Error type for converter operations.
#[derive(Debug, thiserror::Error)]
pub enum ConverterError {
    /// Path query or selection failed.
    #[error(transparent)]
    Solver(#[from] SolverError),
    /// A rule on the selected path failed.
    #[error("Rule '{rule}' failed: {source}")]
    ConversionFailed {
        /// Name of the failing rule.
        rule: String,
        /// Error reported by the rule.
        #[source]
        source: ConversionError,
    },
    /// No registered rule declares this parameter.
    #[error("Unknown conversion parameter: {0}")]
    UnknownParameter(String),
    /// Serialized parameters could not be parsed.
    #[error(transparent)]
    MalformedParameters(#[from] ParameterParseError),
}

/// Converter over a shared rule registry.
///
/// Path queries hold the registry's read lock only while enumerating;
/// rules run on a snapshot of the chosen path, so registration can proceed
/// while a conversion is in flight.
#[derive(Debug, Clone)]
pub struct Converter {
    registry: SharedRuleRegistry,
    solver: ConversionGraphSolver,
    /// Parameter values set on this converter, by name.
    parameter_overrides: BTreeMap<String, String>,
}

impl Converter {
    /// Create a converter without search limits.
    pub fn new(registry: SharedRuleRegistry) -> Self {
        Self {
            registry,
            solver: ConversionGraphSolver::new(),
            parameter_overrides: BTreeMap::new(),
        }
    }

    /// Use search limits for path queries.
    pub fn with_limits(mut self, limits: SolverLimits) -> Self {
        self.solver = ConversionGraphSolver::with_limits(limits);
        self
    }

    /// The shared registry.
    pub fn registry(&self) -> &SharedRuleRegistry {
        &self.registry
    }

    /// The solver.
    pub fn solver(&self) -> &ConversionGraphSolver {
        &self.solver
    }

    /// Enumerate every simple path over the current registry contents.
    pub fn possible_conversions(&self, source: &str, target: &str) -> Vec<ConversionPathAndCost> {
        let registry = self.registry.read();
        self.solver.possible_conversions(&registry, source, target)
    }

    /// Find the cheapest path over the current registry contents.
    pub fn cheapest_conversion(
        &self,
        source: &str,
        target: &str,
    ) -> Result<ConversionPathAndCost, ConverterError> {
        let registry = self.registry.read();
        Ok(self.solver.cheapest_conversion(&registry, source, target)?)
    }

    /// Convert `object`, a `source` representation, into `target`.
    ///
    /// Converting a representation into itself returns the object
    /// unchanged. Otherwise the rules of the cheapest path run in order,
    /// each with its effective parameters; the first failure aborts.
    pub fn convert(
        &self,
        source: &str,
        object: RepresentationObject,
        target: &str,
    ) -> Result<RepresentationObject, ConverterError> {
        let selected = self.cheapest_conversion(source, target)?;
        tracing::debug!(
            from = source,
            to = target,
            path = %selected.path,
            cost = selected.cost,
            "Selected conversion path"
        );

        let mut current = object;
        for rule in selected.path.rules() {
            let parameters = self.parameters_for_rule(rule);
            current = rule
                .convert(&current, &parameters)
                .map_err(|e| ConverterError::ConversionFailed {
                    rule: rule.name().to_string(),
                    source: e,
                })?;
            tracing::debug!(
                rule = rule.name(),
                produced = rule.target_representation_name(),
                "Applied converter rule"
            );
        }

        Ok(current)
    }

    /// Every parameter declared by a registered rule, with values from
    /// this converter applied.
    ///
    /// When several rules declare the same name, the first registered
    /// rule's default and description are used.
    pub fn available_parameters(&self) -> ConversionParameters {
        let registry = self.registry.read();
        self.merge_parameters(registry.rules())
    }

    /// Parameters relevant to the rules of `path`, with values from this
    /// converter applied.
    pub fn conversion_parameters_for_path(&self, path: &ConversionPath) -> ConversionParameters {
        self.merge_parameters(path.rules())
    }

    /// Set a parameter value for all rules that declare it.
    pub fn set_conversion_parameter(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), ConverterError> {
        if !self.available_parameters().contains_key(name) {
            return Err(ConverterError::UnknownParameter(name.to_string()));
        }
        self.parameter_overrides.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Current value of a parameter: the value set on this converter, or
    /// the declaring rule's default.
    pub fn conversion_parameter(&self, name: &str) -> Option<String> {
        if let Some(value) = self.parameter_overrides.get(name) {
            return Some(value.clone());
        }
        self.available_parameters().get(name).map(|p| p.value.clone())
    }

    /// Drop every value set on this converter.
    pub fn reset_conversion_parameters(&mut self) {
        self.parameter_overrides.clear();
    }

    /// Serialize the available parameters to `name|value|description&...`.
    pub fn serialize_conversion_parameters(&self) -> String {
        serialize_parameters(&self.available_parameters())
    }

    /// Apply values from the serialized form.
    ///
    /// Descriptions in the input are ignored. Fails without applying
    /// anything if the input is malformed or names an unknown parameter.
    pub fn deserialize_conversion_parameters(&mut self, text: &str) -> Result<(), ConverterError> {
        let parsed = deserialize_parameters(text)?;
        let available = self.available_parameters();

        if let Some(unknown) = parsed.keys().find(|name| !available.contains_key(*name)) {
            return Err(ConverterError::UnknownParameter(unknown.clone()));
        }

        for (name, parameter) in parsed {
            self.parameter_overrides.insert(name, parameter.value);
        }
        Ok(())
    }

    fn parameters_for_rule(&self, rule: &RuleRef) -> ConversionParameters {
        let mut parameters = rule.conversion_parameters();
        self.apply_overrides(&mut parameters);
        parameters
    }

    fn merge_parameters(&self, rules: &[RuleRef]) -> ConversionParameters {
        let mut merged = ConversionParameters::new();
        for rule in rules {
            for (name, parameter) in rule.conversion_parameters() {
                merged.entry(name).or_insert(parameter);
            }
        }
        self.apply_overrides(&mut merged);
        merged
    }

    fn apply_overrides(&self, parameters: &mut ConversionParameters) {
        for (name, parameter) in parameters.iter_mut() {
            if let Some(value) = self.parameter_overrides.get(name) {
                parameter.value = value.clone();
            }
        }
    }
}
