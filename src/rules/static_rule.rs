//! Fixed-cost rule with an optional conversion closure.

use std::fmt;
use std::sync::Arc;

use crate::types::{
    ConverterRule, ConversionCost, ConversionError, ConversionParameter, ConversionParameters,
    RepresentationObject,
};

/// Conversion action for a [`StaticRule`].
pub type ConvertFn = Arc<
    dyn Fn(&RepresentationObject, &ConversionParameters) -> Result<RepresentationObject, ConversionError>
        + Send
        + Sync,
>;

/// A rule whose cost does not depend on the objects being converted.
///
/// Without a conversion closure the rule still participates in path
/// queries, but applying it fails with [`ConversionError::Unsupported`].
#[derive(Clone)]
pub struct StaticRule {
    name: String,
    source: String,
    target: String,
    cost: ConversionCost,
    parameters: ConversionParameters,
    convert_fn: Option<ConvertFn>,
}

impl StaticRule {
    /// Create a rule describing the edge `source -> target`.
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        cost: ConversionCost,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            target: target.into(),
            cost,
            parameters: ConversionParameters::new(),
            convert_fn: None,
        }
    }

    /// Declare a parameter with its default value.
    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        default_value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.parameters
            .insert(name.into(), ConversionParameter::new(default_value, description));
        self
    }

    /// Attach the conversion action.
    pub fn with_converter<F>(mut self, f: F) -> Self
    where
        F: Fn(&RepresentationObject, &ConversionParameters) -> Result<RepresentationObject, ConversionError>
            + Send
            + Sync
            + 'static,
    {
        self.convert_fn = Some(Arc::new(f));
        self
    }

    /// The fixed cost.
    pub fn cost(&self) -> ConversionCost {
        self.cost
    }
}

impl ConverterRule for StaticRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn source_representation_name(&self) -> &str {
        &self.source
    }

    fn target_representation_name(&self) -> &str {
        &self.target
    }

    fn conversion_cost(
        &self,
        _source: Option<&RepresentationObject>,
        _target: Option<&RepresentationObject>,
    ) -> ConversionCost {
        self.cost
    }

    fn conversion_parameters(&self) -> ConversionParameters {
        self.parameters.clone()
    }

    fn convert(
        &self,
        source: &RepresentationObject,
        parameters: &ConversionParameters,
    ) -> Result<RepresentationObject, ConversionError> {
        match &self.convert_fn {
            Some(f) => f(source, parameters),
            None => Err(ConversionError::Unsupported {
                rule: self.name.clone(),
            }),
        }
    }
}

impl fmt::Debug for StaticRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticRule")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("target", &self.target)
            .field("cost", &self.cost)
            .field("parameters", &self.parameters)
            .field("has_converter", &self.convert_fn.is_some())
            .finish()
    }
}
