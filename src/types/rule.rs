//! Converter rule abstraction.
//!
//! A rule is one directed, weighted edge of the conversion graph: it knows
//! which representation it reads, which one it produces, what that costs,
//! and how to perform the conversion on a concrete object.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::parameters::ConversionParameters;

/// Opaque representation payload handed to rules.
///
/// The graph algorithm never looks inside; rules downcast to the concrete
/// type they expect.
pub type RepresentationObject = Arc<dyn Any + Send + Sync>;

/// Cost of applying a single rule.
pub type ConversionCost = u32;

/// Shared handle to a registered rule.
///
/// Identity is the allocation, not the rule's names: two distinct
/// instances converting the same pair of representations are two edges.
pub type RuleRef = Arc<dyn ConverterRule>;

/// Error raised by a rule's conversion action.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// The rule describes an edge but carries no conversion action.
    #[error("Rule '{rule}' does not implement a conversion")]
    Unsupported {
        /// Name of the rule.
        rule: String,
    },
    /// The source object was not of the type the rule reads.
    #[error("Rule '{rule}' expected a {expected} source object")]
    UnexpectedInput {
        /// Name of the rule.
        rule: String,
        /// Human-readable name of the expected payload type.
        expected: String,
    },
    /// The conversion itself failed.
    #[error("Conversion failed: {0}")]
    Failed(String),
}

/// One directed edge of the conversion graph.
///
/// Rules are read-only while the graph is queried. `conversion_cost` is
/// called with `None, None` during path enumeration, before any concrete
/// objects exist, and must return the same value every time in that case.
pub trait ConverterRule: Send + Sync {
    /// Display name. Not unique; diagnostics only.
    fn name(&self) -> &str;

    /// Representation this rule reads.
    fn source_representation_name(&self) -> &str;

    /// Representation this rule produces.
    fn target_representation_name(&self) -> &str;

    /// Cost of converting `source` into `target`.
    fn conversion_cost(
        &self,
        source: Option<&RepresentationObject>,
        target: Option<&RepresentationObject>,
    ) -> ConversionCost;

    /// Parameters this rule understands, with their default values.
    fn conversion_parameters(&self) -> ConversionParameters {
        ConversionParameters::new()
    }

    /// Convert `source` into a new target representation object.
    fn convert(
        &self,
        source: &RepresentationObject,
        parameters: &ConversionParameters,
    ) -> Result<RepresentationObject, ConversionError>;
}

impl fmt::Debug for dyn ConverterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} -> {})",
            self.name(),
            self.source_representation_name(),
            self.target_representation_name()
        )
    }
}

/// Check whether two handles point at the same rule instance.
///
/// Compares data pointers only; vtable pointers of the same type may
/// differ across codegen units.
pub fn same_rule(a: &RuleRef, b: &RuleRef) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

/// Static cost estimate used for path enumeration.
pub fn static_cost(rule: &RuleRef) -> ConversionCost {
    rule.conversion_cost(None, None)
}
