//! Core types for the conversion engine.

pub mod rule;
pub mod path;
pub mod parameters;

pub use rule::{
    ConverterRule, ConversionCost, ConversionError, RepresentationObject, RuleRef,
    same_rule, static_cost,
};
pub use path::{ConversionPath, ConversionPathAndCost, PathSummary};
pub use parameters::{
    ConversionParameter, ConversionParameters, ParameterParseError,
    serialize_parameters, deserialize_parameters,
    PARAMETER_SEPARATOR, PARAMETER_FIELD_SEPARATOR,
};
