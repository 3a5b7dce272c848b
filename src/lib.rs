//! # segmentation-converter
//!
//! Representation-conversion graph for segmentation data.
//!
//! Segment data can be held in several representations (binary labelmap,
//! closed surface, planar contours, ...). Converter rules turn one
//! representation into another; together they form a directed, weighted
//! graph. This crate answers one question:
//!
//! > Which chain of rules turns representation X into representation Y, and
//! > which chain is cheapest?
//!
//! ## Architecture
//!
//! ```text
//! ConverterRule → RuleRegistry → ConversionGraphSolver → ConversionPath
//!                      ↑                                       ↓
//!                  Converter  ─────── applies rules ──→ RepresentationObject
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same registry contents in the same registration order → identical
//!   path enumeration order
//! - Among equally cheap paths, the first enumerated one is selected
//! - The registry fingerprint depends only on the registered rules and
//!   their order

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod rules;
pub mod registry;
pub mod limits;
pub mod solver;
pub mod converter;
pub mod description;
pub mod report;

// Re-exports
pub use types::{
    ConverterRule, ConversionCost, ConversionError, RepresentationObject, RuleRef,
    ConversionPath, ConversionPathAndCost, PathSummary,
    ConversionParameter, ConversionParameters, ParameterParseError,
};
pub use rules::StaticRule;
pub use registry::{RuleRegistry, SharedRuleRegistry};
pub use limits::SolverLimits;
pub use solver::{ConversionGraphSolver, SolverError};
pub use converter::{Converter, ConverterError};
pub use description::{GraphDescription, RuleDescription, DescriptionError};
pub use report::ConversionReport;
