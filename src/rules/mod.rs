//! Concrete rule implementations.

pub mod static_rule;

pub use static_rule::{StaticRule, ConvertFn};
