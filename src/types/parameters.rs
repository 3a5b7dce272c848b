//! Conversion parameters.
//!
//! Rules may expose named string parameters (for example an oversampling
//! factor) with a default value and a description. A converter can override
//! the values; the merged set is passed to each rule when it runs.
//!
//! ## Text Format
//!
//! Parameter sets serialize to `name|value|description` records joined by
//! `&`. The description field is optional when parsing.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Separator between parameter records.
pub const PARAMETER_SEPARATOR: &str = "&";

/// Separator between the fields of one record.
pub const PARAMETER_FIELD_SEPARATOR: &str = "|";

/// A single conversion parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionParameter {
    /// Current value.
    pub value: String,
    /// Human-readable description.
    pub description: String,
}

impl ConversionParameter {
    /// Create a new parameter.
    pub fn new(value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: description.into(),
        }
    }
}

/// Parameters by name. Ordered for deterministic output.
pub type ConversionParameters = BTreeMap<String, ConversionParameter>;

/// Error parsing a serialized parameter set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterParseError {
    /// A record had no name or no value field.
    #[error("Malformed conversion parameter record: '{0}'")]
    MalformedRecord(String),
}

/// Serialize parameters to the `name|value|description&...` text form.
pub fn serialize_parameters(parameters: &ConversionParameters) -> String {
    parameters
        .iter()
        .map(|(name, parameter)| {
            format!(
                "{name}{sep}{value}{sep}{description}",
                sep = PARAMETER_FIELD_SEPARATOR,
                value = parameter.value,
                description = parameter.description,
            )
        })
        .collect::<Vec<_>>()
        .join(PARAMETER_SEPARATOR)
}

/// Parse the text form produced by [`serialize_parameters`].
///
/// Empty records (e.g. a trailing `&`) are skipped.
pub fn deserialize_parameters(text: &str) -> Result<ConversionParameters, ParameterParseError> {
    let mut parameters = ConversionParameters::new();

    for record in text.split(PARAMETER_SEPARATOR) {
        if record.trim().is_empty() {
            continue;
        }

        let mut fields = record.splitn(3, PARAMETER_FIELD_SEPARATOR);
        let name = fields.next().unwrap_or_default().trim();
        let value = fields.next();
        let description = fields.next().unwrap_or_default();

        match value {
            Some(value) if !name.is_empty() => {
                parameters.insert(
                    name.to_string(),
                    ConversionParameter::new(value, description),
                );
            }
            _ => return Err(ParameterParseError::MalformedRecord(record.to_string())),
        }
    }

    Ok(parameters)
}
