//! Unified error hierarchy for planrs
//!
//! Every failure class gets its own variant so callers can react to the
//! kind of failure (re-prompt, abort, fall back to defaults) without
//! matching on message strings.

use thiserror::Error;

/// Top-level error type for all planrs operations
#[derive(Debug, Error)]
pub enum PlanError {
    /// A value that could not be parsed into its expected shape
    /// (date, duration, pace, or numeric field)
    #[error("invalid value for {field}: {value:?}")]
    InputFormat { field: String, value: String },

    /// A date range that cannot be simulated
    #[error("invalid date range: {0}")]
    InvalidRange(String),

    /// A historical record lacking a required column
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// A plan that cannot support race prediction
    #[error("incomplete plan: {0}")]
    IncompletePlan(String),

    /// IO errors from the file shims
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlanError {
    pub fn input_format(field: &str, value: &str) -> Self {
        PlanError::InputFormat {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn missing_field(field: &str) -> Self {
        PlanError::MissingField {
            field: field.to_string(),
        }
    }
}

/// Result type alias for planrs operations
pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_format_message_names_field_and_value() {
        let err = PlanError::input_format("duration", "90 minutes");
        let message = err.to_string();
        assert!(message.contains("duration"));
        assert!(message.contains("90 minutes"));
    }

    #[test]
    fn test_missing_field_message() {
        let err = PlanError::missing_field("trimp");
        assert_eq!(err.to_string(), "missing required field: trimp");
    }
}
