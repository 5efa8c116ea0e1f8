//! User-visible errors
//!
//! Only terminal failures live here. Category-level misses ("this unit is
//! not mine") are a separate signal owned by the conversion engine and are
//! never surfaced directly.

use crate::MagnitudeError;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_INPUT: &str = "INVALID_INPUT";
    pub const CONVERSION_NOT_POSSIBLE: &str = "CONVERSION_NOT_POSSIBLE";
    pub const COMPARISON_NOT_POSSIBLE: &str = "COMPARISON_NOT_POSSIBLE";
    pub const OPERATION_NOT_POSSIBLE: &str = "OPERATION_NOT_POSSIBLE";
}

/// Terminal errors reported to callers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeasureError {
    /// The value matches none of the accepted shapes, or the kind rejected it
    #[error("\"{value}\" is an invalid dimensional value.{}", reason_suffix(.reason))]
    InvalidInput {
        value: String,
        reason: Option<String>,
    },

    /// No registered category recognizes both units
    #[error("No converter registered to convert \"{from}\" to \"{to}\".")]
    ConversionNotPossible { from: String, to: String },

    /// No registered category recognizes both operands
    #[error("No converter registered to compare \"{first}\" with \"{second}\".")]
    ComparisonNotPossible { first: String, second: String },

    /// Arithmetic between two quantities of different categories
    #[error("No converter registered to {operation} \"{second}\" {} \"{first}\".", preposition(.operation))]
    OperationNotPossible {
        operation: &'static str,
        first: String,
        second: String,
    },
}

impl MeasureError {
    // ========== Common Error Constructors ==========

    pub fn invalid_input(value: impl Into<String>) -> Self {
        Self::InvalidInput {
            value: value.into(),
            reason: None,
        }
    }

    pub fn invalid_input_because(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            value: value.into(),
            reason: Some(reason.into()),
        }
    }

    pub fn conversion(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::ConversionNotPossible {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn comparison(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self::ComparisonNotPossible {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn operation(operation: &'static str, first: impl Into<String>, second: impl Into<String>) -> Self {
        Self::OperationNotPossible {
            operation,
            first: first.into(),
            second: second.into(),
        }
    }

    /// Machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => codes::INVALID_INPUT,
            Self::ConversionNotPossible { .. } => codes::CONVERSION_NOT_POSSIBLE,
            Self::ComparisonNotPossible { .. } => codes::COMPARISON_NOT_POSSIBLE,
            Self::OperationNotPossible { .. } => codes::OPERATION_NOT_POSSIBLE,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason.as_deref().map(|r| format!(" {}", r)).unwrap_or_default()
}

fn preposition(operation: &str) -> &'static str {
    match operation {
        "subtract" => "from",
        _ => "to",
    }
}

impl From<MagnitudeError> for MeasureError {
    fn from(err: MagnitudeError) -> Self {
        match err {
            MagnitudeError::ParseError(s) => Self::invalid_input_because(s, "Not a valid number."),
            MagnitudeError::NotANumber(s) => Self::invalid_input_because(s, "Expected a number."),
        }
    }
}
