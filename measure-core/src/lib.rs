//! Measure Core - Fundamental types
//!
//! This crate provides the core types used throughout Measure:
//! - `Magnitude`: integer-or-float numeric value of a quantity
//! - `MeasureError`: terminal, user-visible errors
//! - `NumberFormatter` / `Formatters`: locale-aware display with a per-locale cache
//! - `FormatConfig`: display configuration (locale, fraction digits)
//! - `CalendarInterval`: calendar/elapsed-time intervals

mod config;
mod error;
mod format;
mod interval;
mod magnitude;

pub use config::{FormatConfig, LOCALE_ENV};
pub use error::{codes, MeasureError};
pub use format::{Formatters, Locale, NumberFormatter};
pub use interval::{CalendarInterval, IntervalError};
pub use magnitude::{looks_numeric, Magnitude, MagnitudeError};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{CalendarInterval, Locale, Magnitude, MeasureError};
}

#[cfg(test)]
mod tests {
    use super::*;

    mod error_tests {
        use super::*;

        #[test]
        fn test_invalid_input_message() {
            let err = MeasureError::invalid_input("blah");
            assert_eq!(err.to_string(), "\"blah\" is an invalid dimensional value.");
            assert_eq!(err.code(), codes::INVALID_INPUT);
            assert!(err.is_invalid_input());
        }

        #[test]
        fn test_invalid_input_with_reason() {
            let err = MeasureError::invalid_input_because("-10 s", "Quantity cannot be less than zero.");
            assert_eq!(
                err.to_string(),
                "\"-10 s\" is an invalid dimensional value. Quantity cannot be less than zero."
            );
        }

        #[test]
        fn test_conversion_message() {
            let err = MeasureError::conversion("s", "m");
            assert_eq!(err.to_string(), "No converter registered to convert \"s\" to \"m\".");
            assert_eq!(err.code(), codes::CONVERSION_NOT_POSSIBLE);
        }

        #[test]
        fn test_comparison_message() {
            let err = MeasureError::comparison("5 m", "3 s");
            assert_eq!(err.to_string(), "No converter registered to compare \"5 m\" with \"3 s\".");
            assert_eq!(err.code(), codes::COMPARISON_NOT_POSSIBLE);
        }

        #[test]
        fn test_operation_message() {
            let add = MeasureError::operation("add", "5 m", "3 s");
            assert_eq!(add.to_string(), "No converter registered to add \"3 s\" to \"5 m\".");

            let sub = MeasureError::operation("subtract", "5 m", "3 s");
            assert_eq!(sub.to_string(), "No converter registered to subtract \"3 s\" from \"5 m\".");
            assert_eq!(sub.code(), codes::OPERATION_NOT_POSSIBLE);
        }

        #[test]
        fn test_from_magnitude_error() {
            let err: MeasureError = Magnitude::from_str("abc").unwrap_err().into();
            assert!(err.is_invalid_input());
        }
    }

    mod display_tests {
        use super::*;

        #[test]
        fn test_formatter_from_config() {
            let config = FormatConfig::new().with_locale(Locale::German);
            let formatter = NumberFormatter::from_config(&config);
            assert_eq!(formatter.format(&Magnitude::Int(1200)), "1.200");
        }

        #[test]
        fn test_shared_formatters_default_to_english() {
            let formatter = Formatters::shared().get(Locale::English);
            assert_eq!(formatter.format(&Magnitude::Float(72.17847769)), "72.18");
        }
    }
}
