//! Error types for the Family Benefit Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Errors are raised when configuration cannot be loaded or when input value
//! objects fail validation. A nil entitlement is never an error.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Family Benefit Engine.
///
/// # Example
///
/// ```
/// use family_benefit_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/program.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/program.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No rate table is effective on the requested date.
    #[error("No rate table effective on {date}")]
    RateTableNotFound {
        /// The date for which a rate table was requested.
        date: NaiveDate,
    },

    /// A rate table field violates the rate table invariants.
    #[error("Invalid rate table field '{field}': {message}")]
    InvalidRateTable {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A child record was invalid.
    #[error("Invalid child field '{field}': {message}")]
    InvalidChild {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A household record was invalid.
    #[error("Invalid household field '{field}': {message}")]
    InvalidHousehold {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/program.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/program.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/rates/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/rates/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_rate_table_not_found_displays_date() {
        let error = EngineError::RateTableNotFound {
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        };
        assert_eq!(error.to_string(), "No rate table effective on 2020-01-01");
    }

    #[test]
    fn test_invalid_rate_table_displays_field_and_message() {
        let error = EngineError::InvalidRateTable {
            field: "benefit_a.primary_taper".to_string(),
            message: "must be between 0 and 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid rate table field 'benefit_a.primary_taper': must be between 0 and 1"
        );
    }

    #[test]
    fn test_invalid_child_displays_field_and_message() {
        let error = EngineError::InvalidChild {
            field: "age".to_string(),
            message: "must be between 0 and 19, got 21".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid child field 'age': must be between 0 and 19, got 21"
        );
    }

    #[test]
    fn test_invalid_household_displays_field_and_message() {
        let error = EngineError::InvalidHousehold {
            field: "primary_income".to_string(),
            message: "cannot be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid household field 'primary_income': cannot be negative"
        );
    }

    #[test]
    fn test_calculation_error_displays_message() {
        let error = EngineError::CalculationError {
            message: "income step must be positive".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Calculation error: income step must be positive"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_config_not_found() -> EngineResult<()> {
            Err(EngineError::ConfigNotFound {
                path: "/test".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_config_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
