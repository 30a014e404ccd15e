//! Error types for the roster scheduling engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while building a schedule.
//!
//! Note that an infeasible scheduling problem is *not* an error: after all
//! relaxation levels are exhausted the engine returns a structured
//! [`ScheduleOutcome::Exhausted`](crate::models::ScheduleOutcome) result.
//! Errors here cover configuration and request validation problems that are
//! surfaced immediately and never escalated through relaxation.

use thiserror::Error;

/// The main error type for the roster scheduling engine.
///
/// # Example
///
/// ```
/// use roster_engine::error::EngineError;
///
/// let error = EngineError::UnknownRelief {
///     name: "Casey".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Relief employee 'Casey' is not on the roster"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The employee roster was empty.
    #[error("Employee roster is empty")]
    EmptyRoster,

    /// The same employee name appeared more than once on the roster.
    #[error("Duplicate employee on roster: {name}")]
    DuplicateEmployee {
        /// The duplicated employee name.
        name: String,
    },

    /// The designated relief employee is not on the roster.
    #[error("Relief employee '{name}' is not on the roster")]
    UnknownRelief {
        /// The relief name that could not be resolved.
        name: String,
    },

    /// No duty locations were configured.
    #[error("No duty locations configured")]
    NoDuties,

    /// More than one duty location was flagged as periodic.
    #[error("More than one periodic duty location: '{name}' conflicts with an earlier one")]
    MultiplePeriodicDuties {
        /// The second periodic duty encountered.
        name: String,
    },

    /// The target year/month did not form a valid calendar month.
    #[error("Invalid target month: {year}-{month}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month (1-12).
        month: u32,
    },

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
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_roster_display() {
        assert_eq!(EngineError::EmptyRoster.to_string(), "Employee roster is empty");
    }

    #[test]
    fn test_duplicate_employee_displays_name() {
        let error = EngineError::DuplicateEmployee {
            name: "Alex".to_string(),
        };
        assert_eq!(error.to_string(), "Duplicate employee on roster: Alex");
    }

    #[test]
    fn test_unknown_relief_displays_name() {
        let error = EngineError::UnknownRelief {
            name: "Casey".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Relief employee 'Casey' is not on the roster"
        );
    }

    #[test]
    fn test_invalid_month_displays_year_and_month() {
        let error = EngineError::InvalidMonth {
            year: 2025,
            month: 13,
        };
        assert_eq!(error.to_string(), "Invalid target month: 2025-13");
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_empty_roster() -> EngineResult<()> {
            Err(EngineError::EmptyRoster)
        }

        fn propagates_error() -> EngineResult<()> {
            returns_empty_roster()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
