//! Configuration validation for the Wheel screener.
//!
//! A configuration that fails validation aborts the run: an out-of-range
//! pass threshold would make every ticker pass or every ticker fail.

use thiserror::Error;

use crate::config::{Config, ObservabilityConfig, ReportSettings, ScoringSettings};

/// Lowest total score the rubric can produce (all three risk deductions).
pub const MIN_REACHABLE_SCORE: f64 = -3.0;

/// Highest total score the rubric can produce (9 financial + 7 moat).
pub const MAX_REACHABLE_SCORE: f64 = 16.0;

/// Configuration validation error.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trait for validatable configuration sections.
pub trait Validate {
    /// Validate this configuration section.
    fn validate(&self) -> ValidationResult<()>;
}

impl Validate for Config {
    /// Validate the entire configuration.
    fn validate(&self) -> ValidationResult<()> {
        let mut errors: Vec<ValidationError> = [
            self.scoring.validate(),
            self.report.validate(),
            self.observability.validate(),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        if errors.is_empty() {
            Ok(())
        } else if errors.len() == 1 {
            Err(errors.remove(0))
        } else {
            Err(ValidationError::Multiple(errors))
        }
    }
}

impl Validate for ScoringSettings {
    fn validate(&self) -> ValidationResult<()> {
        let threshold = self.pass_threshold;
        if !threshold.is_finite()
            || !(MIN_REACHABLE_SCORE..=MAX_REACHABLE_SCORE).contains(&threshold)
        {
            return Err(ValidationError::InvalidValue {
                field: "scoring.pass_threshold".into(),
                reason: format!(
                    "{} is outside the reachable score range [{}, {}]",
                    threshold, MIN_REACHABLE_SCORE, MAX_REACHABLE_SCORE
                ),
            });
        }

        Ok(())
    }
}

impl Validate for ReportSettings {
    fn validate(&self) -> ValidationResult<()> {
        if !self.budget_price_limit.is_finite() || self.budget_price_limit <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "report.budget_price_limit".into(),
                reason: "must be a positive price".into(),
            });
        }

        if self.top_n == 0 {
            return Err(ValidationError::InvalidValue {
                field: "report.top_n".into(),
                reason: "must be greater than 0".into(),
            });
        }

        Ok(())
    }
}

impl Validate for ObservabilityConfig {
    fn validate(&self) -> ValidationResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_level".into(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            });
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.log_format.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_format".into(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            });
        }

        if self.excluded_targets.iter().any(|t| t.trim().is_empty()) {
            return Err(ValidationError::MissingField {
                field: "observability.excluded_targets[]".into(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test_case(-3.0, true ; "floor is reachable")]
    #[test_case(7.0, true ; "default")]
    #[test_case(16.0, true ; "ceiling is reachable")]
    #[test_case(-3.5, false ; "below floor")]
    #[test_case(16.5, false ; "above ceiling")]
    #[test_case(f64::NAN, false ; "not a number")]
    #[test_case(f64::INFINITY, false ; "infinite")]
    fn test_pass_threshold_range(threshold: f64, valid: bool) {
        let mut config = Config::default();
        config.scoring.pass_threshold = threshold;
        assert_eq!(config.validate().is_ok(), valid);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.observability.log_level = "verbose".into();
        let result = config.validate();
        match result {
            Err(ValidationError::InvalidValue { field, .. }) => {
                assert_eq!(field, "observability.log_level");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_budget_price() {
        let mut config = Config::default();
        config.report.budget_price_limit = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_multiple_errors_are_collected() {
        let mut config = Config::default();
        config.scoring.pass_threshold = 42.0;
        config.observability.log_format = "xml".into();
        match config.validate() {
            Err(ValidationError::Multiple(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
