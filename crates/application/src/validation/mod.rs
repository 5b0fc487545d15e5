//! Validation Framework
//!
//! Validates input arriving at the submission and settings boundaries before
//! any state changes. Errors are collected per field so a caller can report
//! every problem at once.

mod evaluation;
mod settings;

pub use evaluation::*;
pub use settings::*;

use crate::ApplicationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Validation result containing all errors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether validation passed
    pub valid: bool,
    /// Field-level errors
    pub field_errors: BTreeMap<String, Vec<String>>,
    /// Object-level errors
    pub object_errors: Vec<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            valid: true,
            field_errors: BTreeMap::new(),
            object_errors: Vec::new(),
        }
    }

    /// Create a failed validation result with a single error
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            field_errors: BTreeMap::new(),
            object_errors: vec![message.into()],
        }
    }

    /// Add a field-level error
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.field_errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Add an object-level error
    pub fn add_object_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.object_errors.push(message.into());
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }

        for (field, errors) in other.field_errors {
            self.field_errors.entry(field).or_default().extend(errors);
        }

        self.object_errors.extend(other.object_errors);
    }

    /// All messages, field errors first, in a stable order
    pub fn messages(&self) -> Vec<String> {
        let mut messages: Vec<String> = self
            .field_errors
            .values()
            .flat_map(|errors| errors.iter().cloned())
            .collect();
        messages.extend(self.object_errors.iter().cloned());
        messages
    }

    /// Convert to ApplicationError if invalid
    pub fn to_error(&self) -> Option<ApplicationError> {
        if self.valid {
            return None;
        }
        Some(ApplicationError::ValidationFailed(self.messages().join("; ")))
    }

    /// Ensure validation passed, returning error if not
    pub fn ensure_valid(&self) -> Result<(), ApplicationError> {
        match self.to_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Trait for validatable types
pub trait Validatable {
    /// Validate the type and return a result
    fn validate_all(&self) -> ValidationResult;
}

/// Extension to convert validator errors to our format
pub trait ValidatorExt {
    fn to_validation_result(&self) -> ValidationResult;
}

impl<T: Validate> ValidatorExt for T {
    fn to_validation_result(&self) -> ValidationResult {
        match self.validate() {
            Ok(_) => ValidationResult::success(),
            Err(errors) => {
                let mut result = ValidationResult::success();

                for (field, field_errors) in errors.field_errors() {
                    for error in field_errors {
                        let message = error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("{} is invalid ({})", field, error.code));
                        result.add_field_error(field.to_string(), message);
                    }
                }

                result
            }
        }
    }
}

/// Common validation rules
pub struct ValidationRules;

impl ValidationRules {
    /// Validate a score is a finite number within range
    pub fn validate_score(score: f64, field: &str, min: f64, max: f64) -> ValidationResult {
        let mut result = ValidationResult::success();

        if score.is_nan() {
            result.add_field_error(field, format!("{} cannot be NaN", field));
            return result;
        }

        if score.is_infinite() {
            result.add_field_error(field, format!("{} cannot be infinite", field));
            return result;
        }

        if score < min || score > max {
            result.add_field_error(
                field,
                format!("{} must be between {} and {}", field, min, max),
            );
        }

        result
    }

    /// Validate a string length in characters
    pub fn validate_length(
        value: &str,
        field: &str,
        min: Option<usize>,
        max: Option<usize>,
    ) -> ValidationResult {
        let mut result = ValidationResult::success();
        let len = value.chars().count();

        if let Some(min_len) = min {
            if len < min_len {
                result.add_field_error(
                    field,
                    format!("{} must be at least {} characters", field, min_len),
                );
            }
        }

        if let Some(max_len) = max {
            if len > max_len {
                result.add_field_error(
                    field,
                    format!("{} must be {} characters or less", field, max_len),
                );
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_result_success() {
        let result = ValidationResult::success();
        assert!(result.valid);
        assert!(result.field_errors.is_empty());
        assert!(result.object_errors.is_empty());
        assert!(result.to_error().is_none());
    }

    #[test]
    fn test_validation_result_error() {
        let result = ValidationResult::error("Test error");
        assert!(!result.valid);
        assert!(result.object_errors.contains(&"Test error".to_string()));
        assert!(result.to_error().is_some());
    }

    #[test]
    fn test_validation_result_merge() {
        let mut result1 = ValidationResult::success();
        result1.add_field_error("field1", "Error 1");

        let mut result2 = ValidationResult::success();
        result2.add_field_error("field2", "Error 2");
        result2.add_object_error("Error 3");

        result1.merge(result2);
        assert!(!result1.valid);
        assert_eq!(result1.messages(), vec!["Error 1", "Error 2", "Error 3"]);
    }

    #[test]
    fn test_validate_score() {
        assert!(ValidationRules::validate_score(50.0, "score", 0.0, 100.0).valid);
        assert!(ValidationRules::validate_score(0.0, "score", 0.0, 100.0).valid);
        assert!(ValidationRules::validate_score(100.0, "score", 0.0, 100.0).valid);
        assert!(!ValidationRules::validate_score(-0.1, "score", 0.0, 100.0).valid);
        assert!(!ValidationRules::validate_score(100.1, "score", 0.0, 100.0).valid);
        assert!(!ValidationRules::validate_score(f64::NAN, "score", 0.0, 100.0).valid);
        assert!(!ValidationRules::validate_score(f64::INFINITY, "score", 0.0, 100.0).valid);
    }

    #[test]
    fn test_validate_length() {
        assert!(ValidationRules::validate_length("hello", "field", Some(1), Some(10)).valid);
        assert!(!ValidationRules::validate_length("", "field", Some(1), None).valid);
        assert!(!ValidationRules::validate_length("too long", "field", None, Some(5)).valid);
        // Counted in characters, not bytes
        assert!(ValidationRules::validate_length("çğıöşü", "field", None, Some(6)).valid);
    }
}
