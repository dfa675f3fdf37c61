#![forbid(unsafe_code)]

//! Core validation types and built-in field validators.

use std::collections::HashMap;
use std::fmt;

use super::tags::{ErrorSet, ErrorTag};
use crate::model::FormValue;

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A validation failure with its tag, a default message, and interpolation
/// parameters.
///
/// # Example
///
/// ```rust
/// use cform_core::validation::{ErrorTag, ValidationError};
///
/// let error = ValidationError::new(ErrorTag::MinLength, "Must be at least {min} characters")
///     .with_param("min", 3);
///
/// assert_eq!(error.format_message(), "Must be at least 3 characters");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Tag recorded in the owner's error set.
    pub tag: ErrorTag,
    /// Human-readable message template.
    pub message: String,
    /// Parameters for message interpolation.
    pub params: HashMap<String, String>,
}

impl ValidationError {
    #[must_use]
    pub fn new(tag: ErrorTag, message: impl Into<String>) -> Self {
        Self {
            tag,
            message: message.into(),
            params: HashMap::new(),
        }
    }

    /// Add a parameter substituted for `{key}` in the message.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    #[must_use]
    pub fn format_message(&self) -> String {
        let mut result = self.message.clone();
        for (key, value) in &self.params {
            result = result.replace(&format!("{{{key}}}"), value);
        }
        result
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_message())
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// The result of running one validator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    #[default]
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e),
        }
    }

    /// Tag of the failure, if any.
    #[must_use]
    pub fn tag(&self) -> Option<ErrorTag> {
        self.error().map(|e| e.tag)
    }
}

// ---------------------------------------------------------------------------
// Validator Trait
// ---------------------------------------------------------------------------

/// A predicate over a single field value.
///
/// # Implementing a Custom Validator
///
/// ```rust
/// use cform_core::model::FormValue;
/// use cform_core::validation::{ErrorTag, ValidationError, ValidationResult, Validator};
///
/// struct DigitsOnly;
///
/// impl Validator for DigitsOnly {
///     fn validate(&self, value: &FormValue) -> ValidationResult {
///         match value.as_text() {
///             Some(s) if !s.chars().all(|c| c.is_ascii_digit()) => {
///                 ValidationResult::Invalid(ValidationError::new(ErrorTag::Range, "Digits only"))
///             }
///             _ => ValidationResult::Valid,
///         }
///     }
///
///     fn error_message(&self) -> &str {
///         "Digits only"
///     }
/// }
/// ```
pub trait Validator: Send + Sync {
    fn validate(&self, value: &FormValue) -> ValidationResult;

    /// Default message for this validator's failure.
    fn error_message(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Built-in Validators
// ---------------------------------------------------------------------------

/// Fails when the value is null, empty, or whitespace-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Required {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Validator for Required {
    fn validate(&self, value: &FormValue) -> ValidationResult {
        if value.is_blank() {
            ValidationResult::Invalid(ValidationError::new(
                ErrorTag::Required,
                "This field is required",
            ))
        } else {
            ValidationResult::Valid
        }
    }

    fn error_message(&self) -> &str {
        "This field is required"
    }
}

/// Fails when a non-empty text value has fewer than `min` characters.
#[derive(Debug, Clone, Copy)]
pub struct MinLength {
    pub min: usize,
}

impl MinLength {
    #[must_use]
    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

impl Validator for MinLength {
    fn validate(&self, value: &FormValue) -> ValidationResult {
        let Some(text) = value.as_text().filter(|s| !s.is_empty()) else {
            return ValidationResult::Valid;
        };
        let len = text.chars().count();
        if len < self.min {
            ValidationResult::Invalid(
                ValidationError::new(ErrorTag::MinLength, "Must be at least {min} characters")
                    .with_param("min", self.min)
                    .with_param("actual", len),
            )
        } else {
            ValidationResult::Valid
        }
    }

    fn error_message(&self) -> &str {
        "Must be at least {min} characters"
    }
}

/// Fails when a text value has more than `max` characters.
#[derive(Debug, Clone, Copy)]
pub struct MaxLength {
    pub max: usize,
}

impl MaxLength {
    #[must_use]
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl Validator for MaxLength {
    fn validate(&self, value: &FormValue) -> ValidationResult {
        let Some(text) = value.as_text() else {
            return ValidationResult::Valid;
        };
        let len = text.chars().count();
        if len > self.max {
            ValidationResult::Invalid(
                ValidationError::new(ErrorTag::MaxLength, "Must be at most {max} characters")
                    .with_param("max", self.max)
                    .with_param("actual", len),
            )
        } else {
            ValidationResult::Valid
        }
    }

    fn error_message(&self) -> &str {
        "Must be at most {max} characters"
    }
}

/// Validates the shape `local@domain.tld`.
///
/// Empty values pass; pair with [`Required`] to demand a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl Email {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn is_well_formed(value: &str) -> bool {
        if value.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return false;
        }
        // at least one dot, and no empty labels
        domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
    }
}

impl Validator for Email {
    fn validate(&self, value: &FormValue) -> ValidationResult {
        let Some(text) = value.as_text().filter(|s| !s.is_empty()) else {
            return ValidationResult::Valid;
        };
        if Self::is_well_formed(text) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(ValidationError::new(
                ErrorTag::Email,
                "Invalid email address",
            ))
        }
    }

    fn error_message(&self) -> &str {
        "Invalid email address"
    }
}

/// Validates that a value is numeric and within `[min, max]`.
///
/// A missing value (null or blank text) is not a range violation. Anything
/// else that is not a number, including NaN, fails.
#[derive(Debug, Clone, Copy)]
pub struct Range {
    /// Minimum value (inclusive).
    pub min: f64,
    /// Maximum value (inclusive).
    pub max: f64,
}

impl Range {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl Validator for Range {
    fn validate(&self, value: &FormValue) -> ValidationResult {
        if value.is_blank() {
            return ValidationResult::Valid;
        }
        match value.as_number() {
            Some(n) if !n.is_nan() && n >= self.min && n <= self.max => ValidationResult::Valid,
            actual => {
                let mut error =
                    ValidationError::new(ErrorTag::Range, "Must be between {min} and {max}")
                        .with_param("min", self.min)
                        .with_param("max", self.max);
                if let Some(n) = actual {
                    error = error.with_param("actual", n);
                }
                ValidationResult::Invalid(error)
            }
        }
    }

    fn error_message(&self) -> &str {
        "Must be between {min} and {max}"
    }
}

// ---------------------------------------------------------------------------
// Validators (ordered set attached to a field)
// ---------------------------------------------------------------------------

/// Ordered list of validators attached to one field.
///
/// [`Validators::evaluate`] runs every validator and collects every failing
/// tag; it does not stop at the first failure.
#[derive(Default)]
pub struct Validators {
    validators: Vec<Box<dyn Validator>>,
}

impl Validators {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty set: every value is valid.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    pub fn push(&mut self, validator: impl Validator + 'static) {
        self.validators.push(Box::new(validator));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Run all validators and return the full result list.
    #[must_use]
    pub fn run(&self, value: &FormValue) -> Vec<ValidationResult> {
        self.validators.iter().map(|v| v.validate(value)).collect()
    }

    /// Run all validators and collect failing tags in validator order.
    #[must_use]
    pub fn evaluate(&self, value: &FormValue) -> ErrorSet {
        self.validators
            .iter()
            .filter_map(|v| v.validate(value).tag())
            .collect()
    }
}

impl fmt::Debug for Validators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validators")
            .field("count", &self.validators.len())
            .finish()
    }
}

impl From<Vec<Box<dyn Validator>>> for Validators {
    fn from(validators: Vec<Box<dyn Validator>>) -> Self {
        Self { validators }
    }
}

// ---------------------------------------------------------------------------
// ValidatorBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a field's validator list.
///
/// ```rust
/// use cform_core::model::FormValue;
/// use cform_core::validation::{ErrorTag, ValidatorBuilder};
///
/// let validators = ValidatorBuilder::new().required().min_length(3).build();
///
/// assert!(validators.evaluate(&FormValue::text("Juan")).is_empty());
/// assert!(validators.evaluate(&FormValue::text("Al")).contains(ErrorTag::MinLength));
/// ```
#[derive(Default)]
pub struct ValidatorBuilder {
    validators: Validators,
}

impl ValidatorBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn custom(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(validator);
        self
    }

    #[must_use]
    pub fn required(self) -> Self {
        self.custom(Required::new())
    }

    #[must_use]
    pub fn min_length(self, min: usize) -> Self {
        self.custom(MinLength::new(min))
    }

    #[must_use]
    pub fn max_length(self, max: usize) -> Self {
        self.custom(MaxLength::new(max))
    }

    #[must_use]
    pub fn email(self) -> Self {
        self.custom(Email::new())
    }

    #[must_use]
    pub fn range(self, min: f64, max: f64) -> Self {
        self.custom(Range::new(min, max))
    }

    #[must_use]
    pub fn build(self) -> Validators {
        self.validators
    }
}

impl fmt::Debug for ValidatorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorBuilder")
            .field("validators", &self.validators)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FormValue {
        FormValue::text(s)
    }

    // -- ValidationError --

    #[test]
    fn validation_error_format_multiple_params() {
        let error = ValidationError::new(ErrorTag::Range, "Between {min} and {max}")
            .with_param("min", 1)
            .with_param("max", 5);
        assert_eq!(error.format_message(), "Between 1 and 5");
        assert_eq!(error.to_string(), "Between 1 and 5");
    }

    #[test]
    fn validation_result_tag() {
        assert_eq!(ValidationResult::Valid.tag(), None);
        let invalid = ValidationResult::Invalid(ValidationError::new(ErrorTag::Email, "bad"));
        assert!(invalid.is_invalid());
        assert_eq!(invalid.tag(), Some(ErrorTag::Email));
    }

    // -- Required --

    #[test]
    fn required_rejects_blank_values() {
        let v = Required::new();
        assert!(v.validate(&FormValue::Null).is_invalid());
        assert!(v.validate(&text("")).is_invalid());
        assert!(v.validate(&text("   \t")).is_invalid());
    }

    #[test]
    fn required_accepts_non_empty_values() {
        let v = Required::new();
        assert!(v.validate(&text("x")).is_valid());
        assert!(v.validate(&text("  x ")).is_valid());
        assert!(v.validate(&FormValue::Number(0.0)).is_valid());
        assert!(v.validate(&FormValue::Bool(false)).is_valid());
    }

    // -- MinLength / MaxLength --

    #[test]
    fn min_length_boundary() {
        let v = MinLength::new(3);
        assert!(v.validate(&text("ab")).is_invalid());
        assert!(v.validate(&text("abc")).is_valid());
        assert!(v.validate(&text("abcd")).is_valid());
    }

    #[test]
    fn min_length_skips_empty() {
        let v = MinLength::new(3);
        assert!(v.validate(&text("")).is_valid());
        assert!(v.validate(&FormValue::Null).is_valid());
    }

    #[test]
    fn min_length_counts_chars_not_bytes() {
        let v = MinLength::new(3);
        assert!(v.validate(&text("ñó")).is_invalid());
        assert!(v.validate(&text("ñóú")).is_valid());
    }

    #[test]
    fn min_length_error_params() {
        let result = MinLength::new(3).validate(&text("ab"));
        let error = result.error().unwrap();
        assert_eq!(error.tag, ErrorTag::MinLength);
        assert_eq!(error.params.get("min"), Some(&"3".to_string()));
        assert_eq!(error.params.get("actual"), Some(&"2".to_string()));
    }

    #[test]
    fn max_length_boundary() {
        let v = MaxLength::new(5);
        assert!(v.validate(&text("abcde")).is_valid());
        assert!(v.validate(&text("abcdef")).is_invalid());
        assert!(v.validate(&text("")).is_valid());
    }

    #[test]
    fn zero_max_length() {
        let v = MaxLength::new(0);
        assert!(v.validate(&text("")).is_valid());
        assert!(v.validate(&text("a")).is_invalid());
    }

    // -- Email --

    #[test]
    fn email_valid() {
        let v = Email::new();
        assert!(v.validate(&text("a@b.com")).is_valid());
        assert!(v.validate(&text("juan@mail.com")).is_valid());
        assert!(v.validate(&text("first.last@sub.example.org")).is_valid());
    }

    #[test]
    fn email_invalid() {
        let v = Email::new();
        for bad in ["abc", "@b.com", "a@", "a@b", "a@b.", "a@.com", "a@@b.com", "a b@c.com"] {
            assert_eq!(
                v.validate(&text(bad)).tag(),
                Some(ErrorTag::Email),
                "expected {bad:?} to fail"
            );
        }
    }

    #[test]
    fn email_empty_is_valid() {
        assert!(Email::new().validate(&text("")).is_valid());
        assert!(Email::new().validate(&FormValue::Null).is_valid());
    }

    // -- Range --

    #[test]
    fn range_null_and_blank_are_valid() {
        let v = Range::new(1.0, 5.0);
        assert!(v.validate(&FormValue::Null).is_valid());
        assert!(v.validate(&text("")).is_valid());
    }

    #[test]
    fn range_bounds_inclusive() {
        let v = Range::new(1.0, 5.0);
        assert!(v.validate(&FormValue::Number(1.0)).is_valid());
        assert!(v.validate(&FormValue::Number(3.0)).is_valid());
        assert!(v.validate(&FormValue::Number(5.0)).is_valid());
        assert!(v.validate(&FormValue::Number(0.0)).is_invalid());
        assert!(v.validate(&FormValue::Number(6.0)).is_invalid());
    }

    #[test]
    fn range_numeric_text_is_parsed() {
        let v = Range::new(1.0, 5.0);
        assert!(v.validate(&text("3")).is_valid());
        assert!(v.validate(&text(" 4.5 ")).is_valid());
        assert!(v.validate(&text("6")).is_invalid());
    }

    #[test]
    fn range_rejects_non_numeric() {
        let v = Range::new(1.0, 5.0);
        assert_eq!(v.validate(&text("x")).tag(), Some(ErrorTag::Range));
        assert_eq!(v.validate(&FormValue::Number(f64::NAN)).tag(), Some(ErrorTag::Range));
        assert_eq!(v.validate(&FormValue::Bool(true)).tag(), Some(ErrorTag::Range));
    }

    #[test]
    fn range_rejects_infinity_spelled_as_text() {
        let v = Range::new(1.0, f64::INFINITY);
        assert_eq!(v.validate(&text("inf")).tag(), Some(ErrorTag::Range));
        assert_eq!(v.validate(&text("infinity")).tag(), Some(ErrorTag::Range));
        assert!(v.validate(&text("1e9")).is_valid());
    }

    // -- Validators / builder --

    #[test]
    fn evaluate_collects_every_failure() {
        let validators = ValidatorBuilder::new()
            .min_length(5)
            .email()
            .max_length(2)
            .build();
        let errors = validators.evaluate(&text("abc"));
        assert_eq!(
            errors.as_slice(),
            &[ErrorTag::MinLength, ErrorTag::Email, ErrorTag::MaxLength]
        );
    }

    #[test]
    fn empty_validators_accept_anything() {
        let validators = Validators::none();
        assert!(validators.is_empty());
        assert!(validators.evaluate(&text("")).is_empty());
        assert!(validators.evaluate(&FormValue::Null).is_empty());
    }

    #[test]
    fn builder_chain_preserves_order() {
        let validators = ValidatorBuilder::new().required().email().build();
        assert_eq!(validators.len(), 2);
        let results = validators.run(&text(""));
        assert!(results[0].is_invalid());
        assert!(results[1].is_valid());
    }

    struct NoDigits;

    impl Validator for NoDigits {
        fn validate(&self, value: &FormValue) -> ValidationResult {
            match value.as_text() {
                Some(s) if s.chars().any(|c| c.is_ascii_digit()) => ValidationResult::Invalid(
                    ValidationError::new(ErrorTag::Range, "No digits allowed"),
                ),
                _ => ValidationResult::Valid,
            }
        }

        fn error_message(&self) -> &str {
            "No digits allowed"
        }
    }

    #[test]
    fn custom_validator() {
        let validators = ValidatorBuilder::new().custom(NoDigits).build();
        assert!(validators.evaluate(&text("abc")).is_empty());
        assert!(validators.evaluate(&text("a1")).contains(ErrorTag::Range));
    }
}
