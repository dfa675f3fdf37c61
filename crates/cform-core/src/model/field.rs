#![forbid(unsafe_code)]

//! A single leaf field: value, interaction flags, and validation state.

use super::value::FormValue;
use crate::validation::{ErrorSet, Validators};

/// State of one field.
///
/// `dirty` is set by user edits and never cleared by programmatic patches;
/// `pristine()` is always `!dirty()`.
#[derive(Debug)]
pub struct FieldState {
    value: FormValue,
    initial: FormValue,
    touched: bool,
    dirty: bool,
    errors: ErrorSet,
    validators: Validators,
}

impl FieldState {
    /// A pristine, untouched field. Errors stay empty until the first
    /// revalidation.
    pub fn new(initial: impl Into<FormValue>) -> Self {
        let initial = initial.into();
        Self {
            value: initial.clone(),
            initial,
            touched: false,
            dirty: false,
            errors: ErrorSet::new(),
            validators: Validators::none(),
        }
    }

    #[must_use]
    pub fn with_validators(mut self, validators: Validators) -> Self {
        self.validators = validators;
        self
    }

    #[must_use]
    pub fn value(&self) -> &FormValue {
        &self.value
    }

    #[must_use]
    pub fn initial(&self) -> &FormValue {
        &self.initial
    }

    #[must_use]
    pub fn touched(&self) -> bool {
        self.touched
    }

    #[must_use]
    pub fn dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn pristine(&self) -> bool {
        !self.dirty
    }

    #[must_use]
    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn validators(&self) -> &Validators {
        &self.validators
    }

    /// User edit: replaces the value and marks the field dirty.
    pub fn set_value(&mut self, value: FormValue) {
        self.value = value;
        self.dirty = true;
    }

    /// Programmatic write: replaces the value, flags untouched.
    pub fn patch_value(&mut self, value: FormValue) {
        self.value = value;
    }

    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    /// Replaces the validator set. Errors are stale until [`Self::revalidate`].
    pub fn set_validators(&mut self, validators: Validators) {
        self.validators = validators;
    }

    pub fn clear_validators(&mut self) {
        self.validators = Validators::none();
    }

    /// Re-run every validator and store the failing tags.
    pub fn revalidate(&mut self) -> &ErrorSet {
        self.errors = self.validators.evaluate(&self.value);
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{ErrorTag, ValidatorBuilder};

    #[test]
    fn new_field_is_pristine_and_untouched() {
        let field = FieldState::new("home");
        assert!(field.pristine());
        assert!(!field.dirty());
        assert!(!field.touched());
        assert_eq!(field.value(), &FormValue::text("home"));
        assert_eq!(field.initial(), field.value());
    }

    #[test]
    fn user_edit_marks_dirty() {
        let mut field = FieldState::new("");
        field.set_value(FormValue::text("Juan"));
        assert!(field.dirty());
        assert_eq!(field.pristine(), !field.dirty());
    }

    #[test]
    fn patch_leaves_flags_alone() {
        let mut field = FieldState::new("");
        field.patch_value(FormValue::text("Juan"));
        assert!(field.pristine());
        assert!(!field.touched());
        assert_eq!(field.value(), &FormValue::text("Juan"));
    }

    #[test]
    fn revalidate_tracks_current_value() {
        let mut field =
            FieldState::new("").with_validators(ValidatorBuilder::new().required().build());
        assert!(field.is_valid(), "errors are empty before the first pass");
        assert!(field.revalidate().contains(ErrorTag::Required));
        field.set_value(FormValue::text("x"));
        assert!(field.revalidate().is_empty());
    }

    #[test]
    fn clear_validators_then_revalidate_is_valid() {
        let mut field =
            FieldState::new("").with_validators(ValidatorBuilder::new().required().build());
        field.revalidate();
        field.clear_validators();
        assert!(!field.is_valid(), "stale until revalidated");
        field.revalidate();
        assert!(field.is_valid());
    }
}
