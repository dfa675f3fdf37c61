#![forbid(unsafe_code)]

//! Group-level validators.
//!
//! A group validator reads sibling fields of one group and reports its
//! failure on the group itself, never on a member field.

use std::fmt;

use super::tags::{ErrorSet, ErrorTag};
use super::validators::{ValidationError, ValidationResult};
use crate::model::GroupState;

/// A predicate over a whole group.
pub trait GroupValidator: Send + Sync {
    fn validate(&self, group: &GroupState) -> ValidationResult;
}

/// Requires two sibling fields to hold equal values.
///
/// The check is skipped while either field is pristine, so a mismatch is not
/// reported before the user has edited both. A missing sibling also passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldsMatch {
    pub first: String,
    pub second: String,
}

impl FieldsMatch {
    #[must_use]
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

impl GroupValidator for FieldsMatch {
    fn validate(&self, group: &GroupState) -> ValidationResult {
        let (Some(first), Some(second)) = (group.field(&self.first), group.field(&self.second))
        else {
            return ValidationResult::Valid;
        };
        if first.pristine() || second.pristine() || first.value() == second.value() {
            return ValidationResult::Valid;
        }
        ValidationResult::Invalid(
            ValidationError::new(ErrorTag::Match, "{first} and {second} do not match")
                .with_param("first", &self.first)
                .with_param("second", &self.second),
        )
    }
}

/// Ordered list of group validators.
#[derive(Default)]
pub struct GroupValidators {
    validators: Vec<Box<dyn GroupValidator>>,
}

impl GroupValidators {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, validator: impl GroupValidator + 'static) {
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

    #[must_use]
    pub fn evaluate(&self, group: &GroupState) -> ErrorSet {
        self.validators
            .iter()
            .filter_map(|v| v.validate(group).tag())
            .collect()
    }
}

impl fmt::Debug for GroupValidators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupValidators")
            .field("count", &self.validators.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldState, FormValue};

    fn email_group(email: &str, confirm: &str) -> GroupState {
        GroupState::new()
            .with_field("email", FieldState::new(email))
            .with_field("confirmEmail", FieldState::new(confirm))
    }

    fn edit(group: &mut GroupState, name: &str, value: &str) {
        group
            .field_mut(name)
            .unwrap()
            .set_value(FormValue::text(value));
    }

    #[test]
    fn pristine_sibling_skips_the_check() {
        let mut group = email_group("", "");
        edit(&mut group, "email", "a@b.com");
        assert!(group.field("confirmEmail").unwrap().pristine());
        assert!(FieldsMatch::new("email", "confirmEmail").validate(&group).is_valid());
    }

    #[test]
    fn both_dirty_and_different_fails_with_match() {
        let mut group = email_group("", "");
        edit(&mut group, "email", "a@b.com");
        edit(&mut group, "confirmEmail", "a@c.com");
        let result = FieldsMatch::new("email", "confirmEmail").validate(&group);
        assert_eq!(result.tag(), Some(ErrorTag::Match));
    }

    #[test]
    fn both_dirty_and_equal_passes() {
        let mut group = email_group("", "");
        edit(&mut group, "email", "a@b.com");
        edit(&mut group, "confirmEmail", "a@b.com");
        assert!(FieldsMatch::new("email", "confirmEmail").validate(&group).is_valid());
    }

    #[test]
    fn missing_sibling_passes() {
        let group = GroupState::new().with_field("email", FieldState::new("x"));
        assert!(FieldsMatch::new("email", "confirmEmail").validate(&group).is_valid());
    }
}
