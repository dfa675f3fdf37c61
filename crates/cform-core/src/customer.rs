#![forbid(unsafe_code)]

//! The customer form: name, email with confirmation, phone, notification
//! preference, and a list of addresses.
//!
//! On top of [`FormModel`] this adds the `notification → phone` rule, the
//! debounced email message, the demo data loader, and submission.
//!
//! # Example
//!
//! ```rust
//! use cform_core::config::FormConfig;
//! use cform_core::customer::{self, CustomerForm};
//! use cform_core::validation::ErrorTag;
//!
//! let mut form = CustomerForm::new(FormConfig::default()).unwrap();
//! form.set_value(customer::NOTIFICATION, "text").unwrap();
//! assert!(form.model().errors(customer::PHONE).unwrap().contains(ErrorTag::Required));
//!
//! form.populate_test_data().unwrap();
//! form.set_value(customer::PHONE, "351 555 0101").unwrap();
//! assert!(form.submit().valid);
//! ```

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, info, warn};
use web_time::Instant;

use crate::config::FormConfig;
use crate::debounce::Debouncer;
use crate::error::FormError;
use crate::form::FormModel;
use crate::messages::MessageCatalog;
use crate::model::{FieldState, FormValue, GroupState, ListState, ValueTree};
use crate::rules::Rule;
use crate::validation::{FieldsMatch, ValidatorBuilder};

pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const EMAIL_GROUP: &str = "emailGroup";
pub const EMAIL: &str = "emailGroup.email";
pub const CONFIRM_EMAIL: &str = "emailGroup.confirmEmail";
pub const PHONE: &str = "phone";
pub const NOTIFICATION: &str = "notification";
pub const ADDRESSES: &str = "addresses";

/// Notification value that makes the phone required.
pub const NOTIFY_BY_TEXT: &str = "text";
/// Default notification value.
pub const NOTIFY_BY_EMAIL: &str = "email";

/// A fresh, empty home address.
#[must_use]
pub fn build_address() -> GroupState {
    GroupState::new()
        .with_field("addressType", FieldState::new("home"))
        .with_field(
            "street1",
            FieldState::new("").with_validators(ValidatorBuilder::new().required().build()),
        )
        .with_field("street2", FieldState::new(""))
        .with_field("city", FieldState::new(""))
        .with_field("state", FieldState::new(""))
        .with_field("zip", FieldState::new(""))
}

/// The address installed by [`CustomerForm::populate_test_data`]. It carries
/// no validators.
#[must_use]
pub fn sample_address() -> GroupState {
    GroupState::new()
        .with_field("addressType", FieldState::new("work"))
        .with_field("street1", FieldState::new("Calle República"))
        .with_field("street2", FieldState::new(""))
        .with_field("city", FieldState::new("Ciudad de Córdoba"))
        .with_field("state", FieldState::new("CBA"))
        .with_field("zip", FieldState::new("123"))
}

/// Partial tree patched in by [`CustomerForm::populate_test_data`].
#[must_use]
pub fn sample_patch() -> ValueTree {
    ValueTree::group([
        (FIRST_NAME, ValueTree::value("Juan")),
        (LAST_NAME, ValueTree::value("Perez")),
        (
            EMAIL_GROUP,
            ValueTree::group([
                ("email", ValueTree::value("juan@mail.com")),
                ("confirmEmail", ValueTree::value("juan@mail.com")),
            ]),
        ),
    ])
}

/// Initial customer tree with every default in place.
#[must_use]
pub fn build_customer_tree(config: &FormConfig) -> GroupState {
    GroupState::new()
        .with_field(
            FIRST_NAME,
            FieldState::new("").with_validators(
                ValidatorBuilder::new()
                    .required()
                    .min_length(config.first_name_min_length)
                    .build(),
            ),
        )
        .with_field(
            LAST_NAME,
            FieldState::new("").with_validators(
                ValidatorBuilder::new()
                    .required()
                    .max_length(config.last_name_max_length)
                    .build(),
            ),
        )
        .with_group(
            EMAIL_GROUP,
            GroupState::new()
                .with_field(
                    "email",
                    FieldState::new("")
                        .with_validators(ValidatorBuilder::new().required().email().build()),
                )
                .with_field(
                    "confirmEmail",
                    FieldState::new("").with_validators(ValidatorBuilder::new().required().build()),
                )
                .with_validator(FieldsMatch::new("email", "confirmEmail")),
        )
        .with_field(PHONE, FieldState::new(""))
        .with_field(NOTIFICATION, FieldState::new(NOTIFY_BY_EMAIL))
        .with_list(ADDRESSES, ListState::from_groups(vec![build_address()]))
}

/// Phone is required only when notifications go by text.
pub fn notification_rule() -> Result<Rule, FormError> {
    Rule::required_when(NOTIFICATION, PHONE, NOTIFY_BY_TEXT)
}

/// Outcome of [`CustomerForm::submit`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub valid: bool,
    pub values: ValueTree,
}

impl Submission {
    /// The submitted values as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.values)
    }
}

pub struct CustomerForm {
    model: FormModel,
    debouncer: Debouncer,
    messages: MessageCatalog,
    email_message: String,
    email_changed: Rc<Cell<bool>>,
}

impl CustomerForm {
    pub fn new(config: FormConfig) -> Result<Self, FormError> {
        let mut model = FormModel::new(build_customer_tree(&config));
        model.add_rule(notification_rule()?)?;

        let email_changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&email_changed);
        model.subscribe(EMAIL, move |_, _| flag.set(true))?;

        Ok(Self {
            model,
            debouncer: Debouncer::new(config.debounce()),
            messages: config.messages,
            email_message: String::new(),
            email_changed,
        })
    }

    #[must_use]
    pub fn model(&self) -> &FormModel {
        &self.model
    }

    #[must_use]
    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    /// Message for the email field as of the last quiet window.
    #[must_use]
    pub fn email_message(&self) -> &str {
        &self.email_message
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.model.is_valid()
    }

    /// User edit at the current time.
    pub fn set_value(&mut self, path: &str, value: impl Into<FormValue>) -> Result<(), FormError> {
        self.set_value_at(path, value, Instant::now())
    }

    /// User edit at an explicit time.
    pub fn set_value_at(
        &mut self,
        path: &str,
        value: impl Into<FormValue>,
        now: Instant,
    ) -> Result<(), FormError> {
        self.model.set_value(path, value)?;
        self.sync_email_timer(now);
        Ok(())
    }

    pub fn mark_touched(&mut self, path: &str) -> Result<(), FormError> {
        self.model.mark_touched(path)
    }

    /// Append an empty home address and return its index.
    pub fn add_address(&mut self) -> Result<usize, FormError> {
        self.model.append(ADDRESSES, build_address())
    }

    pub fn populate_test_data(&mut self) -> Result<(), FormError> {
        self.populate_test_data_at(Instant::now())
    }

    /// Patch in the demo customer and replace the addresses with one work
    /// address.
    pub fn populate_test_data_at(&mut self, now: Instant) -> Result<(), FormError> {
        self.model.patch(&sample_patch());
        self.model.replace_list(ADDRESSES, vec![sample_address()])?;
        self.sync_email_timer(now);
        debug!("sample data loaded");
        Ok(())
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Let time pass. Returns `true` when the email message was recomputed.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        if self.debouncer.poll_at(now).is_none() {
            return false;
        }
        self.refresh_email_message();
        true
    }

    /// Overall validity plus the full value tree. The outcome is logged;
    /// sending it anywhere is the caller's job.
    #[must_use]
    pub fn submit(&self) -> Submission {
        let submission = Submission {
            valid: self.model.is_valid(),
            values: self.model.snapshot(),
        };
        match submission.to_json() {
            Ok(json) => info!(valid = submission.valid, values = %json, "customer form submitted"),
            Err(e) => warn!(error = %e, "failed to serialize submitted values"),
        }
        submission
    }

    fn sync_email_timer(&mut self, now: Instant) {
        if self.email_changed.replace(false) {
            let handle = self.debouncer.schedule_at(now);
            debug!(%handle, "email message refresh scheduled");
        }
    }

    fn refresh_email_message(&mut self) {
        self.email_message = match self.model.field(EMAIL) {
            Ok(field) if (field.touched() || field.dirty()) && !field.errors().is_empty() => {
                self.messages.format(field.errors())
            }
            Ok(_) => String::new(),
            Err(e) => {
                warn!(error = %e, "email field missing");
                String::new()
            }
        };
        debug!(message = %self.email_message, "email message refreshed");
    }
}

impl std::fmt::Debug for CustomerForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerForm")
            .field("model", &self.model)
            .field("debouncer", &self.debouncer)
            .field("email_message", &self.email_message)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorTag;

    fn form() -> CustomerForm {
        CustomerForm::new(FormConfig::default()).unwrap()
    }

    #[test]
    fn defaults() {
        let form = form();
        let model = form.model();
        assert_eq!(model.value(NOTIFICATION).unwrap(), &FormValue::text("email"));
        assert_eq!(model.list(ADDRESSES).unwrap().len(), 1);
        assert_eq!(
            model.value("addresses.0.addressType").unwrap(),
            &FormValue::text("home")
        );
        assert!(model.errors(PHONE).unwrap().is_empty());
        assert!(!form.is_valid());
        assert_eq!(form.email_message(), "");
    }

    #[test]
    fn configured_lengths_are_used() {
        let config = FormConfig::default()
            .with_first_name_min_length(5)
            .with_last_name_max_length(3);
        let mut form = CustomerForm::new(config).unwrap();
        form.set_value(FIRST_NAME, "Juan").unwrap();
        form.set_value(LAST_NAME, "Perez").unwrap();
        assert!(form.model().errors(FIRST_NAME).unwrap().contains(ErrorTag::MinLength));
        assert!(form.model().errors(LAST_NAME).unwrap().contains(ErrorTag::MaxLength));
    }

    #[test]
    fn sample_data_makes_the_form_valid() {
        let mut form = form();
        form.populate_test_data().unwrap();
        assert!(form.is_valid(), "{:?}", form.model().snapshot());
        let snapshot = form.submit().values;
        assert_eq!(
            snapshot.text_at(&"addresses.0.city".parse().unwrap()),
            Some("Ciudad de Córdoba")
        );
    }

    #[test]
    fn sample_address_street_is_optional() {
        let mut form = form();
        form.populate_test_data().unwrap();
        form.set_value("addresses.0.street1", "").unwrap();
        assert!(form.model().errors("addresses.0.street1").unwrap().is_empty());
        assert!(form.is_valid());
    }

    #[test]
    fn sample_data_replaces_address_interaction_state() {
        let mut form = form();
        form.add_address().unwrap();
        form.mark_touched(ADDRESSES).unwrap();
        form.populate_test_data().unwrap();
        let addresses = form.model().list(ADDRESSES).unwrap();
        assert_eq!(addresses.len(), 1);
        assert!(!addresses.get(0).unwrap().field("street1").unwrap().touched());
    }
}
