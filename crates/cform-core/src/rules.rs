#![forbid(unsafe_code)]

//! Conditional validation rules.
//!
//! A rule is a dependency edge `driver → dependent`: whenever the driver
//! field's value changes, the dependent field's validator set is rebuilt
//! from the driver's new value and the dependent is revalidated. The form
//! model owns a [`RuleTable`] and applies it synchronously inside every
//! mutation, so new rules never need changes to the engine.

use std::fmt;

use crate::error::FormError;
use crate::model::{FieldPath, FormValue};
use crate::validation::{Required, Validators};

type DeriveFn = Box<dyn Fn(&FormValue) -> Validators + Send + Sync>;

pub struct Rule {
    driver: FieldPath,
    dependent: FieldPath,
    derive: DeriveFn,
}

impl Rule {
    pub fn new(
        driver: &str,
        dependent: &str,
        derive: impl Fn(&FormValue) -> Validators + Send + Sync + 'static,
    ) -> Result<Self, FormError> {
        Ok(Self {
            driver: FieldPath::parse(driver)?,
            dependent: FieldPath::parse(dependent)?,
            derive: Box::new(derive),
        })
    }

    /// `dependent` is required while `driver` equals `expected`, and has no
    /// validators otherwise.
    pub fn required_when(
        driver: &str,
        dependent: &str,
        expected: impl Into<String>,
    ) -> Result<Self, FormError> {
        let expected = expected.into();
        Self::new(driver, dependent, move |value| {
            let mut validators = Validators::new();
            if value.as_text() == Some(expected.as_str()) {
                validators.push(Required::new());
            }
            validators
        })
    }

    #[must_use]
    pub fn driver(&self) -> &FieldPath {
        &self.driver
    }

    #[must_use]
    pub fn dependent(&self) -> &FieldPath {
        &self.dependent
    }

    /// Validator set the dependent should carry for this driver value.
    #[must_use]
    pub fn derive(&self, driver_value: &FormValue) -> Validators {
        (self.derive)(driver_value)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("driver", &self.driver)
            .field("dependent", &self.dependent)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Rules whose driver is exactly `path`.
    pub fn driven_by<'a>(&'a self, path: &'a FieldPath) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |r| r.driver == *path)
    }

    /// Rules whose driver lies at or below `prefix`.
    pub fn driven_under<'a>(
        &'a self,
        prefix: &'a FieldPath,
    ) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |r| r.driver.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorTag;

    #[test]
    fn required_when_matches_only_the_expected_text() {
        let rule = Rule::required_when("notification", "phone", "text").unwrap();
        let on = rule.derive(&FormValue::text("text"));
        assert_eq!(on.len(), 1);
        assert!(on.evaluate(&FormValue::text("")).contains(ErrorTag::Required));
        assert!(rule.derive(&FormValue::text("email")).is_empty());
        assert!(rule.derive(&FormValue::Null).is_empty());
    }

    #[test]
    fn table_filters_by_driver() {
        let mut table = RuleTable::new();
        table.push(Rule::required_when("notification", "phone", "text").unwrap());
        table.push(Rule::required_when("addresses.0.addressType", "addresses.0.zip", "work").unwrap());

        let notification = FieldPath::parse("notification").unwrap();
        assert_eq!(table.driven_by(&notification).count(), 1);

        let addresses = FieldPath::parse("addresses").unwrap();
        assert_eq!(table.driven_under(&addresses).count(), 1);
        assert_eq!(table.driven_under(&FieldPath::root()).count(), 2);
    }

    #[test]
    fn invalid_paths_are_rejected() {
        assert!(Rule::required_when("a..b", "phone", "text").is_err());
    }
}
