//! Property-based invariant tests for the field validators.
//!
//! These hold for **any** input:
//!
//! 1. `Required` fails exactly on blank text.
//! 2. `MinLength(n)` fails iff the text is non-empty and shorter than `n`.
//! 3. `MaxLength(n)` fails iff the text is longer than `n`.
//! 4. Evaluation collects every failing tag, in validator order, once.
//! 5. `Range` accepts exactly the numbers inside its bounds.
//! 6. Debounce timers fire once, only after a full quiet window.

use cform_core::debounce::{DebounceConfig, Debouncer};
use cform_core::model::FormValue;
use cform_core::validation::{
    ErrorTag, MaxLength, MinLength, Range, Required, Validator, ValidatorBuilder,
};
use proptest::prelude::*;
use web_time::{Duration, Instant};

fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ \t]{1,4}",
        "[a-zA-Z0-9 áéíóúñ]{0,40}",
    ]
}

proptest! {
    #[test]
    fn required_fails_exactly_on_blank(s in text()) {
        let result = Required::new().validate(&FormValue::text(s.clone()));
        prop_assert_eq!(result.is_invalid(), s.trim().is_empty());
    }

    #[test]
    fn min_length_iff_shorter(s in text(), n in 0usize..20) {
        let result = MinLength::new(n).validate(&FormValue::text(s.clone()));
        let len = s.chars().count();
        prop_assert_eq!(result.is_invalid(), !s.is_empty() && len < n);
    }

    #[test]
    fn max_length_iff_longer(s in text(), n in 0usize..20) {
        let result = MaxLength::new(n).validate(&FormValue::text(s.clone()));
        prop_assert_eq!(result.is_invalid(), s.chars().count() > n);
    }

    #[test]
    fn evaluate_collects_all_failures(s in text(), min in 0usize..10, max in 0usize..10) {
        let validators = ValidatorBuilder::new()
            .required()
            .min_length(min)
            .max_length(max)
            .build();
        let value = FormValue::text(s.clone());
        let errors = validators.evaluate(&value);

        let mut expected = Vec::new();
        if s.trim().is_empty() {
            expected.push(ErrorTag::Required);
        }
        let len = s.chars().count();
        if !s.is_empty() && len < min {
            expected.push(ErrorTag::MinLength);
        }
        if len > max {
            expected.push(ErrorTag::MaxLength);
        }
        prop_assert_eq!(errors.as_slice(), expected.as_slice());
    }

    #[test]
    fn range_accepts_only_inside(min in -100i32..100, span in 0i32..50, v in -200i32..200) {
        let max = min + span;
        let range = Range::new(f64::from(min), f64::from(max));
        let inside = v >= min && v <= max;
        prop_assert_eq!(range.validate(&FormValue::from(v)).is_valid(), inside);
        prop_assert_eq!(range.validate(&FormValue::text(v.to_string())).is_valid(), inside);
    }

    #[test]
    fn debounce_fires_once_after_silence(gaps in prop::collection::vec(0u64..2000, 1..12), window in 1u64..1500) {
        let mut debouncer = Debouncer::new(DebounceConfig::from_millis(window));
        let start = Instant::now();
        let mut now = start;
        let mut fired = 0usize;
        for gap in gaps {
            now += Duration::from_millis(gap);
            // Poll just before the next edit lands.
            if debouncer.poll_at(now).is_some() {
                fired += 1;
            }
            debouncer.schedule_at(now);
        }
        prop_assert!(debouncer.poll_at(now + Duration::from_millis(window - 1)).is_none());
        prop_assert!(debouncer.poll_at(now + Duration::from_millis(window)).is_some());
        prop_assert!(debouncer.poll_at(now + Duration::from_millis(window * 2)).is_none());
        prop_assert_eq!(debouncer.trace().count("fired"), fired + 1);
        prop_assert!(debouncer.trace().verify_invariants().is_empty());
    }
}
