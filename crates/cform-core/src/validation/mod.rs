#![forbid(unsafe_code)]

//! Field and group validation.
//!
//! This module provides:
//! - A `Validator` trait for predicates over one field value
//! - Built-in validators: required, min/max length, email shape, numeric range
//! - A `GroupValidator` trait for predicates over sibling fields, with
//!   `FieldsMatch` for confirmation pairs
//! - `ErrorTag` / `ErrorSet`, the symbolic failures stored on fields and groups
//!
//! # Example
//!
//! ```rust
//! use cform_core::model::FormValue;
//! use cform_core::validation::{ErrorTag, Range, Required, Validator};
//!
//! assert!(Required::new().validate(&FormValue::text("hello")).is_valid());
//! assert!(Required::new().validate(&FormValue::text("  ")).is_invalid());
//!
//! let rating = Range::new(1.0, 5.0);
//! assert!(rating.validate(&FormValue::Null).is_valid());
//! assert_eq!(rating.validate(&FormValue::Number(6.0)).tag(), Some(ErrorTag::Range));
//! ```

mod group;
mod tags;
mod validators;

pub use group::{FieldsMatch, GroupValidator, GroupValidators};
pub use tags::{ErrorSet, ErrorTag};
pub use validators::{
    Email, MaxLength, MinLength, Range, Required, ValidationError, ValidationResult, Validator,
    ValidatorBuilder, Validators,
};
