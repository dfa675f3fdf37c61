#![forbid(unsafe_code)]

//! Reactive validation model for a customer data entry form.
//!
//! # Role
//! `cform-core` holds the form's state as a tree of fields, groups, and
//! lists. Each field carries its value, its validators, and its current
//! error tags. Every mutation revalidates the affected fields and groups
//! before it returns, so readers always see a consistent tree.
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`validation`] | Error tags, field validators, group validators |
//! | [`model`] | Values, paths, and the field/group/list tree |
//! | [`form`] | [`form::FormModel`]: mutation pipeline and listeners |
//! | [`rules`] | Conditional validators driven by another field |
//! | [`debounce`] | Cancellable quiet-window timer with injected time |
//! | [`messages`] | Tag → message catalog |
//! | [`config`] | [`config::FormConfig`] |
//! | [`customer`] | The customer form itself |
//!
//! The model is single-threaded. Timers take `now` explicitly
//! (`*_at` methods) so tests never sleep.

pub mod config;
pub mod customer;
pub mod debounce;
pub mod error;
pub mod form;
pub mod messages;
pub mod model;
pub mod rules;
pub mod validation;

pub use config::FormConfig;
pub use customer::{CustomerForm, Submission};
pub use error::FormError;
pub use form::FormModel;
