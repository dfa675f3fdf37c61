#![forbid(unsafe_code)]

//! Configuration for the customer form.

use crate::debounce::{DEFAULT_WINDOW_MS, DebounceConfig};
use crate::messages::MessageCatalog;

/// Configuration for [`crate::customer::CustomerForm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Quiet window before the email message is recomputed (ms).
    pub debounce_ms: u64,

    /// Minimum length of `firstName`.
    pub first_name_min_length: usize,

    /// Maximum length of `lastName`.
    pub last_name_max_length: usize,

    /// Messages used for the email field.
    pub messages: MessageCatalog,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_WINDOW_MS,
            first_name_min_length: 3,
            last_name_max_length: 50,
            messages: MessageCatalog::default(),
        }
    }
}

impl FormConfig {
    #[must_use]
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    #[must_use]
    pub fn with_first_name_min_length(mut self, min: usize) -> Self {
        self.first_name_min_length = min;
        self
    }

    #[must_use]
    pub fn with_last_name_max_length(mut self, max: usize) -> Self {
        self.last_name_max_length = max;
        self
    }

    #[must_use]
    pub fn with_messages(mut self, messages: MessageCatalog) -> Self {
        self.messages = messages;
        self
    }

    #[must_use]
    pub fn debounce(&self) -> DebounceConfig {
        DebounceConfig::from_millis(self.debounce_ms)
    }
}
