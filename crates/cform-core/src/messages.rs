#![forbid(unsafe_code)]

//! Human-readable messages for error tags.

use crate::validation::{ErrorSet, ErrorTag};

/// Message shown when the email is missing.
pub const EMAIL_REQUIRED_MESSAGE: &str = "Por favor ingrese su email";
/// Message shown when the email is malformed.
pub const EMAIL_INVALID_MESSAGE: &str = "Por favor ingrese un correo electrónico válido";

/// Fixed tag → message map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    entries: Vec<(ErrorTag, String)>,
}

impl MessageCatalog {
    /// A catalog with no messages.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, tag: ErrorTag, message: impl Into<String>) -> Self {
        let message = message.into();
        match self.entries.iter_mut().find(|(t, _)| *t == tag) {
            Some((_, slot)) => *slot = message,
            None => self.entries.push((tag, message)),
        }
        self
    }

    #[must_use]
    pub fn get(&self, tag: ErrorTag) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, m)| m.as_str())
    }

    /// One message per tag, in the set's order, joined by a single space.
    /// Tags without a message are skipped.
    #[must_use]
    pub fn format(&self, errors: &ErrorSet) -> String {
        errors
            .iter()
            .filter_map(|tag| self.get(tag))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::empty()
            .with_message(ErrorTag::Required, EMAIL_REQUIRED_MESSAGE)
            .with_message(ErrorTag::Email, EMAIL_INVALID_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_covers_email_tags() {
        let catalog = MessageCatalog::default();
        assert_eq!(catalog.get(ErrorTag::Required), Some(EMAIL_REQUIRED_MESSAGE));
        assert_eq!(catalog.get(ErrorTag::Email), Some(EMAIL_INVALID_MESSAGE));
        assert_eq!(catalog.get(ErrorTag::Match), None);
    }

    #[test]
    fn format_joins_with_space_and_skips_unknown() {
        let catalog = MessageCatalog::empty()
            .with_message(ErrorTag::Required, "a")
            .with_message(ErrorTag::Email, "b");
        let errors: ErrorSet = [ErrorTag::Required, ErrorTag::Range, ErrorTag::Email]
            .into_iter()
            .collect();
        assert_eq!(catalog.format(&errors), "a b");
        assert_eq!(catalog.format(&ErrorSet::new()), "");
    }

    #[test]
    fn with_message_overrides() {
        let catalog = MessageCatalog::default().with_message(ErrorTag::Required, "Email required");
        assert_eq!(catalog.get(ErrorTag::Required), Some("Email required"));
    }
}
