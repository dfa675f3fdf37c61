#![forbid(unsafe_code)]

//! Error tags and the ordered tag set carried by fields and groups.

use std::fmt;

use serde::Serialize;

/// Symbolic identifier for one failed constraint.
///
/// The string keys are stable and match the keys a presentation layer uses
/// to look up messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorTag {
    Required,
    MinLength,
    MaxLength,
    Email,
    Range,
    Match,
}

impl ErrorTag {
    /// All tags, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Required,
        Self::MinLength,
        Self::MaxLength,
        Self::Email,
        Self::Range,
        Self::Match,
    ];

    /// Stable lookup key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength => "minlength",
            Self::MaxLength => "maxlength",
            Self::Email => "email",
            Self::Range => "range",
            Self::Match => "match",
        }
    }

    /// Parse a lookup key back into a tag.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.key() == key)
    }
}

impl fmt::Display for ErrorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Ordered set of error tags.
///
/// Iteration follows insertion order, which is the order the validators ran
/// in. Inserting a tag twice keeps the first position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorSet {
    tags: Vec<ErrorTag>,
}

impl ErrorSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag. Returns `false` if it was already present.
    pub fn insert(&mut self, tag: ErrorTag) -> bool {
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    #[must_use]
    pub fn contains(&self, tag: ErrorTag) -> bool {
        self.tags.contains(&tag)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = ErrorTag> + '_ {
        self.tags.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ErrorTag] {
        &self.tags
    }
}

impl FromIterator<ErrorTag> for ErrorSet {
    fn from_iter<I: IntoIterator<Item = ErrorTag>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ErrorSet {
    type Item = ErrorTag;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, ErrorTag>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter().copied()
    }
}

impl fmt::Display for ErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}
