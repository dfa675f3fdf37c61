#![forbid(unsafe_code)]

//! Structural errors raised by form tree operations.
//!
//! Validation failures are never errors; they live in the `ErrorSet` of a
//! field or group. `FormError` covers misuse of the tree itself: a path that
//! does not resolve, or that resolves to the wrong kind of node.

use std::fmt;

use crate::model::FieldPath;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The path string could not be parsed.
    InvalidPath(String),
    /// No node exists at this path.
    UnknownPath(FieldPath),
    /// The node exists but is not a field.
    NotAField(FieldPath),
    /// The node exists but is not a group.
    NotAGroup(FieldPath),
    /// The node exists but is not a list.
    NotAList(FieldPath),
    /// A group already has a member with this name.
    DuplicateName { group: FieldPath, name: String },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPath(path) => write!(f, "invalid path {path:?}"),
            Self::UnknownPath(path) => write!(f, "no form node at '{path}'"),
            Self::NotAField(path) => write!(f, "'{path}' is not a field"),
            Self::NotAGroup(path) => write!(f, "'{path}' is not a group"),
            Self::NotAList(path) => write!(f, "'{path}' is not a list"),
            Self::DuplicateName { group, name } => {
                write!(f, "group '{group}' already has a member named '{name}'")
            }
        }
    }
}

impl std::error::Error for FormError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_path() {
        let path = FieldPath::parse("emailGroup.email").unwrap();
        assert_eq!(
            FormError::NotAGroup(path.clone()).to_string(),
            "'emailGroup.email' is not a group"
        );
        assert_eq!(
            FormError::DuplicateName {
                group: FieldPath::root(),
                name: "phone".into(),
            }
            .to_string(),
            "group '' already has a member named 'phone'"
        );
    }
}
