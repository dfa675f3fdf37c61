#![forbid(unsafe_code)]

//! Dotted paths into the form tree, such as `emailGroup.email` or
//! `addresses.0.street1`.

use std::fmt;
use std::str::FromStr;

use crate::error::FormError;

/// One step of a path: a group member name or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Name(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

/// A path from the root group to a node. The empty path is the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted path. All-digit segments are list indices.
    pub fn parse(path: &str) -> Result<Self, FormError> {
        if path.is_empty() {
            return Ok(Self::root());
        }
        let segments = path
            .split('.')
            .map(|part| {
                if part.is_empty() {
                    Err(FormError::InvalidPath(path.to_string()))
                } else if part.bytes().all(|b| b.is_ascii_digit()) {
                    part.parse()
                        .map(Segment::Index)
                        .map_err(|_| FormError::InvalidPath(path.to_string()))
                } else {
                    Ok(Segment::Name(part.to_string()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Name(name.into()));
        Self { segments }
    }

    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
        })
    }

    /// Last segment when it is a name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self.segments.last()? {
            Segment::Name(name) => Some(name),
            Segment::Index(_) => None,
        }
    }

    /// Proper ancestors, nearest first, ending with the root.
    pub fn ancestors(&self) -> impl Iterator<Item = FieldPath> + '_ {
        (0..self.segments.len()).rev().map(|len| Self {
            segments: self.segments[..len].to_vec(),
        })
    }

    /// `true` if `prefix` is this path or one of its ancestors.
    #[must_use]
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names_and_indices() {
        let path = FieldPath::parse("addresses.0.street1").unwrap();
        assert_eq!(
            path.segments(),
            &[
                Segment::Name("addresses".into()),
                Segment::Index(0),
                Segment::Name("street1".into()),
            ]
        );
        assert_eq!(path.to_string(), "addresses.0.street1");
    }

    #[test]
    fn empty_string_is_root() {
        assert!(FieldPath::parse("").unwrap().is_root());
    }

    #[test]
    fn empty_segment_is_rejected() {
        assert!(matches!(
            FieldPath::parse("emailGroup..email"),
            Err(FormError::InvalidPath(_))
        ));
        assert!(FieldPath::parse(".email").is_err());
    }

    #[test]
    fn ancestors_nearest_first() {
        let path = FieldPath::parse("addresses.1.zip").unwrap();
        let ancestors: Vec<String> = path.ancestors().map(|p| p.to_string()).collect();
        assert_eq!(ancestors, vec!["addresses.1", "addresses", ""]);
    }

    #[test]
    fn builders_and_prefix() {
        let list = FieldPath::root().child("addresses");
        let street = list.index(0).child("street1");
        assert!(street.starts_with(&list));
        assert!(!list.starts_with(&street));
        assert_eq!(street.name(), Some("street1"));
        assert_eq!(street.parent(), Some(list.index(0)));
        assert_eq!(FieldPath::root().parent(), None);
    }
}
