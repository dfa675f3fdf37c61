#![forbid(unsafe_code)]

//! Field values and name→value trees.

use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};

use super::path::{FieldPath, Segment};

/// A single value held by a field.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum FormValue {
    #[default]
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl FormValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view: numbers as-is, text parsed after trimming. Text that
    /// spells a non-finite value (`inf`, `NaN`) is not a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Self::Null | Self::Bool(_) => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Null, or text that is empty or whitespace-only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FormValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<FormValue>> From<Option<T>> for FormValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Nested name→value tree.
///
/// Used as the input of a patch (a partial tree) and as the output of a
/// snapshot (the full tree). Groups keep their entry order; lists keep their
/// display order.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueTree {
    Value(FormValue),
    Group(Vec<(String, ValueTree)>),
    List(Vec<ValueTree>),
}

impl ValueTree {
    pub fn value(value: impl Into<FormValue>) -> Self {
        Self::Value(value.into())
    }

    pub fn group<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ValueTree)>,
    {
        Self::Group(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn list(items: impl IntoIterator<Item = ValueTree>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Direct child of a group by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ValueTree> {
        match self {
            Self::Group(entries) => entries.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Descendant at `path`.
    #[must_use]
    pub fn at(&self, path: &FieldPath) -> Option<&ValueTree> {
        let mut current = self;
        for segment in path.segments() {
            current = match (current, segment) {
                (Self::Group(_), Segment::Name(name)) => current.get(name)?,
                (Self::List(items), Segment::Index(i)) => items.get(*i)?,
                _ => return None,
            };
        }
        Some(current)
    }

    #[must_use]
    pub fn as_value(&self) -> Option<&FormValue> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Text at `path`, if the path names a text value.
    #[must_use]
    pub fn text_at(&self, path: &FieldPath) -> Option<&str> {
        self.at(path)?.as_value()?.as_text()
    }

    /// Number of items when this is a list.
    #[must_use]
    pub fn list_len(&self) -> Option<usize> {
        match self {
            Self::List(items) => Some(items.len()),
            _ => None,
        }
    }
}

impl Serialize for ValueTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => v.serialize(serializer),
            Self::Group(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection() {
        assert!(FormValue::Null.is_blank());
        assert!(FormValue::text(" \n").is_blank());
        assert!(!FormValue::text("a").is_blank());
        assert!(!FormValue::Number(0.0).is_blank());
    }

    #[test]
    fn numeric_view() {
        assert_eq!(FormValue::text(" 3 ").as_number(), Some(3.0));
        assert_eq!(FormValue::text("x").as_number(), None);
        assert_eq!(FormValue::Number(2.5).as_number(), Some(2.5));
        assert_eq!(FormValue::Bool(true).as_number(), None);
    }

    #[test]
    fn non_finite_text_is_not_numeric() {
        for s in ["inf", "-infinity", "Infinity", "NaN"] {
            assert_eq!(FormValue::text(s).as_number(), None, "{s}");
        }
        assert_eq!(FormValue::text("1e3").as_number(), Some(1000.0));
    }

    #[test]
    fn option_conversion() {
        assert_eq!(FormValue::from(None::<f64>), FormValue::Null);
        assert_eq!(FormValue::from(Some("a")), FormValue::text("a"));
    }

    #[test]
    fn tree_serializes_in_entry_order() {
        let tree = ValueTree::group([
            ("zeta", ValueTree::value("z")),
            ("alpha", ValueTree::list([ValueTree::value(1), ValueTree::value(FormValue::Null)])),
            ("mid", ValueTree::value(true)),
        ]);
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"{"zeta":"z","alpha":[1.0,null],"mid":true}"#);
    }

    #[test]
    fn tree_lookup_by_path() {
        let tree = ValueTree::group([(
            "addresses",
            ValueTree::list([ValueTree::group([("city", ValueTree::value("CBA"))])]),
        )]);
        let path = FieldPath::parse("addresses.0.city").unwrap();
        assert_eq!(tree.text_at(&path), Some("CBA"));
        let missing = FieldPath::parse("addresses.1.city").unwrap();
        assert_eq!(tree.at(&missing), None);
        assert_eq!(tree.get("addresses").and_then(ValueTree::list_len), Some(1));
    }
}
