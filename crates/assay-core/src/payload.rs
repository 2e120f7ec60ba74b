//! Path-addressable error trees.
//!
//! A failed validation yields an [`ErrorPayload`] whose shape mirrors the data
//! that failed: a leaf code for a scalar or whole-field failure, or a branch
//! keyed by property name or array index.
//!
//! ```text
//! {"info": {"name": "emptyValue", "phones": {"1": "wrongType"}}, "extra": "uselessProperty"}
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::kind::ErrorKind;

/// Key of a branch entry: an object property or an array index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathKey {
    Field(String),
    Index(usize),
}

impl PathKey {
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    #[must_use]
    pub const fn index(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathKey {
    fn from(name: &str) -> Self {
        Self::Field(name.to_string())
    }
}

impl From<usize> for PathKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

// Map keys: JSON object keys, so indices become their decimal string.
impl Serialize for PathKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Field(name) => serializer.serialize_str(name),
            Self::Index(index) => serializer.collect_str(index),
        }
    }
}

/// The error report of a failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    /// The value at this position failed as a whole.
    Leaf(ErrorKind),
    /// One or more children failed.
    Branch(BTreeMap<PathKey, ErrorPayload>),
}

/// One flattened leaf of an [`ErrorPayload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dotted path to the failing value (`info.phones[1]`); empty for the root.
    pub path: String,
    pub code: ErrorKind,
    pub message: &'static str,
}

impl ErrorPayload {
    #[must_use]
    pub const fn leaf(kind: ErrorKind) -> Self {
        Self::Leaf(kind)
    }

    /// The code of a leaf payload, `None` for a branch.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Leaf(kind) => Some(*kind),
            Self::Branch(_) => None,
        }
    }

    /// Child payload under `key`, if this is a branch containing it.
    #[must_use]
    pub fn get(&self, key: &PathKey) -> Option<&Self> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(children) => children.get(key),
        }
    }

    /// Child payload for an object property.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Self> {
        self.get(&PathKey::field(name))
    }

    /// Child payload for an array index.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Self> {
        self.get(&PathKey::Index(index))
    }

    /// Flatten the tree into its leaves, in key order.
    #[must_use]
    pub fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        self.collect_violations(String::new(), &mut out);
        out
    }

    /// Whether any leaf in the tree carries `kind`.
    #[must_use]
    pub fn contains(&self, kind: ErrorKind) -> bool {
        match self {
            Self::Leaf(leaf) => *leaf == kind,
            Self::Branch(children) => children.values().any(|child| child.contains(kind)),
        }
    }

    fn collect_violations(&self, path: String, out: &mut Vec<Violation>) {
        match self {
            Self::Leaf(kind) => out.push(Violation {
                path,
                code: *kind,
                message: kind.message(),
            }),
            Self::Branch(children) => {
                for (key, child) in children {
                    let child_path = match key {
                        PathKey::Field(name) if path.is_empty() => name.clone(),
                        PathKey::Field(name) => format!("{path}.{name}"),
                        PathKey::Index(index) => format!("{path}[{index}]"),
                    };
                    child.collect_violations(child_path, out);
                }
            }
        }
    }
}

impl From<ErrorKind> for ErrorPayload {
    fn from(kind: ErrorKind) -> Self {
        Self::Leaf(kind)
    }
}

impl FromIterator<(PathKey, Self)> for ErrorPayload {
    fn from_iter<I: IntoIterator<Item = (PathKey, Self)>>(iter: I) -> Self {
        Self::Branch(iter.into_iter().collect())
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
