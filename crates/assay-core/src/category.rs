//! Semantic type categories for candidate values.
//!
//! Candidate values are `serde_json::Value`s. A value that is not there at all
//! (for example a missing object key) is passed as `None` and classifies as
//! [`TypeCategory::Undefined`]; an explicit JSON `null` is [`TypeCategory::Null`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CoreError;

/// The category a candidate value falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Object,
    Array,
}

impl TypeCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Undefined,
        Self::Null,
        Self::Boolean,
        Self::Number,
        Self::String,
        Self::Object,
        Self::Array,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// `undefined` or `null`.
    #[must_use]
    pub const fn is_absent(self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

/// Classify a candidate value.
#[must_use]
pub const fn classify(value: Option<&Value>) -> TypeCategory {
    match value {
        None => TypeCategory::Undefined,
        Some(Value::Null) => TypeCategory::Null,
        Some(Value::Bool(_)) => TypeCategory::Boolean,
        Some(Value::Number(_)) => TypeCategory::Number,
        Some(Value::String(_)) => TypeCategory::String,
        Some(Value::Array(_)) => TypeCategory::Array,
        Some(Value::Object(_)) => TypeCategory::Object,
    }
}
