//! The closed taxonomy of validation error codes.
//!
//! Every code serializes to its camelCase name (`"wrongType"`) and maps to a
//! fixed human-readable message.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A single validation error code.
///
/// `MissingProperty` and `WrongTypeElement` are part of the message table but
/// no validator currently produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    InvalidSchema,
    WrongType,
    EmptyValue,
    MissingProperty,
    UselessProperty,
    EmptyArray,
    WrongTypeElement,
    EmptyElementValue,
    FunctionNotPass,
    ArrayMustBeArray,
}

impl ErrorKind {
    /// Every kind, in message-table order.
    pub const ALL: [Self; 10] = [
        Self::InvalidSchema,
        Self::WrongType,
        Self::EmptyValue,
        Self::MissingProperty,
        Self::UselessProperty,
        Self::EmptyArray,
        Self::WrongTypeElement,
        Self::EmptyElementValue,
        Self::FunctionNotPass,
        Self::ArrayMustBeArray,
    ];

    /// The stable code name.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidSchema => "invalidSchema",
            Self::WrongType => "wrongType",
            Self::EmptyValue => "emptyValue",
            Self::MissingProperty => "missingProperty",
            Self::UselessProperty => "uselessProperty",
            Self::EmptyArray => "emptyArray",
            Self::WrongTypeElement => "wrongTypeElement",
            Self::EmptyElementValue => "emptyElementValue",
            Self::FunctionNotPass => "functionNotPass",
            Self::ArrayMustBeArray => "arrayMustBeArray",
        }
    }

    /// Human-readable message for the code.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidSchema => "schema is invalid",
            Self::WrongType => "type of value is wrong",
            Self::EmptyValue => "value cannot be null or undefined",
            Self::MissingProperty => "property is missing",
            Self::UselessProperty => "property is redundant",
            Self::EmptyArray => "array cannot be empty",
            Self::WrongTypeElement => "type of element is wrong",
            Self::EmptyElementValue => "value of element cannot be null or undefined",
            Self::FunctionNotPass => "has not passed the checking function",
            Self::ArrayMustBeArray => "array should be an empty array at least",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ErrorKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == s)
            .ok_or_else(|| CoreError::UnknownErrorCode(s.to_string()))
    }
}
