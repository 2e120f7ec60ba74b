//! Schema and assertion error types.

use assay_core::{ErrorKind, ErrorPayload, TypeCategory};
use thiserror::Error;

/// A schema that does not follow the grammar.
///
/// Always reported as the single code [`ErrorKind::InvalidSchema`]; the variant
/// only says where and why. Nested failures keep the innermost cause as their
/// `source`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The schema value is not a string, object, or array.
    #[error("unsupported schema shape: {0}")]
    UnsupportedShape(TypeCategory),

    /// A primitive schema string does not parse.
    #[error("invalid primitive schema {schema:?}: {reason}")]
    Primitive { schema: String, reason: String },

    /// An array schema has neither one nor two entries.
    #[error("array schema must have 1 or 2 entries, found {0}")]
    ArrayArity(usize),

    /// The second entry of an array schema is not `"f"` or `"F"`.
    #[error("invalid array force flag {0} (expected \"f\" or \"F\")")]
    ForceFlag(String),

    /// A property schema of an object schema is invalid.
    #[error("invalid schema for property '{name}': {source}")]
    Property {
        name: String,
        #[source]
        source: Box<SchemaError>,
    },

    /// The element schema of an array schema is invalid.
    #[error("invalid array element schema: {0}")]
    Element(#[source] Box<SchemaError>),
}

impl SchemaError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidSchema
    }

    pub(crate) fn primitive(schema: &str, reason: impl Into<String>) -> Self {
        Self::Primitive {
            schema: schema.to_string(),
            reason: reason.into(),
        }
    }

    /// The innermost error of a nested chain.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Property { source, .. } | Self::Element(source) => source.root_cause(),
            other => other,
        }
    }
}

/// Failure of a checked assertion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertError {
    /// The schema could not be compiled.
    #[error("schema is invalid")]
    Schema(#[from] SchemaError),

    /// The value does not conform to the schema.
    #[error("assert failed: {0}")]
    Value(ErrorPayload),
}

impl AssertError {
    /// The error tree of a value failure.
    #[must_use]
    pub const fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Value(payload) => Some(payload),
            Self::Schema(_) => None,
        }
    }
}
