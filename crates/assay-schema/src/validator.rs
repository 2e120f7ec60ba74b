//! Compiled validators and their execution rules.

use std::collections::BTreeMap;

use assay_config::ValidationConfig;
use assay_core::{ErrorKind, ErrorPayload, PathKey, TypeCategory, classify};
use serde_json::{Map, Value};

use crate::schema::{ArrayForce, Predicate};

/// A primitive type token of the schema grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Boolean,
    Number,
    String,
}

impl PrimitiveType {
    /// `b`, `n` or `s`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "b" => Some(Self::Boolean),
            "n" => Some(Self::Number),
            "s" => Some(Self::String),
            _ => None,
        }
    }

    #[must_use]
    pub const fn category(self) -> TypeCategory {
        match self {
            Self::Boolean => TypeCategory::Boolean,
            Self::Number => TypeCategory::Number,
            Self::String => TypeCategory::String,
        }
    }
}

/// An executable schema, produced by [`crate::compile`].
///
/// Holds no mutable state; one compiled validator can check any number of
/// values, from any number of threads.
#[derive(Debug, Clone)]
pub struct Validator {
    node: Node,
}

#[derive(Debug, Clone)]
enum Node {
    Primitive {
        accepts: Vec<PrimitiveType>,
        optional: bool,
    },
    Object {
        fields: BTreeMap<String, Validator>,
    },
    Array {
        element: Box<Validator>,
        force: Option<ArrayForce>,
        element_nullable: bool,
    },
    Predicate(Predicate),
}

impl Validator {
    pub(crate) const fn primitive(accepts: Vec<PrimitiveType>, optional: bool) -> Self {
        Self {
            node: Node::Primitive { accepts, optional },
        }
    }

    pub(crate) const fn object(fields: BTreeMap<String, Self>) -> Self {
        Self {
            node: Node::Object { fields },
        }
    }

    /// Whether the element accepts a null input is fixed here, once.
    pub(crate) fn array(element: Self, force: Option<ArrayForce>) -> Self {
        let element_nullable = element.accepts_null();
        tracing::trace!(element_nullable, ?force, "compiled array schema");
        Self {
            node: Node::Array {
                element: Box::new(element),
                force,
                element_nullable,
            },
        }
    }

    pub(crate) const fn predicate(predicate: Predicate) -> Self {
        Self {
            node: Node::Predicate(predicate),
        }
    }

    /// Whether this validator accepts `null` on its own.
    #[must_use]
    pub fn accepts_null(&self) -> bool {
        self.validate(Some(&Value::Null), &ValidationConfig::default())
            .is_ok()
    }

    /// Check a value that is present.
    ///
    /// # Errors
    ///
    /// Returns the error tree describing every failing position.
    pub fn validate_value(
        &self,
        value: &Value,
        config: &ValidationConfig,
    ) -> Result<(), ErrorPayload> {
        self.validate(Some(value), config)
    }

    /// Check a value; `None` stands for a missing value.
    ///
    /// # Errors
    ///
    /// Returns the error tree describing every failing position.
    pub fn validate(
        &self,
        value: Option<&Value>,
        config: &ValidationConfig,
    ) -> Result<(), ErrorPayload> {
        match &self.node {
            Node::Primitive { accepts, optional } => check_primitive(accepts, *optional, value),
            Node::Object { fields } => check_object(fields, value, config),
            Node::Array {
                element,
                force,
                element_nullable,
            } => check_array(element, *force, *element_nullable, value, config),
            Node::Predicate(predicate) => {
                if predicate.test(value) {
                    Ok(())
                } else {
                    Err(ErrorPayload::Leaf(ErrorKind::FunctionNotPass))
                }
            }
        }
    }
}

fn check_primitive(
    accepts: &[PrimitiveType],
    optional: bool,
    value: Option<&Value>,
) -> Result<(), ErrorPayload> {
    let category = classify(value);
    if category.is_absent() {
        return if optional {
            Ok(())
        } else {
            Err(ErrorPayload::Leaf(ErrorKind::EmptyValue))
        };
    }
    if accepts.iter().any(|primitive| primitive.category() == category) {
        Ok(())
    } else {
        Err(ErrorPayload::Leaf(ErrorKind::WrongType))
    }
}

fn check_object(
    fields: &BTreeMap<String, Validator>,
    value: Option<&Value>,
    config: &ValidationConfig,
) -> Result<(), ErrorPayload> {
    // A missing object is checked as `{}` so an all-optional object may be absent.
    let empty = Map::new();
    let target = match value {
        None | Some(Value::Null) => &empty,
        Some(Value::Object(map)) => map,
        Some(_) => return Err(ErrorPayload::Leaf(ErrorKind::WrongType)),
    };

    let mut errors = BTreeMap::new();
    for (name, validator) in fields {
        if let Err(payload) = validator.validate(target.get(name), config) {
            errors.insert(PathKey::field(name.as_str()), payload);
        }
    }

    if !config.allow_useless_property {
        for name in target.keys().filter(|name| !fields.contains_key(*name)) {
            errors.insert(
                PathKey::field(name.as_str()),
                ErrorPayload::Leaf(ErrorKind::UselessProperty),
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ErrorPayload::Branch(errors))
    }
}

fn check_array(
    element: &Validator,
    force: Option<ArrayForce>,
    element_nullable: bool,
    value: Option<&Value>,
    config: &ValidationConfig,
) -> Result<(), ErrorPayload> {
    let items = match value {
        None | Some(Value::Null) => {
            return if force.is_some() || !element_nullable {
                Err(ErrorPayload::Leaf(ErrorKind::ArrayMustBeArray))
            } else {
                Ok(())
            };
        }
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ErrorPayload::Leaf(ErrorKind::ArrayMustBeArray)),
    };

    if items.is_empty() {
        return if element_nullable || force == Some(ArrayForce::RequiredAllowEmpty) {
            Ok(())
        } else {
            Err(ErrorPayload::Leaf(ErrorKind::EmptyArray))
        };
    }

    // Element nullability only governs whether the array may be absent or
    // empty; a null inside a non-empty array is always reported.
    let errors: BTreeMap<PathKey, ErrorPayload> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let failure = match element.validate(Some(item), config) {
                Err(payload) => Some(payload),
                Ok(()) if item.is_null() => Some(ErrorPayload::Leaf(ErrorKind::EmptyElementValue)),
                Ok(()) => None,
            };
            failure.map(|payload| (PathKey::Index(index), payload))
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ErrorPayload::Branch(errors))
    }
}
