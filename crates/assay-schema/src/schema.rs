//! The schema grammar.
//!
//! A [`Schema`] is one of four shapes:
//!
//! ```text
//! "b" | "n:s" | "s:n,r"          primitive union; ",r" marks the field optional
//! { "id": "s:n,r", "info": {..} } keyed object
//! [ element ] | [ element, "f" ]  array of one element schema; "f"/"F" force the field
//! |v| ...                         predicate
//! ```
//!
//! Schemas are normally authored as JSON and parsed with [`Schema::from_json`],
//! which decides the variant from the value's shape. The builder constructors
//! produce the same variants directly.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use assay_core::classify;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::SchemaError;

type PredicateFn = dyn Fn(Option<&Value>) -> bool + Send + Sync;

/// A user-supplied check on a single value.
///
/// Receives the value exactly as found (`None` when missing), with no null
/// handling applied beforehand.
#[derive(Clone)]
pub struct Predicate(Arc<PredicateFn>);

impl Predicate {
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(check))
    }

    #[must_use]
    pub fn test(&self, value: Option<&Value>) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// The force flag of an array schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayForce {
    /// `"f"`: the field must be an array; emptiness follows the element schema.
    Required,
    /// `"F"`: the field must be an array; an empty array is always accepted.
    RequiredAllowEmpty,
}

impl ArrayForce {
    /// Parse the second entry of an array schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ForceFlag`] for anything but `"f"` or `"F"`.
    pub fn from_token(token: &str) -> Result<Self, SchemaError> {
        match token {
            "f" => Ok(Self::Required),
            "F" => Ok(Self::RequiredAllowEmpty),
            other => Err(SchemaError::ForceFlag(format!("{other:?}"))),
        }
    }

    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Required => "f",
            Self::RequiredAllowEmpty => "F",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Schema {
    /// `"<types>[,r]"`, checked when compiled.
    Primitive(String),
    Object(BTreeMap<String, Schema>),
    Array {
        element: Box<Schema>,
        force: Option<ArrayForce>,
    },
    Predicate(Predicate),
}

impl Schema {
    pub fn primitive(spec: impl Into<String>) -> Self {
        Self::Primitive(spec.into())
    }

    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Self)>,
        K: Into<String>,
    {
        Self::Object(
            fields
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
        )
    }

    #[must_use]
    pub fn array(element: Self) -> Self {
        Self::Array {
            element: Box::new(element),
            force: None,
        }
    }

    #[must_use]
    pub fn forced_array(element: Self, force: ArrayForce) -> Self {
        Self::Array {
            element: Box::new(element),
            force: Some(force),
        }
    }

    pub fn predicate<F>(check: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Predicate::new(check))
    }

    /// Parse a JSON-authored schema, choosing the variant from the value's shape.
    ///
    /// Strings become primitive schemas (their grammar is checked by the
    /// compiler), objects become keyed schemas, and arrays become array
    /// schemas. Predicates cannot be expressed in JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] for booleans, numbers and `null`, for arrays
    /// whose length is not 1 or 2, and for force flags other than `"f"`/`"F"`.
    pub fn from_json(value: &Value) -> Result<Self, SchemaError> {
        match value {
            Value::String(spec) => Ok(Self::Primitive(spec.clone())),
            Value::Object(map) => map
                .iter()
                .map(|(name, field)| {
                    Self::from_json(field)
                        .map(|schema| (name.clone(), schema))
                        .map_err(|source| SchemaError::Property {
                            name: name.clone(),
                            source: Box::new(source),
                        })
                })
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(Self::Object),
            Value::Array(items) => {
                let (element, force) = match items.as_slice() {
                    [element] => (element, None),
                    [element, Value::String(token)] => (element, Some(ArrayForce::from_token(token)?)),
                    [_, other] => return Err(SchemaError::ForceFlag(other.to_string())),
                    _ => return Err(SchemaError::ArrayArity(items.len())),
                };
                let element = Self::from_json(element)
                    .map_err(|source| SchemaError::Element(Box::new(source)))?;
                Ok(Self::Array {
                    element: Box::new(element),
                    force,
                })
            }
            other => Err(SchemaError::UnsupportedShape(classify(Some(other)))),
        }
    }
}

impl From<&str> for Schema {
    fn from(spec: &str) -> Self {
        Self::Primitive(spec.to_string())
    }
}

impl TryFrom<&Value> for Schema {
    type Error = SchemaError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assay_core::TypeCategory;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn strings_parse_as_primitives_without_grammar_check() {
        // Grammar errors surface at compile time, not parse time.
        assert!(matches!(
            Schema::from_json(&json!("x:y")),
            Ok(Schema::Primitive(spec)) if spec == "x:y"
        ));
    }

    #[test]
    fn objects_parse_recursively() {
        let schema = Schema::from_json(&json!({"id": "s", "tags": ["s,r"]})).unwrap();
        let Schema::Object(fields) = schema else {
            panic!("expected object schema");
        };
        assert!(matches!(fields.get("id"), Some(Schema::Primitive(_))));
        assert!(matches!(
            fields.get("tags"),
            Some(Schema::Array { force: None, .. })
        ));
    }

    #[rstest]
    #[case(json!(["n", "f"]), ArrayForce::Required)]
    #[case(json!(["n", "F"]), ArrayForce::RequiredAllowEmpty)]
    fn parses_force_flags(#[case] value: Value, #[case] expected: ArrayForce) {
        let schema = Schema::from_json(&value).unwrap();
        assert!(matches!(schema, Schema::Array { force: Some(force), .. } if force == expected));
    }

    #[rstest]
    #[case(json!([]), SchemaError::ArrayArity(0))]
    #[case(json!(["n", "f", "F"]), SchemaError::ArrayArity(3))]
    #[case(json!(["n", "r"]), SchemaError::ForceFlag("\"r\"".into()))]
    #[case(json!(["n", 1]), SchemaError::ForceFlag("1".into()))]
    #[case(json!(true), SchemaError::UnsupportedShape(TypeCategory::Boolean))]
    #[case(json!(3), SchemaError::UnsupportedShape(TypeCategory::Number))]
    #[case(json!(null), SchemaError::UnsupportedShape(TypeCategory::Null))]
    fn rejects_malformed_shapes(#[case] value: Value, #[case] expected: SchemaError) {
        assert_eq!(Schema::from_json(&value).unwrap_err(), expected);
    }

    #[test]
    fn nested_failure_keeps_location() {
        let error = Schema::from_json(&json!({"info": {"phones": [1]}})).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid schema for property 'info': invalid schema for property 'phones': \
             invalid array element schema: unsupported schema shape: number"
        );
    }

    #[test]
    fn deserializes_through_from_json() {
        let schema: Schema = serde_json::from_str(r#"[{"id": "s"}, "F"]"#).unwrap();
        assert!(matches!(
            schema,
            Schema::Array {
                force: Some(ArrayForce::RequiredAllowEmpty),
                ..
            }
        ));

        let error = serde_json::from_str::<Schema>("42").unwrap_err();
        assert!(error.to_string().contains("unsupported schema shape"));
    }

    #[test]
    fn builders_match_parsed_shapes() {
        let built = Schema::object([("a", Schema::from("s")), ("b", Schema::array("n".into()))]);
        let Schema::Object(fields) = built else {
            panic!("expected object schema");
        };
        assert_eq!(fields.len(), 2);
        assert!(matches!(fields.get("b"), Some(Schema::Array { force: None, .. })));
    }

    #[rstest]
    #[case(ArrayForce::Required)]
    #[case(ArrayForce::RequiredAllowEmpty)]
    fn force_token_parses_back(#[case] force: ArrayForce) {
        assert_eq!(ArrayForce::from_token(force.token()), Ok(force));
    }

    #[test]
    fn try_from_value_parses_like_from_json() {
        let value = json!([{"id": "s"}, "f"]);
        assert!(matches!(
            Schema::try_from(&value),
            Ok(Schema::Array {
                force: Some(ArrayForce::Required),
                ..
            })
        ));
        assert_eq!(
            Schema::try_from(&json!(1.5)).unwrap_err(),
            SchemaError::UnsupportedShape(TypeCategory::Number)
        );
    }

    #[test]
    fn predicate_debug_is_opaque() {
        let schema = Schema::predicate(|v| v.is_some());
        assert_eq!(format!("{schema:?}"), "Predicate(Predicate(..))");
    }
}
