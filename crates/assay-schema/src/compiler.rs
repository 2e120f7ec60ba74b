//! Schema compilation.
//!
//! Compilation checks the grammar of every nested schema and fails fast: the
//! first invalid sub-schema makes the whole schema invalid, and nothing is
//! partially compiled.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::SchemaError;
use crate::schema::{ArrayForce, Schema};
use crate::validator::{PrimitiveType, Validator};

/// Compile a schema into a reusable [`Validator`].
///
/// # Errors
///
/// Returns a [`SchemaError`] if the schema, or any schema nested in it, does
/// not follow the grammar.
pub fn compile(schema: &Schema) -> Result<Validator, SchemaError> {
    match schema {
        Schema::Primitive(spec) => compile_primitive(spec),
        Schema::Object(fields) => compile_object(fields),
        Schema::Array { element, force } => compile_array(element, *force),
        Schema::Predicate(predicate) => Ok(Validator::predicate(predicate.clone())),
    }
}

/// Parse and compile a JSON-authored schema.
///
/// # Errors
///
/// Returns a [`SchemaError`] if the value is not a schema or does not compile.
pub fn compile_json(value: &Value) -> Result<Validator, SchemaError> {
    compile(&Schema::from_json(value)?)
}

fn compile_primitive(spec: &str) -> Result<Validator, SchemaError> {
    let mut segments = spec.split(',');
    let types = segments.next().unwrap_or_default();
    let optional = match (segments.next(), segments.next()) {
        (None, _) => false,
        (Some("r"), None) => true,
        (Some(flag), None) => {
            return Err(SchemaError::primitive(
                spec,
                format!("optional flag must be \"r\", found {flag:?}"),
            ));
        }
        (Some(_), Some(_)) => {
            return Err(SchemaError::primitive(spec, "more than one ',' separator"));
        }
    };

    let mut accepts = Vec::with_capacity(3);
    for token in types.split(':') {
        let primitive = PrimitiveType::from_token(token).ok_or_else(|| {
            SchemaError::primitive(spec, format!("unknown type token {token:?}"))
        })?;
        if accepts.contains(&primitive) {
            return Err(SchemaError::primitive(
                spec,
                format!("duplicate type token {token:?}"),
            ));
        }
        accepts.push(primitive);
    }

    Ok(Validator::primitive(accepts, optional))
}

fn compile_object(fields: &BTreeMap<String, Schema>) -> Result<Validator, SchemaError> {
    fields
        .iter()
        .map(|(name, schema)| {
            compile(schema)
                .map(|validator| (name.clone(), validator))
                .map_err(|source| SchemaError::Property {
                    name: name.clone(),
                    source: Box::new(source),
                })
        })
        .collect::<Result<BTreeMap<_, _>, _>>()
        .map(Validator::object)
}

fn compile_array(element: &Schema, force: Option<ArrayForce>) -> Result<Validator, SchemaError> {
    let element =
        compile(element).map_err(|source| SchemaError::Element(Box::new(source)))?;
    Ok(Validator::array(element, force))
}
