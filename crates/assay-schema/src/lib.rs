//! # assay-schema
//!
//! Runtime structural validation of JSON values against a small schema grammar.
//!
//! This crate provides:
//! - [`Schema`]: primitive-union, keyed-object, array, and predicate schemas
//! - [`compile`]: turns a schema into a reusable [`Validator`]
//! - [`Asserter`] / [`assert`] / [`check`]: the entry point that compiles,
//!   validates, and reports
//!
//! A failed validation produces an [`ErrorPayload`] shaped like the data that
//! failed; an invalid schema produces a [`SchemaError`] instead.
//!
//! ```
//! use assay_schema::{AssertOptions, Schema, check};
//! use serde_json::json;
//!
//! let schema: Schema = serde_json::from_value(json!({
//!     "id": "s:n,r",
//!     "info": { "name": "s", "phones": ["s,r"] }
//! }))
//! .unwrap();
//!
//! assert!(check(&json!({"info": {"name": "Ada"}}), &schema, AssertOptions::default()).is_ok());
//!
//! let error = check(&json!({"info": {}}), &schema, AssertOptions::default()).unwrap_err();
//! assert_eq!(
//!     serde_json::to_value(error.payload().unwrap()).unwrap(),
//!     json!({"info": {"name": "emptyValue"}})
//! );
//! ```

mod assert;
mod compiler;
mod error;
mod schema;
mod validator;

pub use assay_config::ValidationConfig;
pub use assay_core::{ErrorKind, ErrorPayload, PathKey, TypeCategory, Violation, classify};
pub use assert::{AssertOptions, Asserter, assert, check};
pub use compiler::{compile, compile_json};
pub use error::{AssertError, SchemaError};
pub use schema::{ArrayForce, Predicate, Schema};
pub use validator::{PrimitiveType, Validator};
