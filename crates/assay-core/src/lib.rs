//! # assay-core
//!
//! Foundational types shared by every Assay crate:
//! - `TypeCategory` and [`classify`]: the semantic category of a candidate value
//! - `ErrorKind`: the closed set of validation error codes and their messages
//! - `ErrorPayload`: the path-addressable error tree produced by a failed validation
//! - Cross-cutting error types

pub mod category;
pub mod errors;
pub mod kind;
pub mod payload;

pub use category::{TypeCategory, classify};
pub use errors::CoreError;
pub use kind::ErrorKind;
pub use payload::{ErrorPayload, PathKey, Violation};
