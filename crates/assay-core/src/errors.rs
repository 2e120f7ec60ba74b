//! Cross-cutting error types for Assay.
//!
//! Schema and configuration errors live in their own crates. This module only
//! covers failures of the core vocabulary itself, such as parsing a code name
//! that is not part of the taxonomy.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The string is not one of the known error codes.
    #[error("Unknown error code: {0}")]
    UnknownErrorCode(String),

    /// The string is not one of the known type categories.
    #[error("Unknown type category: {0}")]
    UnknownCategory(String),
}
