//! Validation behaviour switches.

use serde::{Deserialize, Serialize};

const fn default_debug() -> bool {
    true
}

/// Options consumed by compiled validators and the assert entry point.
///
/// Passed explicitly into every validation call; nothing in Assay keeps a
/// process-wide copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Accept object properties that the schema does not declare.
    #[serde(default)]
    pub allow_useless_property: bool,

    /// Emit diagnostics for invalid schemas and failed assertions.
    #[serde(default = "default_debug")]
    pub debug: bool,
}

impl ValidationConfig {
    #[must_use]
    pub const fn with_allow_useless_property(mut self, allow: bool) -> Self {
        self.allow_useless_property = allow;
        self
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            allow_useless_property: false,
            debug: default_debug(),
        }
    }
}
