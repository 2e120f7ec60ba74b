//! The assert entry point: compile, run, report.

use std::fmt::Debug;

use assay_config::ValidationConfig;
use assay_core::ErrorPayload;
use serde_json::Value;

use crate::compiler::compile;
use crate::error::AssertError;
use crate::schema::Schema;
use crate::validator::Validator;

/// Per-call assertion options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssertOptions {
    /// Tolerate undeclared object properties for this call only.
    pub allow_more: bool,
}

impl AssertOptions {
    #[must_use]
    pub const fn allow_more() -> Self {
        Self { allow_more: true }
    }
}

/// Runs assertions under a fixed [`ValidationConfig`].
///
/// Diagnostics go through `tracing` and are only emitted when `debug` is on:
/// an `error` event for an invalid schema or a failed assertion, and a `debug`
/// event echoing the checked value and schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct Asserter {
    config: ValidationConfig,
}

impl Asserter {
    #[must_use]
    pub const fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Whether `value` conforms to `schema`. `None` stands for a missing value.
    #[must_use]
    pub fn assert(&self, value: Option<&Value>, schema: &Schema, options: AssertOptions) -> bool {
        self.check(value, schema, options).is_ok()
    }

    /// Like [`Self::assert`], but returns the reason for a failure.
    ///
    /// # Errors
    ///
    /// Returns [`AssertError::Schema`] if the schema does not compile and
    /// [`AssertError::Value`] with the error tree if the value does not conform.
    pub fn check(
        &self,
        value: Option<&Value>,
        schema: &Schema,
        options: AssertOptions,
    ) -> Result<(), AssertError> {
        let validator = compile(schema).map_err(|error| {
            if self.config.debug {
                tracing::error!(%error, ?schema, "[invalid schema]");
            }
            AssertError::Schema(error)
        })?;
        self.run(value, &validator, options, schema)
    }

    /// Assert against an already compiled validator.
    #[must_use]
    pub fn assert_compiled(
        &self,
        value: Option<&Value>,
        validator: &Validator,
        options: AssertOptions,
    ) -> bool {
        self.check_compiled(value, validator, options).is_ok()
    }

    /// Check against an already compiled validator.
    ///
    /// # Errors
    ///
    /// Returns [`AssertError::Value`] with the error tree if the value does not conform.
    pub fn check_compiled(
        &self,
        value: Option<&Value>,
        validator: &Validator,
        options: AssertOptions,
    ) -> Result<(), AssertError> {
        self.run(value, validator, options, validator)
    }

    fn run(
        &self,
        value: Option<&Value>,
        validator: &Validator,
        options: AssertOptions,
        schema: &dyn Debug,
    ) -> Result<(), AssertError> {
        let config = self.effective_config(options);
        validator.validate(value, &config).map_err(|payload| {
            if self.config.debug {
                report_failure(&payload, value, schema);
            }
            AssertError::Value(payload)
        })
    }

    const fn effective_config(&self, options: AssertOptions) -> ValidationConfig {
        self.config
            .with_allow_useless_property(self.config.allow_useless_property || options.allow_more)
    }
}

fn report_failure(payload: &ErrorPayload, value: Option<&Value>, schema: &dyn Debug) {
    tracing::error!(errors = %payload, "[assert failed]");
    tracing::debug!(?value, ?schema, "assert input");
}

/// [`Asserter::assert`] under the default configuration.
#[must_use]
pub fn assert(value: &Value, schema: &Schema, options: AssertOptions) -> bool {
    Asserter::default().assert(Some(value), schema, options)
}

/// [`Asserter::check`] under the default configuration.
///
/// # Errors
///
/// See [`Asserter::check`].
pub fn check(value: &Value, schema: &Schema, options: AssertOptions) -> Result<(), AssertError> {
    Asserter::default().check(Some(value), schema, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assay_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured_logs(run: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, run);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn quiet() -> Asserter {
        Asserter::new(ValidationConfig::default().with_debug(false))
    }

    #[test]
    fn invalid_schema_is_false_not_a_panic() {
        assert!(!quiet().assert(Some(&json!(1)), &Schema::from("n:n"), AssertOptions::default()));
        assert!(matches!(
            quiet().check(Some(&json!(1)), &Schema::from("z"), AssertOptions::default()),
            Err(AssertError::Schema(_))
        ));
    }

    #[test]
    fn allow_more_is_scoped_to_one_call() {
        let asserter = quiet();
        let schema = Schema::object([("a", Schema::from("s"))]);
        let value = json!({"a": "x", "b": 1});

        assert!(asserter.assert(Some(&value), &schema, AssertOptions::allow_more()));
        let error = asserter
            .check(Some(&value), &schema, AssertOptions::default())
            .unwrap_err();
        assert_eq!(
            error.payload().and_then(|p| p.field("b")),
            Some(&ErrorPayload::Leaf(ErrorKind::UselessProperty))
        );
    }

    #[test]
    fn configured_tolerance_applies_without_options() {
        let asserter = Asserter::new(
            ValidationConfig::default()
                .with_debug(false)
                .with_allow_useless_property(true),
        );
        let schema = Schema::object([("a", Schema::from("s"))]);
        assert!(asserter.assert(Some(&json!({"a": "x", "b": 1})), &schema, AssertOptions::default()));
    }

    #[test]
    fn compiled_validator_is_reusable() {
        let asserter = quiet();
        let validator = compile(&Schema::array(Schema::from("n"))).unwrap();
        for _ in 0..3 {
            assert!(asserter.assert_compiled(Some(&json!([1, 2])), &validator, AssertOptions::default()));
            assert!(!asserter.assert_compiled(Some(&json!([])), &validator, AssertOptions::default()));
        }
    }

    #[test]
    fn debug_mode_still_returns_results() {
        let asserter = Asserter::default();
        assert!(asserter.config().debug);
        assert!(!asserter.assert(None, &Schema::from("n"), AssertOptions::default()));
        assert!(asserter.assert(None, &Schema::from("n,r"), AssertOptions::default()));
    }

    #[test]
    fn debug_mode_logs_schema_and_value_failures() {
        let asserter = Asserter::default();
        let logs = captured_logs(|| {
            assert!(!asserter.assert(Some(&json!(1)), &Schema::from("n:n"), AssertOptions::default()));
            assert!(!asserter.assert(Some(&json!("x")), &Schema::from("n"), AssertOptions::default()));
        });
        assert!(logs.contains("[invalid schema]"), "{logs}");
        assert!(logs.contains("duplicate type token"), "{logs}");
        assert!(logs.contains("[assert failed]"), "{logs}");
        assert!(logs.contains("wrongType"), "{logs}");
        assert!(logs.contains("assert input"), "{logs}");
    }

    #[test]
    fn quiet_mode_logs_nothing() {
        let asserter = quiet();
        let logs = captured_logs(|| {
            assert!(!asserter.assert(Some(&json!(1)), &Schema::from("n:n"), AssertOptions::default()));
            assert!(!asserter.assert(Some(&json!("x")), &Schema::from("n"), AssertOptions::default()));
        });
        assert_eq!(logs, "");
    }
}
