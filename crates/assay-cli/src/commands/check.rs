use anyhow::Context;
use assay_config::{AssayConfig, ValidationConfig};
use assay_core::{ErrorPayload, Violation};
use assay_schema::{AssertError, AssertOptions, Asserter, Schema};
use serde::Serialize;
use serde_json::Value;

use crate::cli::{CheckArgs, GlobalFlags};
use crate::input;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub valid: bool,
    pub errors: Option<ErrorPayload>,
    pub violations: Vec<Violation>,
}

/// Handle `assay check`.
pub fn handle(args: &CheckArgs, flags: &GlobalFlags, config: &AssayConfig) -> anyhow::Result<bool> {
    let schema = input::read_schema(&args.schema)?;
    let value = input::read_json(args.value.as_deref())?;

    let validation = asserter_config(config, flags.verbose);
    let report = evaluate(&schema, &value, args.allow_more, validation)
        .with_context(|| format!("cannot check against {}", args.schema.display()))?;

    if !(flags.quiet && report.valid) {
        output(&report, flags.format)?;
    }
    Ok(report.valid)
}

/// The report already carries every failure, so assert diagnostics are only
/// logged with `--verbose`.
const fn asserter_config(config: &AssayConfig, verbose: bool) -> ValidationConfig {
    config
        .validation
        .with_debug(config.validation.debug && verbose)
}

fn evaluate(
    schema: &Schema,
    value: &Value,
    allow_more: bool,
    config: ValidationConfig,
) -> anyhow::Result<CheckReport> {
    let asserter = Asserter::new(config);
    match asserter.check(Some(value), schema, AssertOptions { allow_more }) {
        Ok(()) => Ok(CheckReport {
            valid: true,
            errors: None,
            violations: Vec::new(),
        }),
        Err(AssertError::Value(payload)) => Ok(CheckReport {
            valid: false,
            violations: payload.violations(),
            errors: Some(payload),
        }),
        Err(error @ AssertError::Schema(_)) => Err(error.into()),
    }
}
