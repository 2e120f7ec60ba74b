use assay_schema::compile_json;
use serde::Serialize;
use serde_json::Value;

use crate::cli::{GlobalFlags, LintArgs};
use crate::input;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct LintReport {
    pub valid: bool,
    pub error: Option<String>,
}

/// Handle `assay lint`.
pub fn handle(args: &LintArgs, flags: &GlobalFlags) -> anyhow::Result<bool> {
    let document = input::read_json(Some(args.schema.as_path()))?;
    let report = lint(&document);
    output(&report, flags.format)?;
    Ok(report.valid)
}

fn lint(document: &Value) -> LintReport {
    match compile_json(document) {
        Ok(_) => LintReport {
            valid: true,
            error: None,
        },
        Err(error) => {
            tracing::debug!(%error, root_cause = %error.root_cause(), "schema rejected");
            LintReport {
                valid: false,
                error: Some(error.to_string()),
            }
        }
    }
}
