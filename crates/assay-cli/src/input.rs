use std::io::Read;
use std::path::Path;

use anyhow::Context;
use assay_schema::Schema;
use serde_json::Value;

/// Read a JSON document from `path`, or from stdin when `path` is `None` or `-`.
pub fn read_json(path: Option<&Path>) -> anyhow::Result<Value> {
    match path {
        Some(path) if path != Path::new("-") => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("invalid JSON in {}", path.display()))
        }
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
            serde_json::from_str(&content).context("invalid JSON on stdin")
        }
    }
}

/// Read and parse a schema file.
pub fn read_schema(path: &Path) -> anyhow::Result<Schema> {
    let document = read_json(Some(path))?;
    Schema::from_json(&document)
        .with_context(|| format!("schema is invalid: {}", path.display()))
}
