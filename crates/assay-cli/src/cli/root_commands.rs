use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate a JSON document against a schema
    Check(CheckArgs),
    /// Check that a schema compiles
    Lint(LintArgs),
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Schema file (JSON)
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Document to validate (JSON); reads stdin when omitted or "-"
    #[arg(long)]
    pub value: Option<PathBuf>,

    /// Tolerate properties the schema does not declare
    #[arg(long)]
    pub allow_more: bool,
}

#[derive(Debug, Args)]
pub struct LintArgs {
    /// Schema file (JSON)
    #[arg(short, long)]
    pub schema: PathBuf,
}
