use assay_config::AssayConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod check;
pub mod lint;

/// Route a parsed command to its handler. Returns whether the input was valid.
pub fn dispatch(
    command: &Commands,
    flags: &GlobalFlags,
    config: &AssayConfig,
) -> anyhow::Result<bool> {
    match command {
        Commands::Check(args) => check::handle(args, flags, config),
        Commands::Lint(args) => lint::handle(args, flags),
    }
}
