use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// YAML seed replacing the built-in hierarchy.
    pub seed: Option<PathBuf>,
    pub cwd: String,
    pub commands: Vec<String>,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            seed: cli.seed,
            cwd: cli.cwd,
            commands: cli.commands,
        }
    }
}
