use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// A retro desktop terminal on top of an in-memory filesystem.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// YAML file describing the initial hierarchy
    #[clap(long, short)]
    pub seed: Option<PathBuf>,

    /// Directory the session starts in
    #[clap(long, default_value = "/home/user")]
    pub cwd: String,

    /// Run these commands in order instead of reading from stdin
    #[clap(long = "command", short = 'c')]
    pub commands: Vec<String>,
}
