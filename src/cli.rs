// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::exec::ShellExecutor;
use crate::types::FailurePolicy;

/// Command-line arguments for `logpatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "logpatch",
    version,
    about = "Execute a software upgrade procedure using a package manager. Output can \
             optionally be recorded if required. This is all controlled via a YAML file.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a logpatch configuration file (YAML, or TOML with a `.toml` extension).
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: String,

    /// The selected recipe to use from the configuration file.
    #[arg(value_name = "RECIPE", required_unless_present = "list")]
    pub recipe: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `LOGPATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Shell used to run recipe commands (invoked as `<shell> -c <cmd>`).
    #[arg(long, value_name = "SHELL", default_value = ShellExecutor::DEFAULT_SHELL)]
    pub shell: String,

    /// What to do when a recipe command exits non-zero: `report` logs the
    /// failure and exits 0, `fail` exits 1.
    #[arg(long, value_name = "POLICY", default_value_t = FailurePolicy::Report)]
    pub on_command_failure: FailurePolicy,

    /// Parse + validate, print the recipe's steps, but don't execute any commands.
    #[arg(long)]
    pub dry_run: bool,

    /// List the recipes in the configuration file and exit.
    #[arg(long)]
    pub list: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
