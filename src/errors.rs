// src/errors.rs

//! Crate-wide error type and `Result` alias.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::schema::SchemaError;

#[derive(Error, Debug)]
pub enum LogpatchError {
    #[error("Supplied path does not exist: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Supplied path is not a file: {}", .0.display())]
    ConfigNotAFile(PathBuf),

    #[error("Failed to parse configuration file {}: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error(
        "The supplied configuration file ({}) does not match the expected schema ({} error(s)):\n{}",
        .path.display(),
        .errors.len(),
        format_schema_errors(.errors)
    )]
    SchemaValidation {
        path: PathBuf,
        errors: Vec<SchemaError>,
    },

    #[error("Recipe not found: '{name}' (available: {})", .available.join(", "))]
    RecipeNotFound { name: String, available: Vec<String> },

    #[error("Command '{command}' returned non-zero exit status {exit_code}")]
    CommandFailed { command: String, exit_code: i32 },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LogpatchError {
    /// Wrap an IO error with a short description of what was being attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        LogpatchError::Io {
            context: context.into(),
            source,
        }
    }

    /// True for a command exiting non-zero; every other kind is a setup failure.
    pub fn is_command_failure(&self) -> bool {
        matches!(self, LogpatchError::CommandFailed { .. })
    }
}

fn format_schema_errors(errors: &[SchemaError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T> = std::result::Result<T, LogpatchError>;
