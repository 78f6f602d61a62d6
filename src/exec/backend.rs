// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The recipe runner talks to an `ExecutorBackend` instead of spawning
//! processes itself. This makes it easy to swap in a scripted executor in
//! tests while keeping the production implementation in [`command`].
//!
//! - `ShellExecutor` is the default implementation used by `logpatch`. It
//!   starts a [`CommandStream`] through the configured shell.
//! - Tests can provide their own `ExecutorBackend` that, for example, records
//!   which commands were started and replays canned output.
//!
//! [`command`]: super::command

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

use super::command::CommandStream;

/// Future returned by [`LineSource::next_line`].
pub type LineFuture<'a> = Pin<Box<dyn Future<Output = Result<Option<String>>> + Send + 'a>>;

/// Lazy sequence of output lines from one started command.
///
/// `Ok(Some(line))` for each line, `Ok(None)` once the command finished
/// successfully, `Err(CommandFailed)` after the last line if it did not.
pub trait LineSource: Send {
    fn next_line(&mut self) -> LineFuture<'_>;

    /// The command text this source was started from.
    fn command(&self) -> &str;
}

impl LineSource for CommandStream {
    fn next_line(&mut self) -> LineFuture<'_> {
        Box::pin(CommandStream::next_line(self))
    }

    fn command(&self) -> &str {
        CommandStream::command(self)
    }
}

/// Trait abstracting how commands are started.
///
/// Production code uses [`ShellExecutor`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait ExecutorBackend: Send + Sync {
    /// Start `command` and hand back its output stream.
    fn spawn(&self, command: &str) -> Result<Box<dyn LineSource>>;
}

/// Real executor backend: runs each command as `<shell> -c <command>`.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: String,
}

impl ShellExecutor {
    pub const DEFAULT_SHELL: &'static str = "sh";

    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SHELL)
    }
}

impl ExecutorBackend for ShellExecutor {
    fn spawn(&self, command: &str) -> Result<Box<dyn LineSource>> {
        let stream = CommandStream::spawn(&self.shell, command)?;
        Ok(Box::new(stream))
    }
}
