// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the shell commands named
//! in a recipe, using `tokio::process::Command`, and exposing their output
//! as a lazy line sequence.
//!
//! - [`command`] owns `CommandStream`, which runs one command with stdout and
//!   stderr merged into a single pipe and reports non-zero exits.
//! - [`backend`] provides the `ExecutorBackend` / `LineSource` traits and a
//!   concrete `ShellExecutor` that the runner uses in production, and which
//!   tests can replace with a scripted implementation.

pub mod backend;
pub mod command;

pub use backend::{ExecutorBackend, LineFuture, LineSource, ShellExecutor};
pub use command::CommandStream;
