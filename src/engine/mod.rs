// src/engine/mod.rs

//! Recipe orchestration.
//!
//! - [`plan`] turns a `Recipe` into its ordered list of steps and owns the
//!   log file naming (timestamp format and suffixes). It is pure, so the
//!   dry-run output and the runner always agree.
//! - [`runner`] executes a plan through an `ExecutorBackend`, draining each
//!   step to the console and its log file before starting the next.

pub mod plan;
pub mod runner;

pub use plan::{PlannedStep, RecipePlan, StepKind, TIMESTAMP_FORMAT};
pub use runner::{RecipeRunner, RunSummary, StepRecord};
