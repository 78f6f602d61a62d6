// src/engine/runner.rs

//! Executes a recipe's planned steps one after another.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWrite;
use tracing::{error, info};

use crate::config::Recipe;
use crate::engine::plan::{timestamp_now, RecipePlan, StepKind};
use crate::errors::Result;
use crate::exec::ExecutorBackend;
use crate::sink::{drain, LogFile};

/// Record of one step that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub kind: StepKind,
    pub command: String,
    pub log_file: Option<PathBuf>,
    pub lines: usize,
}

/// What a successful recipe run did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub recipe: String,
    pub steps: Vec<StepRecord>,
}

impl RunSummary {
    pub fn log_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.steps.iter().filter_map(|s| s.log_file.as_ref())
    }
}

/// Runs recipes against an executor backend, echoing output to `console`.
///
/// Steps run strictly in plan order and the first failing step stops the
/// recipe: a failed pre-patch inventory means the patch command is never
/// started, and a failed patch skips the post-patch inventory.
pub struct RecipeRunner<E, W> {
    executor: E,
    console: W,
}

impl<E, W> RecipeRunner<E, W>
where
    E: ExecutorBackend,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(executor: E, console: W) -> Self {
        Self { executor, console }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Give back the console sink (tests use this to inspect a buffer).
    pub fn into_console(self) -> W {
        self.console
    }

    pub async fn run_recipe(&mut self, recipe: &Recipe) -> Result<RunSummary> {
        info!(recipe = %recipe.name, "Executing recipe");

        let plan = RecipePlan::for_recipe(recipe);
        let mut summary = RunSummary {
            recipe: recipe.name.clone(),
            steps: Vec::with_capacity(plan.steps.len()),
        };

        for step in &plan.steps {
            // Captured per step so each file name reflects when it started.
            let log_file = step.log_path(&recipe.log_directory, &timestamp_now());

            info!(
                recipe = %recipe.name,
                step = %step.kind,
                cmd = %step.command,
                log_file = ?log_file,
                "running step"
            );

            let count = match self.run_step(&step.command, log_file.as_deref()).await {
                Ok(count) => count,
                Err(err) => {
                    error!(
                        recipe = %recipe.name,
                        step = %step.kind,
                        error = %err,
                        "step failed; skipping remaining steps"
                    );
                    return Err(err);
                }
            };

            summary.steps.push(StepRecord {
                kind: step.kind,
                command: step.command.clone(),
                log_file,
                lines: count,
            });
        }

        info!(
            recipe = %recipe.name,
            steps = summary.steps.len(),
            log_files = summary.log_files().count(),
            "recipe finished"
        );

        Ok(summary)
    }

    /// Open the step's log file, then start the command and drain it.
    ///
    /// The command is never started when its log file can't be opened.
    async fn run_step(&mut self, command: &str, log_file: Option<&Path>) -> Result<usize> {
        let mut log = match log_file {
            Some(path) => Some(LogFile::open_append(path).await?),
            None => None,
        };

        let mut lines = self.executor.spawn(command)?;
        drain(lines.as_mut(), log.as_mut(), &mut self.console).await
    }
}
