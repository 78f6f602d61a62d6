// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod sink;
pub mod types;

use anyhow::anyhow;
use tracing::{error, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::{ConfigFile, Recipe};
use crate::engine::{RecipePlan, RecipeRunner, TIMESTAMP_FORMAT};
use crate::errors::{LogpatchError, Result};
use crate::exec::ShellExecutor;
use crate::types::FailurePolicy;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading + schema validation
/// - recipe selection
/// - dry-run / listing output
/// - the recipe runner over a real shell executor
///
/// Configuration problems are returned before any command runs. A failing
/// command is handled according to `--on-command-failure`.
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config_path)?;

    if args.list {
        print_recipe_list(&cfg);
        return Ok(());
    }

    let key = args
        .recipe
        .as_deref()
        .ok_or_else(|| LogpatchError::Other(anyhow!("no recipe selected")))?;
    let recipe = cfg.recipe(key)?;

    if args.dry_run {
        print_dry_run(key, recipe);
        return Ok(());
    }

    let executor = ShellExecutor::new(args.shell.clone());
    let mut runner = RecipeRunner::new(executor, tokio::io::stdout());

    match runner.run_recipe(recipe).await {
        Ok(summary) => {
            for path in summary.log_files() {
                info!(recipe = %summary.recipe, log_file = %path.display(), "wrote log file");
            }
            Ok(())
        }
        Err(err) if err.is_command_failure() => {
            handle_command_failure(recipe, err, args.on_command_failure)
        }
        Err(err) => Err(err),
    }
}

fn handle_command_failure(recipe: &Recipe, err: LogpatchError, policy: FailurePolicy) -> Result<()> {
    match policy {
        FailurePolicy::Report => {
            error!(recipe = %recipe.name, error = %err, "recipe stopped after a failed command");
            Ok(())
        }
        FailurePolicy::Fail => Err(err),
    }
}

fn print_recipe_list(cfg: &ConfigFile) {
    println!("recipes ({}):", cfg.recipes().len());
    for (key, recipe) in cfg.recipes() {
        println!("  - {key} ({})", recipe.name);
    }
}

/// Simple dry-run output: print the recipe and its planned steps.
fn print_dry_run(key: &str, recipe: &Recipe) {
    let plan = RecipePlan::for_recipe(recipe);

    println!("logpatch dry-run");
    println!("  recipe: {key}");
    println!("  name: {}", recipe.name);
    println!("  log_directory: {}", recipe.log_directory.display());
    println!();

    println!("steps ({}):", plan.steps.len());
    for (i, step) in plan.steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step.kind);
        println!("      cmd: {}", step.command);
        match step.log_path(&recipe.log_directory, "<timestamp>") {
            Some(path) => println!("      log: {}", path.display()),
            None => println!("      log: console only"),
        }
    }
    println!();
    println!("timestamps use the UTC format {TIMESTAMP_FORMAT}");
}
