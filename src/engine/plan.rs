// src/engine/plan.rs

//! Pure description of what a recipe will run, in order.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::config::Recipe;

/// `YYYYMMDDThhmmss.ffffffZ`, always UTC.
///
/// Fixed width, so log file names sort chronologically.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.6fZ";

pub const PRE_PATCH_SUFFIX: &str = "package_versions_pre-patch";
pub const POST_PATCH_SUFFIX: &str = "package_versions_post-patch";

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn timestamp_now() -> String {
    format_timestamp(Utc::now())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    PrePatchInventory,
    Patch,
    PostPatchInventory,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepKind::PrePatchInventory => "pre-patch inventory",
            StepKind::Patch => "patch",
            StepKind::PostPatchInventory => "post-patch inventory",
        };
        f.write_str(s)
    }
}

/// One command the recipe will run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub kind: StepKind,
    pub command: String,
    /// Suffix of the log file name; `None` means console only.
    pub log_suffix: Option<String>,
}

impl PlannedStep {
    /// Full log path for this step at `timestamp`, or `None` if the step
    /// is not logged to a file.
    pub fn log_path(&self, log_directory: &Path, timestamp: &str) -> Option<PathBuf> {
        self.log_suffix
            .as_ref()
            .map(|suffix| log_directory.join(format!("{timestamp}_{suffix}.log")))
    }
}

/// Ordered steps for one recipe:
///
/// 1. pre-patch inventory (only if `log_package_version_cmd`)
/// 2. patch (file-logged only if `log_patch_cmd`)
/// 3. post-patch inventory (only if `log_package_version_cmd`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipePlan {
    pub steps: Vec<PlannedStep>,
}

impl RecipePlan {
    pub fn for_recipe(recipe: &Recipe) -> Self {
        let mut steps = Vec::with_capacity(3);

        if recipe.log_package_version_cmd {
            steps.push(PlannedStep {
                kind: StepKind::PrePatchInventory,
                command: recipe.package_version_cmd.clone(),
                log_suffix: Some(PRE_PATCH_SUFFIX.to_string()),
            });
        }

        steps.push(PlannedStep {
            kind: StepKind::Patch,
            command: recipe.patch_cmd.clone(),
            log_suffix: recipe.log_patch_cmd.then(|| recipe.name.clone()),
        });

        if recipe.log_package_version_cmd {
            steps.push(PlannedStep {
                kind: StepKind::PostPatchInventory,
                command: recipe.package_version_cmd.clone(),
                log_suffix: Some(POST_PATCH_SUFFIX.to_string()),
            });
        }

        Self { steps }
    }

    pub fn logged_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.log_suffix.is_some()).count()
    }
}
