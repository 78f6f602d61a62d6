// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::{LogpatchError, Result};

/// Validated configuration: every recipe in the file, keyed by the name the
/// user selects on the command line.
///
/// ```yaml
/// ubuntu:
///   name: apt-upgrade
///   log_directory: /var/log/logpatch
///   log_package_version_cmd: true
///   log_patch_cmd: true
///   patch_cmd: apt-get upgrade -y
///   package_version_cmd: dpkg -l
/// ```
///
/// Only built through `TryFrom<serde_yaml::Value>` (see `validate.rs`), so a
/// `ConfigFile` in hand always satisfies the schema.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    recipes: BTreeMap<String, Recipe>,
}

impl ConfigFile {
    /// Construct without running schema validation.
    ///
    /// Intended for use after validation has already succeeded.
    pub(crate) fn new_unchecked(recipes: BTreeMap<String, Recipe>) -> Self {
        Self { recipes }
    }

    pub fn recipes(&self) -> &BTreeMap<String, Recipe> {
        &self.recipes
    }

    /// Look up the recipe selected on the command line.
    pub fn recipe(&self, key: &str) -> Result<&Recipe> {
        self.recipes
            .get(key)
            .ok_or_else(|| LogpatchError::RecipeNotFound {
                name: key.to_string(),
                available: self.recipes.keys().cloned().collect(),
            })
    }
}

/// One patch procedure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Recipe {
    /// Human-readable identifier; also the suffix of the patch log file.
    pub name: String,

    /// Directory that receives the generated log files.
    pub log_directory: PathBuf,

    /// Run and log `package_version_cmd` before and after patching.
    pub log_package_version_cmd: bool,

    /// Log `patch_cmd` output to a file. The console always shows it.
    pub log_patch_cmd: bool,

    /// Shell command that applies the patches.
    pub patch_cmd: String,

    /// Shell command that lists installed package versions.
    pub package_version_cmd: String,
}
