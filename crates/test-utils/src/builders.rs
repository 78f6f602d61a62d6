#![allow(dead_code)]

use std::path::{Path, PathBuf};

use logpatch::config::{ConfigFile, Recipe};
use serde_yaml::{Mapping, Value};

/// Builder for `Recipe` to simplify test setup.
pub struct RecipeBuilder {
    recipe: Recipe,
}

impl RecipeBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            recipe: Recipe {
                name: name.to_string(),
                log_directory: PathBuf::from("."),
                log_package_version_cmd: false,
                log_patch_cmd: false,
                patch_cmd: "true".to_string(),
                package_version_cmd: "true".to_string(),
            },
        }
    }

    pub fn log_directory(mut self, dir: impl AsRef<Path>) -> Self {
        self.recipe.log_directory = dir.as_ref().to_path_buf();
        self
    }

    pub fn log_package_versions(mut self, val: bool) -> Self {
        self.recipe.log_package_version_cmd = val;
        self
    }

    pub fn log_patch(mut self, val: bool) -> Self {
        self.recipe.log_patch_cmd = val;
        self
    }

    pub fn patch_cmd(mut self, cmd: &str) -> Self {
        self.recipe.patch_cmd = cmd.to_string();
        self
    }

    pub fn package_version_cmd(mut self, cmd: &str) -> Self {
        self.recipe.package_version_cmd = cmd.to_string();
        self
    }

    pub fn build(self) -> Recipe {
        self.recipe
    }
}

/// Render a recipe as the generic document entry the loader would produce.
pub fn recipe_value(recipe: &Recipe) -> Value {
    let mut m = Mapping::new();
    m.insert("name".into(), recipe.name.clone().into());
    m.insert(
        "log_directory".into(),
        recipe.log_directory.display().to_string().into(),
    );
    m.insert(
        "log_package_version_cmd".into(),
        recipe.log_package_version_cmd.into(),
    );
    m.insert("log_patch_cmd".into(), recipe.log_patch_cmd.into());
    m.insert("patch_cmd".into(), recipe.patch_cmd.clone().into());
    m.insert(
        "package_version_cmd".into(),
        recipe.package_version_cmd.clone().into(),
    );
    Value::Mapping(m)
}

/// Builder for a whole configuration document.
#[derive(Default)]
pub struct DocumentBuilder {
    doc: Mapping,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipe(mut self, key: &str, recipe: &Recipe) -> Self {
        self.doc.insert(key.into(), recipe_value(recipe));
        self
    }

    /// Insert an arbitrary (possibly invalid) entry.
    pub fn with_entry(mut self, key: &str, entry: Value) -> Self {
        self.doc.insert(key.into(), entry);
        self
    }

    pub fn build(self) -> Value {
        Value::Mapping(self.doc)
    }

    pub fn build_config(self) -> ConfigFile {
        ConfigFile::try_from(self.build()).expect("Failed to build valid config from builder")
    }
}
