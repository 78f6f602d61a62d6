// src/config/loader.rs

use std::fs;
use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use crate::config::model::ConfigFile;
use crate::errors::{LogpatchError, Result};

/// Load a configuration file from a given path as a generic document.
///
/// This only checks the path and deserializes; it does **not** check the
/// recipe schema. Use [`load_and_validate`] for that.
///
/// Files ending in `.toml` are parsed as TOML, everything else as YAML. Both
/// end up in the same `serde_yaml::Value` shape.
pub fn load_document(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LogpatchError::ConfigNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(LogpatchError::ConfigNotAFile(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| LogpatchError::io(format!("reading {}", path.display()), e))?;

    let document = if is_toml(path) {
        parse_toml(&contents)
    } else {
        parse_yaml(&contents)
    }
    .map_err(|message| LogpatchError::ConfigParse {
        path: path.to_path_buf(),
        message,
    })?;

    debug!(path = %path.display(), ?document, "loaded configuration document");
    Ok(document)
}

/// Load a configuration file from path and check it against the recipe schema.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Checks the path exists and is a regular file.
/// - Parses YAML (or TOML).
/// - Collects every schema violation into one
///   [`LogpatchError::SchemaValidation`].
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let document = load_document(path)?;
    ConfigFile::try_from(document).map_err(|errors| LogpatchError::SchemaValidation {
        path: path.to_path_buf(),
        errors,
    })
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

fn parse_yaml(contents: &str) -> std::result::Result<Value, String> {
    // An empty file is a null document, which then fails schema validation.
    if contents.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(contents).map_err(|e| e.to_string())
}

fn parse_toml(contents: &str) -> std::result::Result<Value, String> {
    let table: toml::Table = toml::from_str(contents).map_err(|e| e.to_string())?;
    serde_yaml::to_value(table).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn toml_and_yaml_produce_the_same_document() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("recipes.yaml");
        fs::write(
            &yaml_path,
            "demo:\n  name: demo\n  log_patch_cmd: true\n  patch_cmd: echo hi\n",
        )
        .unwrap();

        let toml_path = dir.path().join("recipes.toml");
        let mut f = fs::File::create(&toml_path).unwrap();
        writeln!(
            f,
            "[demo]\nname = \"demo\"\nlog_patch_cmd = true\npatch_cmd = \"echo hi\""
        )
        .unwrap();

        assert_eq!(
            load_document(&yaml_path).unwrap(),
            load_document(&toml_path).unwrap()
        );
    }

    #[test]
    fn empty_yaml_file_loads_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.yml");
        fs::write(&path, "").unwrap();
        assert_eq!(load_document(&path).unwrap(), Value::Null);
    }
}
