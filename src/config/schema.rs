// src/config/schema.rs

//! Shape checking for a deserialized recipe document.
//!
//! The document must be a mapping of recipe key to recipe entry, and every
//! entry must carry the six required properties with the right types. Extra
//! properties on an entry are allowed.
//!
//! Validation never stops at the first problem: every missing or mistyped
//! field is reported, so a user can fix a config file in one pass.

use std::fmt;

use serde_yaml::{Mapping, Value};

/// Expected type of a required recipe property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Boolean,
}

impl FieldType {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Boolean => value.is_bool(),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
        }
    }
}

/// Required properties of every recipe entry, in reporting order.
pub const REQUIRED_FIELDS: [(&str, FieldType); 6] = [
    ("log_directory", FieldType::String),
    ("log_package_version_cmd", FieldType::Boolean),
    ("log_patch_cmd", FieldType::Boolean),
    ("name", FieldType::String),
    ("patch_cmd", FieldType::String),
    ("package_version_cmd", FieldType::String),
];

/// One shape violation found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Key path from the document root to the offending value.
    /// Empty when the document itself is the problem.
    pub path: Vec<String>,
    pub message: String,
}

impl SchemaError {
    fn new(path: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// Dotted rendering of [`SchemaError::path`], `$` for the root.
    pub fn path_display(&self) -> String {
        if self.path.is_empty() {
            "$".to_string()
        } else {
            self.path.join(".")
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path_display(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Check `document` against the recipe schema and collect every violation.
///
/// Returns an empty vector when the document is valid.
pub fn validate(document: &Value) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    let Some(recipes) = document.as_mapping() else {
        errors.push(SchemaError::new(
            Vec::new(),
            format!("{} is not of type 'object'", describe(document)),
        ));
        return errors;
    };

    for (key, entry) in recipes.iter() {
        let key_label = match key.as_str() {
            Some(k) => k.to_string(),
            None => {
                let label = describe(key);
                errors.push(SchemaError::new(
                    vec![label.clone()],
                    format!("recipe key {label} is not of type 'string'"),
                ));
                label
            }
        };
        validate_entry(&key_label, entry, &mut errors);
    }

    errors
}

fn validate_entry(key: &str, entry: &Value, errors: &mut Vec<SchemaError>) {
    let Some(fields) = entry.as_mapping() else {
        errors.push(SchemaError::new(
            vec![key.to_string()],
            format!("{} is not of type 'object'", describe(entry)),
        ));
        return;
    };

    for (field, expected) in REQUIRED_FIELDS {
        match lookup(fields, field) {
            None => errors.push(SchemaError::new(
                vec![key.to_string()],
                format!("'{field}' is a required property"),
            )),
            Some(value) if !expected.matches(value) => errors.push(SchemaError::new(
                vec![key.to_string(), field.to_string()],
                format!("{} is not of type '{}'", describe(value), expected.as_str()),
            )),
            Some(_) => {}
        }
    }

    check_name_is_file_safe(key, fields, errors);
}

/// `name` becomes part of a log file name, so it can't contain a path
/// separator or NUL.
fn check_name_is_file_safe(key: &str, fields: &Mapping, errors: &mut Vec<SchemaError>) {
    let Some(name) = lookup(fields, "name").and_then(Value::as_str) else {
        return;
    };
    if name.contains(['/', '\0']) {
        errors.push(SchemaError::new(
            vec![key.to_string(), "name".to_string()],
            format!("'{name}' must not contain '/' or NUL characters"),
        ));
    }
}

fn lookup<'a>(fields: &'a Mapping, name: &str) -> Option<&'a Value> {
    fields.get(Value::String(name.to_string()))
}

/// Short, single-line rendering of a value for error messages.
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{s}'"),
        Value::Sequence(_) => "array".to_string(),
        Value::Mapping(_) => "mapping".to_string(),
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, describe(&tagged.value)),
    }
}
