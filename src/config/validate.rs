// src/config/validate.rs

use std::collections::BTreeMap;

use serde_yaml::Value;

use crate::config::model::{ConfigFile, Recipe};
use crate::config::schema::{self, SchemaError};

impl TryFrom<Value> for ConfigFile {
    type Error = Vec<SchemaError>;

    fn try_from(document: Value) -> std::result::Result<Self, Self::Error> {
        let errors = schema::validate(&document);
        if !errors.is_empty() {
            return Err(errors);
        }

        // The shape is known to be right; a failure here means a value the
        // schema accepts but `Recipe` cannot hold.
        let recipes: BTreeMap<String, Recipe> =
            serde_yaml::from_value(document).map_err(|e| {
                vec![SchemaError {
                    path: Vec::new(),
                    message: e.to_string(),
                }]
            })?;

        Ok(ConfigFile::new_unchecked(recipes))
    }
}
