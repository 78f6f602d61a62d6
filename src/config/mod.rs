// src/config/mod.rs

//! Configuration loading and validation for logpatch.
//!
//! Responsibilities:
//! - Define the typed recipe model (`model.rs`).
//! - Load a YAML/TOML file from disk into a generic document (`loader.rs`).
//! - Check the document's shape (`schema.rs`) and convert it into a
//!   `ConfigFile` (`validate.rs`).

pub mod loader;
pub mod model;
pub mod schema;
pub mod validate;

pub use loader::{load_and_validate, load_document};
pub use model::{ConfigFile, Recipe};
pub use schema::{validate, SchemaError};
