//! Error handling for the shacl2code rendering pipeline.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Every failure aborts the current
//! render; nothing is retried.
//!
//! # Examples
//!
//! ```
//! use shacl2code::core::error::{Error, Result};
//!
//! fn lookup(id: &str) -> Result<()> {
//!     Err(Error::not_found("class", id))
//! }
//!
//! assert!(lookup("http://example.com/Missing").is_err());
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Result type for shacl2code operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for shacl2code operations
#[derive(Debug, Error)]
pub enum Error {
    /// The output destination or an input file could not be opened, read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON model parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML model parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The named template is absent from every directory of the search path
    #[error("Template '{name}' not found in search path [{}]", display_paths(.search_path))]
    TemplateNotFound {
        name: String,
        search_path: Vec<PathBuf>,
    },

    /// A template called `abort(message=...)`
    #[error("Template aborted: {0}")]
    TemplateAbort(String),

    /// An identifier did not resolve to an object of the model
    #[error("{kind} with ID {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// The `derived_ids` graph loops back on itself
    #[error("Derivation cycle detected at class {id}")]
    CycleDetected { id: String },

    /// Template parse or evaluation error
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new lookup error for an object of the given kind
    pub fn not_found<S: Into<String>>(kind: &'static str, id: S) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create a new template abort error
    pub fn abort<S: Into<String>>(msg: S) -> Self {
        Self::TemplateAbort(msg.into())
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
