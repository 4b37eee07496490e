//! Error types for code generation.

use kiln_core::{ParseError, ResolveError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during a generation run.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Declaration file or component definition could not be read.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Placeholder resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// An output file could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
