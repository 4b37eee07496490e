//! Error types for kiln.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading declarations or component definitions.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid component definition {}: {source}", .path.display())]
    InvalidComponent {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors during placeholder resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(
        "Placeholder '{surface}' in {component} maps to both {previous} and {current}"
    )]
    PlaceholderCollision {
        component: String,
        surface: String,
        previous: String,
        current: String,
    },
}
