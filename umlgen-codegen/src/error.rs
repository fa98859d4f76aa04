//! Error types for code generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Model parsing error.
    #[error("model parse error: {0}")]
    Parse(#[from] umlgen_model::ParseError),

    /// Model validation error.
    #[error("model error: {0}")]
    Model(#[from] umlgen_model::ModelError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output directory could not be created.
    #[error("failed to create directory '{}': {source}", path.display())]
    CreateDirectory {
        /// Directory path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Output file could not be written.
    #[error("failed to write file '{}': {source}", path.display())]
    WriteFile {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }
}
