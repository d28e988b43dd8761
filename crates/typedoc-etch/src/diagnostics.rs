//! Error types
//!
//! Rendering is deterministic, so every error here is fatal: either the
//! extractor produced something outside the grammar the renderer knows, or
//! the configuration is broken. Missing optional data (no comment, no
//! parameters, no return description) is never an error.

use serde::Serialize;
use thiserror::Error;

/// Result type for typedoc-etch operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Main error type for typedoc-etch
#[derive(Debug, Error)]
pub enum RenderError {
    /// Input that violates the declaration grammar
    #[error("Malformed input ({context}): {value}")]
    MalformedInput {
        /// What the renderer was doing
        context: String,
        /// The offending value, serialized as JSON
        value: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON input could not be parsed into declarations
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Layout collaborator failed
    #[error("Layout error: {0}")]
    Layout(String),
}

impl RenderError {
    /// Create a malformed-input error carrying the offending value
    pub fn malformed<T: Serialize + ?Sized>(context: impl Into<String>, value: &T) -> Self {
        let value = serde_json::to_string(value)
            .unwrap_or_else(|e| format!("<unserializable: {}>", e));
        RenderError::MalformedInput {
            context: context.into(),
            value,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        RenderError::Config(message.into())
    }

    /// Create a layout error
    pub fn layout(message: impl Into<String>) -> Self {
        RenderError::Layout(message.into())
    }
}
