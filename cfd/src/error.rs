//! Error types for loading and presenting a registry dump

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur anywhere in the load → format → present pipeline
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("Registry file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read registry file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Required key missing from registry: {key}")]
    MissingKey { key: String },

    /// The interactive surface could not be set up; callers may fall back
    /// to the console
    #[error("Interactive display unavailable: {source}")]
    DisplayUnavailable {
        #[source]
        source: std::io::Error,
    },

    #[error("Display failed: {reason}")]
    Presentation {
        reason: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl DumpError {
    /// Wrap a display-surface I/O failure
    pub fn presentation(reason: impl Into<String>, source: std::io::Error) -> Self {
        Self::Presentation {
            reason: reason.into(),
            source: Some(source),
        }
    }
}
