//! Error types for sortscope.
//!
//! The core has a single runtime failure, an unknown algorithm id passed to
//! trace generation. Everything else here belongs to the outer layers
//! (configuration loading, CLI, playback gating).

use thiserror::Error;

/// Result type alias for sortscope operations.
pub type SortResult<T> = Result<T, SortError>;

/// Unified error type for all sortscope operations.
#[derive(Debug, Error)]
pub enum SortError {
    // ===== Core =====
    /// Algorithm identifier is not one of the known variants.
    #[error("unknown algorithm '{id}' (expected one of: bubble, selection, insertion)")]
    UnknownAlgorithm {
        /// The identifier that failed to resolve.
        id: String,
    },

    /// A playback session is already running on this player.
    #[error("playback session {session} is still running")]
    SessionActive {
        /// Identifier of the running session.
        session: u64,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SortError {
    /// Create an unknown-algorithm error.
    #[must_use]
    pub fn unknown_algorithm(id: impl Into<String>) -> Self {
        Self::UnknownAlgorithm { id: id.into() }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Whether the error came from bad user input rather than the environment.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownAlgorithm { .. }
                | Self::Config { .. }
                | Self::YamlParse(_)
                | Self::Validation(_)
        )
    }
}

impl From<serde_json::Error> for SortError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
