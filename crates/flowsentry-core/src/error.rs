//! Error types for FlowSentry

/// Result type alias using FlowSentry's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for FlowSentry operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The classifier port could not produce a label/confidence for a record
    #[error("classifier error: {0}")]
    Classifier(String),

    /// The alert sink could not accept an alert
    #[error("sink error: {0}")]
    Sink(String),

    /// Record source errors other than normal exhaustion
    #[error("source error: {0}")]
    Source(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new sink error
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }

    /// Create a new source error
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
