//! Error types for the monitoring integration.

use thiserror::Error;

/// Result type for monitoring operations.
pub type MonitoringResult<T> = Result<T, MonitoringError>;

/// Main error type for the monitoring integration.
#[derive(Debug, Error)]
pub enum MonitoringError {
    /// Configuration error (bad agent address, empty host, invalid option).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport error while sending a datagram to the agent.
    ///
    /// The underlying io error is returned to the caller unmodified; no
    /// retry or suppression happens at this layer.
    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// Serialization error while formatting a log record.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MonitoringError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        MonitoringError::Configuration(message.into())
    }
}
