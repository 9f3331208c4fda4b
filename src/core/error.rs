//! Error types for the logging facade

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Configuration failed shape validation
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// No constructor registered under the requested driver name
    #[error("logger driver {0:?} not found")]
    DriverNotFound(String),

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Driver-specific failure, passed through untouched
    #[error(transparent)]
    Driver(Box<dyn std::error::Error + Send + Sync>),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        LoggerError::InvalidConfig(reason.into())
    }

    /// Create a driver lookup miss
    pub fn driver_not_found(name: impl Into<String>) -> Self {
        LoggerError::DriverNotFound(name.into())
    }

    /// Wrap an error raised by a driver constructor or backend
    pub fn driver<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        LoggerError::Driver(err.into())
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }
}
