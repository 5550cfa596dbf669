use thiserror::Error;

// --- Standard Error Type ---
#[derive(Debug, Error)]
pub enum ImuError {
    /// Error originating from the underlying device communication
    #[error("Bus error: {0}")]
    Bus(String),
    /// A read was issued before `start_sensor` succeeded
    #[error("Sensor not initialized")]
    NotInitialized,
    /// The chip did not answer its identity check or refused to begin
    #[error("Connection test failed: {0}")]
    ConnectionFailed(String),
    /// Functionality not supported by this specific IMU implementation
    #[error("Not supported: {0}")]
    NotSupported(String),
    /// Error while building a device from its configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ImuError {
    /// Wraps a driver error, tagging it with the chip it came from.
    pub fn bus(chip: &str, err: impl std::fmt::Display) -> Self {
        ImuError::Bus(format!("{}: {}", chip, err))
    }
}
