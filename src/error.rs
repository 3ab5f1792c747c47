//! # Error Types
//!
//! Custom error types for the SCD30 driver using `thiserror`.

use thiserror::Error;

/// Main error type for the SCD30 driver
#[derive(Debug, Error)]
pub enum Scd30Error {
    /// A setter argument is outside its sensor-defined domain.
    /// No bus transaction was attempted.
    #[error("validation error: {0}")]
    Validation(String),

    /// The bus reported a failed write or transaction completion
    #[error("bus transport error: {0}")]
    Transport(String),

    /// Fewer bytes were available than the protocol requires
    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    /// A received word's CRC-8 does not match the locally computed one
    #[error("CRC mismatch: expected 0x{expected:02X}, got 0x{received:02X}")]
    CrcMismatch { expected: u8, received: u8 },

    /// A boolean-valued register decoded to something other than 0 or 1
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// Settings file errors
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the SCD30 driver
pub type Result<T> = std::result::Result<T, Scd30Error>;
