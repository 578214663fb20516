//! Error types for levelkv
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using LsmError
pub type Result<T> = std::result::Result<T, LsmError>;

/// Unified error type for levelkv operations
#[derive(Debug, Error)]
pub enum LsmError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    /// Opening, reading, writing, syncing or renaming a level file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Value Errors
    // -------------------------------------------------------------------------
    /// The value does not fit in a fixed-width value slot (one byte is
    /// reserved for the NUL terminator).
    #[error("Value too long: {len} bytes, at most {max} allowed")]
    ValueTooLong { len: usize, max: usize },

    /// NUL terminates a stored value, so it cannot appear inside one.
    #[error("Value contains a NUL byte at position {position}")]
    ValueContainsNul { position: usize },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
