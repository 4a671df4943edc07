//! boot_info error types

use thiserror::Error;

/// The main error type for boot_info operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading an image or reference table
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A fixed-size record needs more bytes than the image holds
    #[error("truncated image: need {expected} bytes at offset 0x{offset:X}, {available} available")]
    TruncatedImage {
        offset: u64,
        expected: usize,
        available: u64,
    },

    /// A probe read would run past the end of the image
    #[error("read out of bounds: need {needed} bytes at offset 0x{offset:X}, {available} available")]
    OutOfBounds {
        offset: u64,
        needed: usize,
        available: u64,
    },

    /// The reference table has fewer records than the caller requires
    #[error("reference table underflow: expected {expected} records, found {found}")]
    TableUnderflow { expected: usize, found: usize },

    /// A reference table line could not be parsed
    #[error("invalid reference table record at line {line}: {reason}")]
    InvalidTableRecord { line: usize, reason: String },
}

/// Result type alias for boot_info operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a truncated image error
    pub fn truncated(offset: u64, expected: usize, available: u64) -> Self {
        Error::TruncatedImage {
            offset,
            expected,
            available,
        }
    }

    /// Create an out of bounds error
    pub fn out_of_bounds(offset: u64, needed: usize, available: u64) -> Self {
        Error::OutOfBounds {
            offset,
            needed,
            available,
        }
    }

    /// Create an invalid reference table record error
    pub fn invalid_record(line: usize, reason: impl Into<String>) -> Self {
        Error::InvalidTableRecord {
            line,
            reason: reason.into(),
        }
    }
}
