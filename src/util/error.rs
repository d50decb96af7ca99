//! Error types for the ccbi library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ccbi operations.
///
/// Any decode error is fatal to the whole decode: the format has no
/// resynchronization markers, so there is no partial-tree recovery.
#[derive(Error, Debug)]
pub enum Error {
    /// File does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Invalid magic bytes at start of file
    #[error("Invalid ccbi file: expected 'ibcc' magic bytes")]
    BadMagic,

    /// Unsupported file format version
    #[error("Incompatible ccbi file version (file: {found}, reader: {supported})")]
    VersionMismatch { found: u64, supported: u64 },

    /// Stream is truncated or corrupted
    #[error("Unexpected end of stream at byte {0}")]
    UnexpectedEof(usize),

    /// String cache index out of range
    #[error("String cache index {index} out of range (count: {count})")]
    StringIndexOutOfRange { index: usize, count: usize },

    /// No builder registered for a decoded type name
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    /// Node graph nested deeper than the configured limit
    #[error("Node graph exceeds depth limit of {0}")]
    DepthLimitExceeded(usize),

    /// Invalid data structure in the stream
    #[error("Invalid stream structure: {0}")]
    InvalidStructure(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// Create an invalid structure error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }
}

/// Result type alias for ccbi operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::BadMagic;
        assert!(e.to_string().contains("magic"));

        let e = Error::StringIndexOutOfRange { index: 5, count: 3 };
        assert!(e.to_string().contains("5"));
        assert!(e.to_string().contains("3"));

        let e = Error::VersionMismatch { found: 9, supported: 2 };
        assert!(e.to_string().contains("9"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
