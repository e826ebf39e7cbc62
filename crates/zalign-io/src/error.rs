//! Error types for structure file I/O

use thiserror::Error;

/// Errors that can occur while reading or writing structure files
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error with location information
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// Line number where the error occurred (1-based, 0 if unknown)
        line: usize,
        /// Error message
        message: String,
    },

    /// File suffix (or content) does not name a supported format
    #[error("Unsupported file format: {0}")]
    UnsupportedExtension(String),

    /// File is empty or contains no atoms
    #[error("Empty file or no atoms found")]
    EmptyFile,

    /// Gzip stream could not be decoded
    #[error("Decompression error: {0}")]
    Decompression(String),
}

impl IoError {
    /// Create a parse error at a specific line
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        IoError::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create an unsupported-format error for a path or description
    pub fn unsupported(what: impl Into<String>) -> Self {
        IoError::UnsupportedExtension(what.into())
    }
}

/// Result type for structure file I/O operations
pub type IoResult<T> = Result<T, IoError>;
