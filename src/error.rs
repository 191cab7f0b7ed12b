//! Error types for conversion operations

use std::fmt;

/// Errors that can occur during HTML to Markdown conversion
///
/// Structural problems in the markup (unbalanced tags, mismatched end tags,
/// unknown elements) are never errors; the tree builder recovers from them
/// silently. The only failure modes are acquiring the input bytes and
/// decoding them to UTF-8.
#[derive(Debug)]
pub enum ConversionError {
    /// Reading the input stream failed
    ReadError(String),
    /// Character encoding error
    EncodingError(String),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::ReadError(msg) => write!(f, "Read error: {}", msg),
            ConversionError::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
        }
    }
}

impl std::error::Error for ConversionError {}
