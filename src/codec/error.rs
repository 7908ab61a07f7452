//! Error types for the codec strategies.
//!
//! - [`CodecError::EncodingCapacity`]: the encode target is smaller than the
//!   message's encoded size.
//! - [`CodecError::Encode`]: bincode refused to encode the value.
//! - [`CodecError::DecodingFormat`]: the bytes in the shared region are not a
//!   valid encoding (malformed or truncated).
//!
//! All of them are fatal to the benchmark run. Converting into
//! [`io::Error`] maps capacity failures to [`io::ErrorKind::WriteZero`] and
//! format failures to [`io::ErrorKind::InvalidData`].

use std::io;

use bincode::error::{DecodeError, EncodeError};
use thiserror::Error;

/// Failures raised by the encode and decode strategies.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The encode target cannot hold the encoding.
    #[error("encoding needs {required} bytes but the target holds only {capacity}")]
    EncodingCapacity {
        /// Encoded size of the message.
        required: usize,
        /// Capacity of the encode target.
        capacity: usize,
    },

    /// Serialization failed for a reason other than capacity.
    #[error("encode failed: {0}")]
    Encode(#[source] EncodeError),

    /// The shared region does not hold a valid encoding.
    #[error("decode failed: {0}")]
    DecodingFormat(#[from] DecodeError),
}

impl CodecError {
    /// Returns true if the target was too small for the encoding.
    #[must_use]
    pub fn is_capacity(&self) -> bool { matches!(self, Self::EncodingCapacity { .. }) }

    /// Returns true if the shared region failed to parse.
    #[must_use]
    pub fn is_decoding_format(&self) -> bool { matches!(self, Self::DecodingFormat(_)) }

    /// Returns the error category as a string for logging.
    ///
    /// One of: `"capacity"`, `"encode"`, or `"format"`.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::EncodingCapacity { .. } => "capacity",
            Self::Encode(_) => "encode",
            Self::DecodingFormat(_) => "format",
        }
    }
}

impl From<CodecError> for io::Error {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::EncodingCapacity { .. } => io::Error::new(io::ErrorKind::WriteZero, err),
            CodecError::Encode(_) => io::Error::other(err),
            CodecError::DecodingFormat(_) => io::Error::new(io::ErrorKind::InvalidData, err),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
