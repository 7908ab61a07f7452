//! The four interchangeable strategies driven by the harness.

use std::hint::black_box;

use log::warn;

use super::{CodecContext, CodecError, decode_copying, decode_direct, encode_copying, encode_direct};

/// Signature shared by every strategy operation.
pub type StrategyFn = fn(&mut CodecContext) -> Result<(), CodecError>;

/// Encode/decode strategy selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Encode through an owned intermediate, then copy into the target.
    EncodeCopying,
    /// Copy the target out into an owned intermediate, then decode.
    DecodeCopying,
    /// Encode straight into the target.
    EncodeDirect,
    /// Decode straight from the target.
    DecodeDirect,
}

impl Strategy {
    /// Fixed run order, so batches line up across runs.
    pub const ORDER: [Self; 4] = [
        Self::EncodeCopying,
        Self::DecodeCopying,
        Self::EncodeDirect,
        Self::DecodeDirect,
    ];

    /// Human-readable label used in the report lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EncodeCopying => "Serialization (no reuse)",
            Self::DecodeCopying => "Deserialization (no reuse)",
            Self::EncodeDirect => "Serialization (reuse)",
            Self::DecodeDirect => "Deserialization (reuse)",
        }
    }

    /// Returns true for the two decode strategies.
    #[must_use]
    pub const fn is_decode(self) -> bool {
        matches!(self, Self::DecodeCopying | Self::DecodeDirect)
    }

    /// The operation as a plain function pointer.
    #[must_use]
    pub fn operation(self) -> StrategyFn {
        match self {
            Self::EncodeCopying => run_encode_copying,
            Self::DecodeCopying => run_decode_copying,
            Self::EncodeDirect => run_encode_direct,
            Self::DecodeDirect => run_decode_direct,
        }
    }

    /// Invoke the strategy once.
    ///
    /// # Errors
    ///
    /// Propagates the [`CodecError`] raised by the underlying operation.
    pub fn run(self, ctx: &mut CodecContext) -> Result<(), CodecError> { (self.operation())(ctx) }
}

fn run_encode_copying(ctx: &mut CodecContext) -> Result<(), CodecError> {
    black_box(encode_copying(ctx)?);
    Ok(())
}

fn run_encode_direct(ctx: &mut CodecContext) -> Result<(), CodecError> {
    black_box(encode_direct(ctx)?);
    Ok(())
}

fn run_decode_copying(ctx: &mut CodecContext) -> Result<(), CodecError> {
    let decoded = decode_copying(ctx)?;
    check_decoded_len(decoded.len(), ctx.expected_len());
    Ok(())
}

fn run_decode_direct(ctx: &mut CodecContext) -> Result<(), CodecError> {
    let decoded = decode_direct(ctx)?;
    check_decoded_len(decoded.len(), ctx.expected_len());
    Ok(())
}

/// Compare a decoded element count with the expected one, logging a warning
/// on mismatch.
///
/// The comparison consumes the decode result so the optimizer cannot drop the
/// decode call. A mismatch is not treated as a failure.
pub fn check_decoded_len(actual: usize, expected: usize) -> bool {
    let matches = black_box(actual) == expected;
    if !matches {
        warn!("decoded element count mismatch: expected={expected}, actual={actual}");
    }
    matches
}
