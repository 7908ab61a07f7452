//! Encode and decode strategies over a fixed-capacity byte region.
//!
//! Two pairs of operations write the shared [`SampleMessage`] into an
//! [`EncodeTarget`] and read it back:
//!
//! - the *copying* pair ([`encode_copying`], [`decode_copying`]) goes through an
//!   owned intermediate [`Bytes`] on every call;
//! - the *direct* pair ([`encode_direct`], [`decode_direct`]) works on the
//!   target's storage in place.
//!
//! Both pairs produce identical bytes and equal messages. Only their
//! allocation profile differs.
//!
//! [`SampleMessage`]: crate::message::SampleMessage

use bytes::Bytes;

use crate::message::{Message, SampleMessage};

pub mod context;
pub mod error;
pub mod strategy;
pub mod target;

pub use context::CodecContext;
pub use error::CodecError;
pub use strategy::{Strategy, StrategyFn, check_decoded_len};
pub use target::EncodeTarget;

/// Encode through a freshly allocated intermediate, then copy it into the
/// target.
///
/// Returns the number of bytes now held by the target.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails and
/// [`CodecError::EncodingCapacity`] if the target is too small.
pub fn encode_copying(ctx: &mut CodecContext) -> Result<usize, CodecError> {
    let intermediate = Bytes::from(ctx.message().to_bytes().map_err(CodecError::Encode)?);
    ctx.target_mut().copy_from(&intermediate)?;
    Ok(intermediate.len())
}

/// Encode straight into the target's storage.
///
/// # Errors
///
/// Returns [`CodecError::EncodingCapacity`] if the target cannot hold the
/// encoding. The target then reports no filled bytes.
pub fn encode_direct(ctx: &mut CodecContext) -> Result<usize, CodecError> {
    let required = ctx.serialized_size();
    let (message, target) = ctx.split_mut();
    target.encode(message, required)
}

/// Copy the target's unread bytes into an owned intermediate, rewind the
/// target's read cursor, then decode from the intermediate.
///
/// # Errors
///
/// Returns [`CodecError::DecodingFormat`] if the unread bytes are not exactly
/// one valid encoding.
pub fn decode_copying(ctx: &mut CodecContext) -> Result<SampleMessage, CodecError> {
    let target = ctx.target_mut();
    let intermediate = Bytes::copy_from_slice(target.remaining());
    target.consume();
    target.rewind();
    Ok(SampleMessage::from_exact_bytes(&intermediate)?)
}

/// Decode from the first `serialized_size` bytes of the target's storage
/// without copying them out.
///
/// # Errors
///
/// Returns [`CodecError::DecodingFormat`] if those bytes are not exactly one
/// valid encoding, or if the storage is shorter than `serialized_size`.
pub fn decode_direct(ctx: &CodecContext) -> Result<SampleMessage, CodecError> {
    let bytes = ctx.target().prefix(ctx.serialized_size())?;
    Ok(SampleMessage::from_exact_bytes(bytes)?)
}

#[cfg(test)]
mod tests;
