//! Shared state for the codec strategies.

use crate::{
    codec::{CodecError, EncodeTarget},
    message::{Message, SampleMessage},
};

/// The message, the encode target and the cached encoded size.
///
/// Built once at startup and handed by reference to every strategy call. The
/// message is never mutated after construction; the target is rewritten on
/// every encode.
#[derive(Debug)]
pub struct CodecContext {
    message: SampleMessage,
    target: EncodeTarget,
    serialized_size: usize,
}

impl CodecContext {
    /// Compute the message's encoded size and allocate a target of
    /// `capacity` bytes.
    ///
    /// The capacity is not checked against the encoded size; an undersized
    /// target surfaces as [`CodecError::EncodingCapacity`] on the first encode.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`] if the encoded size cannot be computed.
    pub fn new(message: SampleMessage, capacity: usize) -> Result<Self, CodecError> {
        let serialized_size = message.encoded_len().map_err(CodecError::Encode)?;
        Ok(Self {
            message,
            target: EncodeTarget::new(capacity),
            serialized_size,
        })
    }

    /// The message every strategy encodes.
    #[must_use]
    pub fn message(&self) -> &SampleMessage { &self.message }

    /// Encoded size of [`CodecContext::message`], computed once.
    #[must_use]
    pub fn serialized_size(&self) -> usize { self.serialized_size }

    /// Element count every decode is expected to produce.
    #[must_use]
    pub fn expected_len(&self) -> usize { self.message.len() }

    /// The shared byte region.
    #[must_use]
    pub fn target(&self) -> &EncodeTarget { &self.target }

    /// Mutable access to the shared byte region.
    pub fn target_mut(&mut self) -> &mut EncodeTarget { &mut self.target }

    pub(crate) fn split_mut(&mut self) -> (&SampleMessage, &mut EncodeTarget) {
        (&self.message, &mut self.target)
    }
}
