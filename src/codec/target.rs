//! Fixed-capacity encode target.

use bincode::error::{DecodeError, EncodeError};

use crate::{codec::CodecError, message::Message};

/// Caller-owned byte region reused across every strategy invocation.
///
/// The storage is allocated once and never resized. `filled` marks how many
/// leading bytes hold the current encoding; it is reset to zero before every
/// write and only advanced once a write has fully succeeded. `read` is the
/// cursor of the copying decode path and never passes `filled`.
#[derive(Debug)]
pub struct EncodeTarget {
    storage: Box<[u8]>,
    filled: usize,
    read: usize,
}

impl EncodeTarget {
    /// Allocate a zeroed target of `capacity` bytes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: vec![0_u8; capacity].into_boxed_slice(),
            filled: 0,
            read: 0,
        }
    }

    /// Total size of the storage.
    #[must_use]
    pub fn capacity(&self) -> usize { self.storage.len() }

    /// Bytes written by the last successful encode.
    #[must_use]
    pub fn filled(&self) -> &[u8] { &self.storage[..self.filled] }

    /// Filled bytes not yet consumed by the read cursor.
    #[must_use]
    pub fn remaining(&self) -> &[u8] { &self.storage[self.read..self.filled] }

    /// Move the read cursor past every filled byte.
    pub fn consume(&mut self) { self.read = self.filled; }

    /// Move the read cursor back to the start of the filled region.
    pub fn rewind(&mut self) { self.read = 0; }

    /// Drop the current encoding. The storage itself is left untouched.
    pub fn clear(&mut self) {
        self.filled = 0;
        self.read = 0;
    }

    /// Shrink the filled region to at most `len` bytes.
    #[cfg(test)]
    pub(crate) fn truncate(&mut self, len: usize) {
        self.filled = self.filled.min(len);
        self.read = self.read.min(self.filled);
    }

    /// Full backing storage, including bytes past the filled region.
    #[must_use]
    pub fn storage(&self) -> &[u8] { &self.storage }

    /// Mutable access to the full backing storage.
    #[cfg(test)]
    pub(crate) fn storage_mut(&mut self) -> &mut [u8] { &mut self.storage }

    /// The first `len` bytes of the storage, whatever `filled` says.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::DecodingFormat`] when `len` exceeds the capacity,
    /// since a decode over that range would run off the end of the region.
    pub fn prefix(&self, len: usize) -> Result<&[u8], CodecError> {
        self.storage.get(..len).ok_or_else(|| {
            CodecError::DecodingFormat(DecodeError::UnexpectedEnd {
                additional: len - self.storage.len(),
            })
        })
    }

    /// Copy an already encoded message into the start of the storage.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EncodingCapacity`] if `bytes` does not fit.
    pub fn copy_from(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        self.clear();
        let capacity = self.storage.len();
        let dst = self
            .storage
            .get_mut(..bytes.len())
            .ok_or(CodecError::EncodingCapacity {
                required: bytes.len(),
                capacity,
            })?;
        dst.copy_from_slice(bytes);
        self.filled = bytes.len();
        Ok(())
    }

    /// Encode `message` in place. `required` is its precomputed encoded size.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EncodingCapacity`] if `required` exceeds the
    /// capacity or the encoder runs out of room; the filled region stays empty.
    pub fn encode<M: Message>(
        &mut self,
        message: &M,
        required: usize,
    ) -> Result<usize, CodecError> {
        self.clear();
        let capacity = self.storage.len();
        if required > capacity {
            return Err(CodecError::EncodingCapacity { required, capacity });
        }
        let written = message
            .encode_into(&mut self.storage)
            .map_err(|err| match err {
                EncodeError::UnexpectedEnd => CodecError::EncodingCapacity { required, capacity },
                other => CodecError::Encode(other),
            })?;
        self.filled = written;
        Ok(written)
    }
}
