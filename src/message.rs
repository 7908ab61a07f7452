//! Message model and the bincode primitives the codec strategies build on.
//!
//! Any type deriving [`Encode`] and [`Decode`] implements [`Message`] through a
//! blanket implementation. The trait exposes both the allocating helpers
//! ([`Message::to_bytes`]) and the caller-storage helpers
//! ([`Message::encode_into`], [`Message::from_bytes`]) used by the direct
//! strategies.
//!
//! Encoding uses [`WIRE_CONFIG`]. Decoding uses [`DECODE_CONFIG`], the same
//! layout with an allocation limit, so a corrupted length prefix fails to
//! parse instead of reserving an arbitrary amount of memory.

use bincode::{
    Decode,
    Encode,
    config::{self, Configuration, Limit, LittleEndian, Varint},
    decode_from_slice,
    enc::{EncoderImpl, write::SizeWriter},
    encode_into_slice,
    encode_to_vec,
    error::{DecodeError, EncodeError},
};

/// Wire configuration shared by every encode and decode path.
///
/// Little endian, varint integers.
pub const WIRE_CONFIG: Configuration = config::standard();

/// Upper bound on the bytes a single decode may reserve.
pub const MAX_DECODE_BYTES: usize = 1 << 20;

/// [`WIRE_CONFIG`] with a decode limit of [`MAX_DECODE_BYTES`].
///
/// bincode claims `len * size_of::<T>()` bytes against the limit before it
/// reserves a sequence, so an oversized length prefix is rejected with
/// [`DecodeError::LimitExceeded`].
pub const DECODE_CONFIG: Configuration<LittleEndian, Varint, Limit<MAX_DECODE_BYTES>> =
    config::standard().with_limit::<MAX_DECODE_BYTES>();

/// Largest [`SampleMessage`] cardinality that decodes under [`DECODE_CONFIG`].
///
/// The length prefix claims a `u64` and every element a `u32`.
pub const MAX_PAYLOAD_LEN: usize = (MAX_DECODE_BYTES - size_of::<u64>()) / size_of::<u32>();

/// Wrapper trait for message types with a deterministic binary encoding.
pub trait Message: Encode + Decode<()> {
    /// Serialize the message into a freshly allocated byte vector.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`] if serialization fails.
    fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> { encode_to_vec(self, WIRE_CONFIG) }

    /// Serialize the message into `dst`, returning the number of bytes written.
    ///
    /// Bytes past the returned length are left untouched. On failure `dst`
    /// may hold a partial encoding.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::UnexpectedEnd`] if `dst` is too small.
    fn encode_into(&self, dst: &mut [u8]) -> Result<usize, EncodeError> {
        encode_into_slice(self, dst, WIRE_CONFIG)
    }

    /// Deserialize a message straight from a borrowed slice, returning the
    /// message and the number of bytes consumed.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the bytes are not a valid encoding or
    /// would reserve more than [`MAX_DECODE_BYTES`].
    fn from_bytes(bytes: &[u8]) -> Result<(Self, usize), DecodeError>
    where
        Self: Sized,
    {
        decode_from_slice(bytes, DECODE_CONFIG)
    }

    /// Deserialize a message that must occupy all of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the bytes are not a valid encoding or if
    /// any byte is left over after the message.
    fn from_exact_bytes(bytes: &[u8]) -> Result<Self, DecodeError>
    where
        Self: Sized,
    {
        let (message, consumed) = Self::from_bytes(bytes)?;
        if consumed != bytes.len() {
            return Err(DecodeError::OtherString(format!(
                "{} trailing bytes after a {consumed}-byte message",
                bytes.len() - consumed
            )));
        }
        Ok(message)
    }

    /// Number of bytes [`Message::encode_into`] will write.
    ///
    /// Computed by encoding into a counting writer; nothing is allocated.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`] if the value cannot be encoded.
    fn encoded_len(&self) -> Result<usize, EncodeError> {
        let mut encoder = EncoderImpl::new(SizeWriter::default(), WIRE_CONFIG);
        Encode::encode(self, &mut encoder)?;
        Ok(encoder.into_writer().bytes_written)
    }
}

impl<T> Message for T where T: Encode + Decode<()> {}

/// The benchmarked message: one ordered sequence of integers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Encode, Decode)]
pub struct SampleMessage {
    values: Vec<u32>,
}

impl SampleMessage {
    /// Wrap an existing sequence.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self { Self { values } }

    /// Build the sequence `0, 1, ..., len - 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use buffer_reuse::SampleMessage;
    ///
    /// let message = SampleMessage::sequential(3);
    /// assert_eq!(message.values(), &[0, 1, 2]);
    /// ```
    #[must_use]
    pub fn sequential(len: usize) -> Self { Self::new((0_u32..).take(len).collect()) }

    /// The integer payload.
    #[must_use]
    pub fn values(&self) -> &[u32] { &self.values }

    /// Number of elements in the payload.
    #[must_use]
    pub fn len(&self) -> usize { self.values.len() }

    /// Returns true when the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}
