//! Benchmark run configuration.

use thiserror::Error;

use crate::message::MAX_PAYLOAD_LEN;

/// Parameters of one benchmark run.
///
/// # Examples
///
/// ```
/// use buffer_reuse::BenchConfig;
///
/// let config = BenchConfig::default().iterations(1_000).repeats(2);
///
/// assert_eq!(config.buffer_capacity, 2048);
/// assert_eq!(config.iterations, 1_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    /// Size of the encode target in bytes.
    ///
    /// Not checked against the encoded message size; the default leaves
    /// slack, as an MTU-sized buffer would.
    ///
    /// Default: 2048.
    pub buffer_capacity: usize,

    /// Number of integers in the sample message, at most
    /// [`MAX_PAYLOAD_LEN`].
    ///
    /// Default: 512.
    pub payload_len: usize,

    /// Strategy invocations per measured batch.
    ///
    /// Default: 100 000.
    pub iterations: u64,

    /// Batches run per strategy.
    ///
    /// Default: 4.
    pub repeats: u32,
}

impl BenchConfig {
    /// Default encode target size.
    pub const DEFAULT_BUFFER_CAPACITY: usize = 2048;
    /// Default message cardinality.
    pub const DEFAULT_PAYLOAD_LEN: usize = 512;
    /// Default invocations per batch.
    pub const DEFAULT_ITERATIONS: u64 = 100_000;
    /// Default batches per strategy.
    pub const DEFAULT_REPEATS: u32 = 4;

    /// Set the encode target size.
    #[must_use]
    pub fn buffer_capacity(mut self, bytes: usize) -> Self {
        self.buffer_capacity = bytes;
        self
    }

    /// Set the message cardinality.
    #[must_use]
    pub fn payload_len(mut self, len: usize) -> Self {
        self.payload_len = len;
        self
    }

    /// Set the invocations per batch.
    #[must_use]
    pub fn iterations(mut self, count: u64) -> Self {
        self.iterations = count;
        self
    }

    /// Set the batches per strategy.
    #[must_use]
    pub fn repeats(mut self, count: u32) -> Self {
        self.repeats = count;
        self
    }

    /// Reject configurations that cannot produce a meaningful report.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.payload_len > MAX_PAYLOAD_LEN {
            return Err(ConfigError::PayloadTooLarge {
                len: self.payload_len,
                max: MAX_PAYLOAD_LEN,
            });
        }
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.repeats == 0 {
            return Err(ConfigError::ZeroRepeats);
        }
        Ok(())
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: Self::DEFAULT_BUFFER_CAPACITY,
            payload_len: Self::DEFAULT_PAYLOAD_LEN,
            iterations: Self::DEFAULT_ITERATIONS,
            repeats: Self::DEFAULT_REPEATS,
        }
    }
}

/// Invalid [`BenchConfig`] values.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The encode target would have no storage.
    #[error("buffer capacity must be non-zero")]
    ZeroCapacity,
    /// The message could not be decoded back within the decode limit.
    #[error("payload length {len} exceeds the decodable maximum of {max}")]
    PayloadTooLarge {
        /// Requested cardinality.
        len: usize,
        /// Largest decodable cardinality.
        max: usize,
    },
    /// Batches would measure nothing.
    #[error("iterations per batch must be non-zero")]
    ZeroIterations,
    /// No batches would run.
    #[error("repeats must be non-zero")]
    ZeroRepeats,
}
