//! Thread-scoped allocation measurement.
//!
//! Rust exposes no per-thread allocated-bytes counter, so the crate provides
//! one: [`CountingAllocator`] forwards to the system allocator and adds every
//! requested size to a thread-local total. A binary (or test binary) opts in
//! by installing it:
//!
//! ```ignore
//! #[global_allocator]
//! static GLOBAL: buffer_reuse::CountingAllocator = buffer_reuse::CountingAllocator;
//! ```
//!
//! [`ThreadAllocationProbe::new`] refuses to start when the allocator is not
//! installed, rather than reporting zero for every batch.

use std::hint::black_box;

use thiserror::Error;

pub mod allocator;

pub use allocator::CountingAllocator;

/// Cumulative bytes allocated by one thread since it started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AllocatedBytes(u64);

impl AllocatedBytes {
    /// Wrap a raw counter value.
    #[must_use]
    pub const fn new(bytes: u64) -> Self { Self(bytes) }

    /// The raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}

/// Failures of the measurement apparatus itself.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MeasurementAnomaly {
    /// The counter went backwards between two snapshots.
    #[error("allocation counter went backwards: before={before}, after={after}")]
    NegativeDelta {
        /// Snapshot taken first.
        before: u64,
        /// Snapshot taken second.
        after: u64,
    },

    /// The thread allocation counter is not being maintained.
    #[error(
        "thread allocation counting unavailable: CountingAllocator is not the global allocator"
    )]
    ProbeUnavailable,
}

/// Source of thread-scoped allocation snapshots.
pub trait AllocationProbe {
    /// Bytes allocated by the calling thread so far.
    fn snapshot(&self) -> AllocatedBytes;
}

/// Bytes allocated between two snapshots.
///
/// # Errors
///
/// Returns [`MeasurementAnomaly::NegativeDelta`] when `after < before`. The
/// result is never clamped to zero.
///
/// # Examples
///
/// ```
/// use buffer_reuse::probe::{AllocatedBytes, delta};
///
/// let bytes = delta(AllocatedBytes::new(100), AllocatedBytes::new(164)).unwrap();
/// assert_eq!(bytes, 64);
/// assert!(delta(AllocatedBytes::new(10), AllocatedBytes::new(5)).is_err());
/// ```
pub fn delta(before: AllocatedBytes, after: AllocatedBytes) -> Result<u64, MeasurementAnomaly> {
    after
        .get()
        .checked_sub(before.get())
        .ok_or(MeasurementAnomaly::NegativeDelta {
            before: before.get(),
            after: after.get(),
        })
}

/// Probe backed by [`CountingAllocator`]'s thread-local counter.
#[derive(Debug)]
pub struct ThreadAllocationProbe {
    _private: (),
}

impl ThreadAllocationProbe {
    const SELF_TEST_BYTES: usize = 64;

    /// Verify the counter is live and return a probe.
    ///
    /// A throwaway allocation is made; if the counter does not move,
    /// [`CountingAllocator`] is not installed.
    ///
    /// # Errors
    ///
    /// Returns [`MeasurementAnomaly::ProbeUnavailable`] when the counter is not
    /// maintained.
    pub fn new() -> Result<Self, MeasurementAnomaly> {
        let before = allocator::thread_allocated();
        drop(black_box(vec![0_u8; Self::SELF_TEST_BYTES]));
        let after = allocator::thread_allocated();
        if after.wrapping_sub(before) == 0 {
            return Err(MeasurementAnomaly::ProbeUnavailable);
        }
        Ok(Self { _private: () })
    }
}

impl AllocationProbe for ThreadAllocationProbe {
    fn snapshot(&self) -> AllocatedBytes { AllocatedBytes::new(allocator::thread_allocated()) }
}
