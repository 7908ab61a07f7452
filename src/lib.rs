#![doc(html_root_url = "https://docs.rs/buffer-reuse/latest")]
//! Public API for the `buffer-reuse` library.
//!
//! This crate measures what encoding and decoding one fixed-shape message
//! costs in allocated bytes, comparing a path that allocates an intermediate
//! buffer on every call with a path that works directly on one reused,
//! fixed-capacity buffer.

pub mod codec;
pub mod config;
pub mod error;
pub mod harness;
pub mod message;
pub mod probe;

pub use codec::{
    CodecContext,
    CodecError,
    EncodeTarget,
    Strategy,
    decode_copying,
    decode_direct,
    encode_copying,
    encode_direct,
};
pub use config::{BenchConfig, ConfigError};
pub use error::{BenchError, Result};
pub use harness::{BatchReport, Harness};
pub use message::{Message, SampleMessage};
pub use probe::{
    AllocatedBytes,
    AllocationProbe,
    CountingAllocator,
    MeasurementAnomaly,
    ThreadAllocationProbe,
};
