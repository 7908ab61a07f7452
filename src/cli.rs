//! Command line interface for the `buffer-reuse` binary.
//!
//! Every option defaults to the reference run: a 2048 byte buffer, a 512
//! element message, 100 000 iterations per batch and 4 batches per strategy.

use clap::Parser;

/// Command line arguments for the `buffer-reuse` binary.
#[derive(Debug, Parser)]
#[command(
    name = "buffer-reuse",
    version,
    about = "Compare allocation of copying and buffer-reusing encode/decode paths"
)]
pub struct Cli {
    /// Size of the reused encode buffer in bytes.
    #[arg(long, default_value_t = 2048)]
    pub buffer_capacity: usize,

    /// Number of integers in the sample message.
    #[arg(long, default_value_t = 512)]
    pub payload_len: usize,

    /// Strategy invocations per measured batch.
    #[arg(short, long, default_value_t = 100_000)]
    pub iterations: u64,

    /// Batches run per strategy.
    #[arg(short, long, default_value_t = 4)]
    pub repeats: u32,
}
