//! Benchmark binary comparing copying and buffer-reusing codec strategies.
//!
//! Installs [`CountingAllocator`] so allocations on the main thread are
//! counted, builds the sample message once, primes the buffer, then reports
//! allocated mebibytes per batch for each strategy on stdout.

mod cli;

use std::{io, process::ExitCode};

use buffer_reuse::{
    BenchConfig,
    CodecContext,
    CountingAllocator,
    Harness,
    SampleMessage,
    Strategy,
    ThreadAllocationProbe,
};
use clap::Parser;

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn config_from_cli(cli: &cli::Cli) -> BenchConfig {
    BenchConfig::default()
        .buffer_capacity(cli.buffer_capacity)
        .payload_len(cli.payload_len)
        .iterations(cli.iterations)
        .repeats(cli.repeats)
}

fn run(config: &BenchConfig) -> buffer_reuse::Result<()> {
    config.validate()?;
    let probe = ThreadAllocationProbe::new()?;

    let message = SampleMessage::sequential(config.payload_len);
    let mut ctx = CodecContext::new(message, config.buffer_capacity)?;
    tracing::info!(
        payload_len = config.payload_len,
        serialized_size = ctx.serialized_size(),
        buffer_capacity = config.buffer_capacity,
        "sample message prepared"
    );

    // Leaves a valid encoding in the buffer for the decode strategies.
    Strategy::EncodeDirect.run(&mut ctx)?;
    Strategy::DecodeDirect.run(&mut ctx)?;

    let harness = Harness::new(probe);
    let mut stdout = io::stdout().lock();
    harness.run_all(&mut ctx, config, &mut stdout)?;
    Ok(())
}

fn main() -> ExitCode {
    // Report lines go to stdout; diagnostics go to stderr.
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = cli::Cli::parse();
    let config = config_from_cli(&cli);
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "benchmark aborted");
            ExitCode::FAILURE
        }
    }
}
