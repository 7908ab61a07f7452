//! Allocation-measuring benchmark harness.
//!
//! A *batch* runs one strategy `iterations` times on the calling thread,
//! bracketed by two probe snapshots. [`Harness::run_repeated`] repeats the
//! batch and writes one `"<label>: <N> MB"` line per batch;
//! [`Harness::run_all`] does so for every strategy in [`Strategy::ORDER`].
//!
//! Any codec error or measurement anomaly aborts the run. Nothing is retried.

use std::io::Write;

use log::debug;

use crate::{
    codec::{CodecContext, CodecError, Strategy},
    config::BenchConfig,
    error::Result,
    probe::{AllocationProbe, delta},
};

const BYTES_PER_MEBIBYTE: f64 = 1024.0 * 1024.0;

/// Allocation measured for one batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchReport {
    /// Label of the strategy that ran.
    pub label: String,
    /// Zero-based batch index within the repetition.
    pub batch: u32,
    /// Bytes allocated while the batch ran.
    pub bytes: u64,
}

impl BatchReport {
    /// Allocated bytes in mebibytes, rounded to the nearest integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use buffer_reuse::BatchReport;
    ///
    /// let report = BatchReport {
    ///     label: "demo".into(),
    ///     batch: 0,
    ///     bytes: 3 * 1024 * 1024 / 2,
    /// };
    /// assert_eq!(report.mebibytes(), 2);
    /// ```
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Report granularity is whole mebibytes; the rounded value is non-negative."
    )]
    pub fn mebibytes(&self) -> u64 { (self.bytes as f64 / BYTES_PER_MEBIBYTE).round() as u64 }
}

/// Drives strategies against a [`CodecContext`] and measures allocation with
/// a probe.
#[derive(Debug)]
pub struct Harness<P> {
    probe: P,
}

impl<P: AllocationProbe> Harness<P> {
    /// Wrap a probe.
    #[must_use]
    pub fn new(probe: P) -> Self { Self { probe } }

    /// Run `strategy` exactly `iterations` times and return the bytes
    /// allocated meanwhile.
    ///
    /// # Errors
    ///
    /// Returns the first [`CodecError`] raised by `strategy`, or a
    /// [`MeasurementAnomaly`](crate::probe::MeasurementAnomaly) if the probe
    /// went backwards.
    pub fn run_batch<F>(
        &self,
        ctx: &mut CodecContext,
        mut strategy: F,
        iterations: u64,
    ) -> Result<u64>
    where
        F: FnMut(&mut CodecContext) -> std::result::Result<(), CodecError>,
    {
        let before = self.probe.snapshot();
        for _ in 0..iterations {
            strategy(ctx)?;
        }
        let after = self.probe.snapshot();
        Ok(delta(before, after)?)
    }

    /// Run `repeats` batches of `strategy`, writing one report line per batch
    /// to `out`.
    ///
    /// # Errors
    ///
    /// Aborts on the first failing batch or failed write.
    pub fn run_repeated<F, W>(
        &self,
        ctx: &mut CodecContext,
        mut strategy: F,
        label: &str,
        iterations: u64,
        repeats: u32,
        out: &mut W,
    ) -> Result<Vec<BatchReport>>
    where
        F: FnMut(&mut CodecContext) -> std::result::Result<(), CodecError>,
        W: Write,
    {
        let mut reports = Vec::with_capacity(usize::try_from(repeats).unwrap_or_default());
        for batch in 0..repeats {
            let bytes = self.run_batch(ctx, &mut strategy, iterations)?;
            let report = BatchReport {
                label: label.to_owned(),
                batch,
                bytes,
            };
            debug!(
                "batch complete: label={label}, batch={batch}, bytes={bytes}, \
                 iterations={iterations}"
            );
            writeln!(out, "{label}: {} MB", report.mebibytes())?;
            reports.push(report);
        }
        Ok(reports)
    }

    /// Run every strategy in [`Strategy::ORDER`] with the batch shape from
    /// `config`.
    ///
    /// # Errors
    ///
    /// Aborts on the first failing batch or failed write.
    pub fn run_all<W: Write>(
        &self,
        ctx: &mut CodecContext,
        config: &BenchConfig,
        out: &mut W,
    ) -> Result<Vec<BatchReport>> {
        let mut reports = Vec::new();
        for strategy in Strategy::ORDER {
            reports.extend(self.run_repeated(
                ctx,
                strategy.operation(),
                strategy.label(),
                config.iterations,
                config.repeats,
                out,
            )?);
        }
        Ok(reports)
    }
}
