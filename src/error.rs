//! Canonical error and result types for the crate.
//!
//! [`BenchError`] separates failures of the system under test (codec errors)
//! from failures of the measurement apparatus (anomalies), bad configuration
//! and report output failures.

use std::io;

use thiserror::Error;

use crate::{codec::CodecError, config::ConfigError, probe::MeasurementAnomaly};

/// Top-level error type aborting a benchmark run.
#[derive(Debug, Error)]
pub enum BenchError {
    /// An encode or decode strategy failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
    /// The allocation probe misbehaved.
    #[error("measurement anomaly: {0}")]
    Measurement(#[from] MeasurementAnomaly),
    /// The run configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// Writing a report line failed.
    #[error("report output failed: {0}")]
    Io(#[from] io::Error),
}

/// Canonical result alias used by the harness.
pub type Result<T> = std::result::Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::BenchError;
    use crate::{codec::CodecError, config::ConfigError, probe::MeasurementAnomaly};

    #[test]
    fn display_names_the_failing_layer() {
        let codec = BenchError::from(CodecError::EncodingCapacity {
            required: 10,
            capacity: 8,
        });
        assert_eq!(
            codec.to_string(),
            "codec error: encoding needs 10 bytes but the target holds only 8"
        );

        let anomaly = BenchError::from(MeasurementAnomaly::NegativeDelta {
            before: 5,
            after: 1,
        });
        assert_eq!(
            anomaly.to_string(),
            "measurement anomaly: allocation counter went backwards: before=5, after=1"
        );

        let config = BenchError::from(ConfigError::ZeroRepeats);
        assert_eq!(
            config.to_string(),
            "invalid configuration: repeats must be non-zero"
        );
    }
}
