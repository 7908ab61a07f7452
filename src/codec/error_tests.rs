//! Unit tests for codec error classification and I/O mapping.

use std::io;

use bincode::error::{DecodeError, EncodeError};

use super::CodecError;

#[test]
fn capacity_error_maps_to_write_zero() {
    let err = CodecError::EncodingCapacity {
        required: 1037,
        capacity: 1024,
    };
    assert!(err.is_capacity());
    assert_eq!(err.error_type(), "capacity");
    assert_eq!(
        err.to_string(),
        "encoding needs 1037 bytes but the target holds only 1024"
    );

    let io_err: io::Error = err.into();
    assert_eq!(io_err.kind(), io::ErrorKind::WriteZero);
}

#[test]
fn format_error_maps_to_invalid_data() {
    let err = CodecError::from(DecodeError::UnexpectedEnd { additional: 3 });
    assert!(err.is_decoding_format());
    assert!(!err.is_capacity());
    assert_eq!(err.error_type(), "format");

    let io_err: io::Error = err.into();
    assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn encode_error_maps_to_other() {
    let err = CodecError::Encode(EncodeError::UnexpectedEnd);
    assert_eq!(err.error_type(), "encode");

    let io_err: io::Error = err.into();
    assert_eq!(io_err.kind(), io::ErrorKind::Other);
}
