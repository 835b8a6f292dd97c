use thiserror::Error;

use crate::kind::FieldKind;

/// Error types for `Store` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum MicropropError {
    /// No buffer is assigned to the store
    #[error("No buffer assigned")]
    Unbound,
    /// Zero-size buffer provided where data storage is required
    #[error("Zero-size buffer")]
    ZeroSizeBuffer,
    /// Mutation attempted on a read-only store
    #[error("Store is read-only")]
    ReadOnly,
    /// Field name is empty or does not fit into the header
    #[error("Invalid field name length: {length} (allowed 1..=15)")]
    InvalidName {
        /// Length of the rejected name
        length: usize,
    },
    /// Value has no payload bytes (empty blob or array)
    #[error("Empty value")]
    EmptyValue,
    /// Encoded field would exceed the per-field limit
    #[error("Field too large: {size} bytes exceeds maximum of {max}")]
    FieldSizeExceeded {
        /// Total encoded size of the field
        size: usize,
        /// Maximum allowed field size
        max: usize,
    },
    /// Buffer has insufficient space for the field
    #[error("Capacity exceeded: requested {requested} bytes, but only {available} bytes available")]
    CapacityExceeded {
        /// Number of bytes requested
        requested: usize,
        /// Number of bytes available
        available: usize,
    },
    /// No field with the requested name
    #[error("Field not found")]
    NotFound,
    /// Stored type cannot be decoded into the requested destination
    #[error("Type mismatch: stored {stored:?}, requested {requested:?}")]
    TypeMismatch {
        /// Type tag of the stored field
        stored: FieldKind,
        /// Type tag of the destination
        requested: FieldKind,
    },
    /// Destination cannot hold the stored payload
    #[error("Destination too small: {required} bytes required, {provided} provided")]
    DestinationTooSmall {
        /// Bytes needed to hold the payload
        required: usize,
        /// Bytes the destination provides
        provided: usize,
    },
    /// String payload is not valid UTF-8
    #[error("String field is not valid UTF-8")]
    InvalidUtf8,
    /// Underlying reader or writer failed
    #[error("I/O error: {0:?}")]
    Io(embedded_io::ErrorKind),
}
