//! Shared error type across meshwire crates.

use thiserror::Error;

/// Stable machine-readable error codes. Test vectors and embedding
/// applications key on these rather than on display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Encode target buffer too small; recoverable by resizing.
    InsufficientCapacity,
    /// Decode buffer shorter than a declared length.
    Truncated,
    /// A TLV tag did not match the field being decoded.
    TagMismatch,
    /// Final cursor disagreed with the declared packet length.
    LengthMismatch,
    /// Service id or subtype not in the registry.
    UnrecognizedType,
    /// Unsupported packet version byte.
    UnsupportedVersion,
    /// A string TLV payload was not valid UTF-8.
    BadUtf8,
    /// A payload exceeds what the wire format can represent.
    PayloadTooLarge,
}

impl ErrorCode {
    /// String representation used in test vectors and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InsufficientCapacity => "INSUFFICIENT_CAPACITY",
            ErrorCode::Truncated => "TRUNCATED",
            ErrorCode::TagMismatch => "TAG_MISMATCH",
            ErrorCode::LengthMismatch => "LENGTH_MISMATCH",
            ErrorCode::UnrecognizedType => "UNRECOGNIZED_TYPE",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::BadUtf8 => "BAD_UTF8",
            ErrorCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, WireError>;

/// Unified error type for encoding and decoding.
///
/// Every decode failure is local to one packet; none of these variants
/// implies the surrounding stream is unusable (see `StreamReader`).
#[derive(Debug, Error)]
pub enum WireError {
    /// The caller can resize to `required` bytes and retry; the output
    /// buffer has not been touched.
    #[error("output buffer too small: {required} bytes required")]
    InsufficientCapacity { required: usize },

    #[error("buffer truncated")]
    Truncated,

    #[error("tlv tag mismatch: expected {expected:#06x}, found {found:#06x}")]
    TagMismatch { expected: u16, found: u16 },

    #[error("length mismatch: declared {declared} bytes, consumed {consumed}")]
    LengthMismatch { declared: usize, consumed: usize },

    #[error("unrecognized item type: service {service:#06x}, subtype {subtype:#04x}")]
    UnrecognizedType { service: u16, subtype: u8 },

    #[error("unsupported packet version {0:#04x}")]
    UnsupportedVersion(u8),

    #[error("string payload is not valid utf-8")]
    BadUtf8,

    #[error("payload too large for the wire format: {size} bytes")]
    PayloadTooLarge { size: usize },
}

impl WireError {
    /// Map to a stable machine-readable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            WireError::InsufficientCapacity { .. } => ErrorCode::InsufficientCapacity,
            WireError::Truncated => ErrorCode::Truncated,
            WireError::TagMismatch { .. } => ErrorCode::TagMismatch,
            WireError::LengthMismatch { .. } => ErrorCode::LengthMismatch,
            WireError::UnrecognizedType { .. } => ErrorCode::UnrecognizedType,
            WireError::UnsupportedVersion(_) => ErrorCode::UnsupportedVersion,
            WireError::BadUtf8 => ErrorCode::BadUtf8,
            WireError::PayloadTooLarge { .. } => ErrorCode::PayloadTooLarge,
        }
    }
}
