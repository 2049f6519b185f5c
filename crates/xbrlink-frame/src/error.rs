/// Errors raised while turning a command into frame bytes.
///
/// A command that fails here is never transmitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// A textual field is not exactly two hexadecimal digits.
    #[error("cannot encode field {text:?} (expected two hex digits)")]
    InvalidHex { text: String },

    /// A numeric field does not fit in a byte.
    #[error("cannot encode value {value} (expected 0-255)")]
    OutOfRange { value: i64 },

    /// Checksum input mixed numeric and textual fields.
    #[error("checksum input mixes numeric and textual fields")]
    MixedRepresentation,

    /// The command is missing its category code or length byte.
    #[error("command is missing its {field}")]
    MissingField { field: &'static str },
}

/// Errors raised while reading back a device response.
///
/// The command was already written when one of these occurs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    /// Nothing arrived within the read timeout and its retry.
    #[error("no response received")]
    NoResponse,

    /// The bytes received do not form a response frame.
    #[error("garbled response: '{raw}'")]
    Garbled { raw: String },

    /// The response checksum does not match its header and code.
    #[error("response checksum mismatch (expected {expected:02x}, got {actual:02x})")]
    ChecksumMismatch { expected: u8, actual: u8 },
}

pub type Result<T, E = EncodeError> = std::result::Result<T, E>;
