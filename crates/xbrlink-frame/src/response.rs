use std::fmt;

use crate::checksum::sum8;
use crate::error::{ResponseError, Result};
use crate::wire::{garbled, WireFormat};

/// Logical size of a response: header, code, checksum.
pub const RESPONSE_SIZE: usize = 3;

/// Header byte the television puts on every answer.
pub const RESPONSE_HEADER: u8 = 0x70;

/// The status byte of a response.
///
/// Renders as two lowercase hex digits (`00`, `03`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResponseCode(u8);

impl ResponseCode {
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Two lowercase hex digits.
    pub fn as_hex(self) -> String {
        format!("{:02x}", self.0)
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}", self.0)
    }
}

impl From<u8> for ResponseCode {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

/// A decoded response frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseFrame {
    bytes: Vec<u8>,
}

impl ResponseFrame {
    /// First byte (normally `0x70`).
    pub fn header(&self) -> u8 {
        self.bytes[0]
    }

    pub fn code(&self) -> ResponseCode {
        ResponseCode(self.bytes[1])
    }

    /// Trailing checksum byte, if it arrived.
    pub fn checksum(&self) -> Option<u8> {
        self.bytes.get(2).copied()
    }

    /// Checksum the device should have sent: header + code, modulo 256.
    pub fn expected_checksum(&self) -> u8 {
        sum8(&self.bytes[..2])
    }

    /// `Some(true)` when the checksum matches, `None` when none was received.
    pub fn checksum_ok(&self) -> Option<bool> {
        self.checksum().map(|actual| actual == self.expected_checksum())
    }

    /// Fail unless a checksum arrived and matches.
    pub fn verify_checksum(&self) -> Result<(), ResponseError> {
        match self.checksum() {
            Some(actual) if actual == self.expected_checksum() => Ok(()),
            Some(actual) => Err(ResponseError::ChecksumMismatch {
                expected: self.expected_checksum(),
                actual,
            }),
            None => Err(garbled(&self.bytes)),
        }
    }

    /// All decoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decoded bytes as uppercase hex, the way they travel in text mode.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.bytes)
    }
}

/// Decode a response as received from the channel.
///
/// Anything shorter than header + code is garbled. Extra trailing bytes are
/// kept but ignored.
pub fn decode_response(raw: &[u8], wire: WireFormat) -> Result<ResponseFrame, ResponseError> {
    let bytes = wire.decode(raw)?;
    if bytes.len() < 2 {
        return Err(garbled(raw));
    }
    Ok(ResponseFrame { bytes })
}

/// Decode a response and return only its status code.
pub fn parse_response(raw: &[u8], wire: WireFormat) -> Result<ResponseCode, ResponseError> {
    decode_response(raw, wire).map(|frame| frame.code())
}
