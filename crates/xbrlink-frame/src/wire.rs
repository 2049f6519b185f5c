use bytes::Bytes;

use crate::error::{ResponseError, Result};

/// How frame bytes are represented on the serial line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WireFormat {
    /// ASCII hexadecimal text, two characters per byte, no delimiters.
    #[default]
    HexText,
    /// Frame bytes written and read verbatim.
    Raw,
}

impl WireFormat {
    /// Serialize frame bytes for transmission.
    pub fn encode(self, bytes: &[u8]) -> Bytes {
        match self {
            WireFormat::HexText => Bytes::from(hex::encode_upper(bytes)),
            WireFormat::Raw => Bytes::copy_from_slice(bytes),
        }
    }

    /// Recover frame bytes from what arrived on the line.
    pub fn decode(self, raw: &[u8]) -> Result<Vec<u8>, ResponseError> {
        match self {
            WireFormat::HexText => hex::decode(raw).map_err(|_| garbled(raw)),
            WireFormat::Raw => Ok(raw.to_vec()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WireFormat::HexText => "hex",
            WireFormat::Raw => "raw",
        }
    }
}

pub(crate) fn garbled(raw: &[u8]) -> ResponseError {
    ResponseError::Garbled {
        raw: raw.escape_ascii().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_text_is_two_uppercase_chars_per_byte() {
        let wire = WireFormat::HexText.encode(&[0x8C, 0x00, 0x0F]);
        assert_eq!(wire.as_ref(), b"8C000F");
    }

    #[test]
    fn hex_text_decodes_either_case() {
        assert_eq!(
            WireFormat::HexText.decode(b"700003").unwrap(),
            vec![0x70, 0x00, 0x03]
        );
        assert_eq!(WireFormat::HexText.decode(b"7a").unwrap(), vec![0x7A]);
    }

    #[test]
    fn malformed_hex_text_is_garbled() {
        let cases: [&[u8]; 3] = [b"70000", b"70zz03", b"\x70\x00\x70"];
        for raw in cases {
            let err = WireFormat::HexText.decode(raw).unwrap_err();
            assert!(matches!(err, ResponseError::Garbled { .. }));
        }
    }

    #[test]
    fn raw_passes_bytes_through() {
        let bytes = [0x70, 0x00, 0x70];
        assert_eq!(WireFormat::Raw.encode(&bytes).as_ref(), &bytes);
        assert_eq!(WireFormat::Raw.decode(&bytes).unwrap(), bytes.to_vec());
    }

    #[test]
    fn garbled_output_is_printable() {
        let err = garbled(b"\x70\x00");
        assert_eq!(err.to_string(), "garbled response: 'p\\x00'");
    }
}
