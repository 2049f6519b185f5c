use std::fmt;
use std::str::FromStr;

use crate::error::{EncodeError, Result};

/// One byte-valued element of a command.
///
/// Commands are usually written as two-digit hex text (`"8C"`), but numeric
/// values are just as valid (`96` is `0x60`). Both normalize to the same
/// frame byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    /// A numeric byte.
    Byte(u8),
    /// Two hexadecimal digits, either case.
    Hex(String),
}

impl Field {
    /// A textual field.
    pub fn hex(text: impl Into<String>) -> Self {
        Field::Hex(text.into())
    }

    /// A numeric field from a wider integer, rejecting values outside 0-255.
    pub fn from_int(value: i64) -> Result<Self> {
        u8::try_from(value)
            .map(Field::Byte)
            .map_err(|_| EncodeError::OutOfRange { value })
    }

    /// Whether this field uses the textual representation.
    pub fn is_text(&self) -> bool {
        matches!(self, Field::Hex(_))
    }

    /// Resolve the field to its byte value.
    pub fn value(&self) -> Result<u8> {
        match self {
            Field::Byte(value) => Ok(*value),
            Field::Hex(text) => {
                let mut out = [0u8; 1];
                hex::decode_to_slice(text, &mut out)
                    .map_err(|_| EncodeError::InvalidHex { text: text.clone() })?;
                Ok(out[0])
            }
        }
    }

    /// Canonical two-digit uppercase hex text for this field.
    pub fn normalize(&self) -> Result<String> {
        self.value().map(|value| format!("{value:02X}"))
    }
}

impl From<u8> for Field {
    fn from(value: u8) -> Self {
        Field::Byte(value)
    }
}

impl From<&str> for Field {
    fn from(text: &str) -> Self {
        Field::Hex(text.to_string())
    }
}

impl From<String> for Field {
    fn from(text: String) -> Self {
        Field::Hex(text)
    }
}

/// Command-line syntax: `8C` is textual hex, `#140` is a decimal byte.
impl FromStr for Field {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(decimal) = s.strip_prefix('#') {
            let value: i64 = decimal.parse().map_err(|_| EncodeError::InvalidHex {
                text: s.to_string(),
            })?;
            return Field::from_int(value);
        }

        let field = Field::hex(s);
        field.value()?;
        Ok(field)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Byte(value) => write!(f, "#{value}"),
            Field::Hex(text) => f.write_str(text),
        }
    }
}
