use bytes::{BufMut, Bytes, BytesMut};

use crate::checksum::sum8;
use crate::error::{EncodeError, Result};
use crate::field::Field;
use crate::wire::WireFormat;

/// Default first header byte of a television command.
pub const DEFAULT_HEADER0: u8 = 0x8C;

/// Default second header byte of a television command.
pub const DEFAULT_HEADER1: u8 = 0x00;

/// Header bytes preceding the category code: header0, header1.
pub const HEADER_SIZE: usize = 2;

/// A symbolic command: category code, declared length, payload.
///
/// The declared length counts the payload bytes plus the trailing checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    fields: Vec<Field>,
}

impl Command {
    /// Build a command from its fields, category code first.
    pub fn new(fields: impl Into<Vec<Field>>) -> Self {
        Self {
            fields: fields.into(),
        }
    }

    /// Build a command from two-digit hex strings.
    pub fn from_hex<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            fields
                .into_iter()
                .map(|s| Field::Hex(s.into()))
                .collect::<Vec<_>>(),
        )
    }

    /// All fields, in order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The category code (first field).
    pub fn category(&self) -> Option<&Field> {
        self.fields.first()
    }

    /// The declared data length (second field).
    pub fn declared_length(&self) -> Option<&Field> {
        self.fields.get(1)
    }

    /// Everything after the length byte.
    pub fn payload(&self) -> &[Field] {
        self.fields.get(2..).unwrap_or(&[])
    }
}

impl From<Vec<Field>> for Command {
    fn from(fields: Vec<Field>) -> Self {
        Self::new(fields)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.fields.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", parts.join(" "))
    }
}

/// The header bytes used when a command does not override them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Headers {
    pub header0: u8,
    pub header1: u8,
}

impl Default for Headers {
    fn default() -> Self {
        Self {
            header0: DEFAULT_HEADER0,
            header1: DEFAULT_HEADER1,
        }
    }
}

/// Per-call replacement header bytes.
///
/// Supplying either one marks the command as non-standard: its payload is
/// sent exactly as given, without zero-padding to the declared length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderOverride {
    pub header0: Option<Field>,
    pub header1: Option<Field>,
}

impl HeaderOverride {
    /// Use the default headers.
    pub fn none() -> Self {
        Self::default()
    }

    /// Replace both header bytes.
    pub fn both(header0: impl Into<Field>, header1: impl Into<Field>) -> Self {
        Self {
            header0: Some(header0.into()),
            header1: Some(header1.into()),
        }
    }

    /// True when neither header is overridden.
    pub fn is_none(&self) -> bool {
        self.header0.is_none() && self.header1.is_none()
    }
}

/// A fully assembled command frame.
///
/// Layout: `header0 header1 category length data... checksum`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    bytes: Bytes,
    padding: usize,
}

impl CommandFrame {
    /// The frame bytes, checksum included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Frame length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Frames always carry at least headers, category, length and checksum.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn header0(&self) -> u8 {
        self.bytes[0]
    }

    pub fn header1(&self) -> u8 {
        self.bytes[1]
    }

    pub fn category(&self) -> u8 {
        self.bytes[2]
    }

    /// The declared length byte.
    pub fn declared_length(&self) -> u8 {
        self.bytes[3]
    }

    /// Payload bytes between the length byte and the checksum, padding included.
    pub fn data(&self) -> &[u8] {
        &self.bytes[4..self.bytes.len() - 1]
    }

    pub fn checksum(&self) -> u8 {
        self.bytes[self.bytes.len() - 1]
    }

    /// Number of `00` bytes inserted ahead of the payload.
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Uppercase hex text of the frame, e.g. `8C000002018F`.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.bytes)
    }

    /// The bytes to put on the wire.
    pub fn encode(&self, wire: WireFormat) -> Bytes {
        wire.encode(&self.bytes)
    }

    /// Consume the frame and return its raw bytes.
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

/// Assemble a frame with the standard `8C 00` default headers.
pub fn build_frame(command: &Command, overrides: &HeaderOverride) -> Result<CommandFrame> {
    build_frame_with_headers(command, overrides, Headers::default())
}

/// Assemble a frame, falling back to `defaults` for any header not overridden.
///
/// ```text
/// ┌─────────┬─────────┬──────────┬────────┬──────────────────┬──────────┐
/// │ header0 │ header1 │ category │ length │ data (padded)    │ checksum │
/// │ 1B      │ 1B      │ 1B       │ 1B     │ length - 1 bytes │ 1B       │
/// └─────────┴─────────┴──────────┴────────┴──────────────────┴──────────┘
/// ```
///
/// With default headers a short payload is left-padded with `00` so that
/// payload + checksum equals the declared length. Oversupplied payloads are
/// kept whole, and overridden-header commands are never padded.
pub fn build_frame_with_headers(
    command: &Command,
    overrides: &HeaderOverride,
    defaults: Headers,
) -> Result<CommandFrame> {
    let standard = overrides.is_none();

    let header0 = resolve_header(overrides.header0.as_ref(), defaults.header0)?;
    let header1 = resolve_header(overrides.header1.as_ref(), defaults.header1)?;

    let category = command
        .category()
        .ok_or(EncodeError::MissingField {
            field: "category code",
        })?
        .value()?;
    let length = command
        .declared_length()
        .ok_or(EncodeError::MissingField {
            field: "length byte",
        })?
        .value()?;
    let required_length = usize::from(length);

    let data = command
        .payload()
        .iter()
        .map(Field::value)
        .collect::<Result<Vec<u8>>>()?;

    let padding = if standard {
        required_length.saturating_sub(data.len() + 1)
    } else {
        0
    };

    let mut buf = BytesMut::with_capacity(HEADER_SIZE + 3 + padding + data.len());
    buf.put_u8(header0);
    buf.put_u8(header1);
    buf.put_u8(category);
    buf.put_u8(length);
    buf.put_bytes(0x00, padding);
    buf.put_slice(&data);
    let checksum = sum8(&buf);
    buf.put_u8(checksum);

    Ok(CommandFrame {
        bytes: buf.freeze(),
        padding,
    })
}

fn resolve_header(field: Option<&Field>, default: u8) -> Result<u8> {
    match field {
        Some(field) => field.value(),
        None => Ok(default),
    }
}
