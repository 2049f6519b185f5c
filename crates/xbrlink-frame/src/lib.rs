//! Command framing for the Sony television RS-232 control protocol.
//!
//! Every command is framed as:
//! - two header bytes (`8C 00` unless overridden per call)
//! - a category code and a length byte counting data + checksum
//! - the data, left-padded with `00` up to the declared length
//! - a modulo-256 sum of everything before it
//!
//! The television answers with three bytes: header, status code, checksum.

pub mod checksum;
pub mod codec;
pub mod error;
pub mod field;
pub mod response;
pub mod wire;

pub use checksum::{checksum, sum8};
pub use codec::{
    build_frame, build_frame_with_headers, Command, CommandFrame, HeaderOverride, Headers,
    DEFAULT_HEADER0, DEFAULT_HEADER1, HEADER_SIZE,
};
pub use error::{EncodeError, ResponseError, Result};
pub use field::Field;
pub use response::{
    decode_response, parse_response, ResponseCode, ResponseFrame, RESPONSE_HEADER, RESPONSE_SIZE,
};
pub use wire::WireFormat;
