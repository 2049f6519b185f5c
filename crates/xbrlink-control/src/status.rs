use serde::Serialize;
use xbrlink_frame::ResponseCode;

use crate::error::ControlError;

/// Response code: command accepted.
pub const CODE_SUCCESS: u8 = 0x00;
/// Response code: value above the accepted range.
pub const CODE_LIMIT_OVER: u8 = 0x01;
/// Response code: value below the accepted range.
pub const CODE_LIMIT_UNDER: u8 = 0x02;
/// Response code: invalid data or length.
pub const CODE_CANCELLED: u8 = 0x03;
/// Response code: command not understood.
pub const CODE_PARSE_ERROR: u8 = 0x04;

/// Classified outcome of one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    LimitOver,
    LimitUnder,
    CommandCancelled,
    ParseError,
    /// The television answered with a code outside `00`-`04`. Treated as
    /// success; the code is handed back to the caller untouched.
    Unrecognized,
    ResponseError,
    EncodeError,
    TransportError,
}

impl Status {
    /// Classify a response code.
    pub fn from_code(code: ResponseCode) -> Self {
        match code.value() {
            CODE_SUCCESS => Status::Success,
            CODE_LIMIT_OVER => Status::LimitOver,
            CODE_LIMIT_UNDER => Status::LimitUnder,
            CODE_CANCELLED => Status::CommandCancelled,
            CODE_PARSE_ERROR => Status::ParseError,
            _ => Status::Unrecognized,
        }
    }

    /// Outcomes returned to the caller as a response code.
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success | Status::Unrecognized)
    }

    /// Outcomes where the television answered with a refusal.
    pub fn is_rejection(self) -> bool {
        matches!(
            self,
            Status::LimitOver | Status::LimitUnder | Status::CommandCancelled | Status::ParseError
        )
    }

    /// The error a device refusal turns into, if this status is one.
    pub fn rejection(self) -> Option<ControlError> {
        match self {
            Status::LimitOver => Some(ControlError::LimitOver),
            Status::LimitUnder => Some(ControlError::LimitUnder),
            Status::CommandCancelled => Some(ControlError::CommandCancelled),
            Status::ParseError => Some(ControlError::Parse),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::LimitOver => "limit_over",
            Status::LimitUnder => "limit_under",
            Status::CommandCancelled => "command_cancelled",
            Status::ParseError => "parse_error",
            Status::Unrecognized => "unrecognized",
            Status::ResponseError => "response_error",
            Status::EncodeError => "encode_error",
            Status::TransportError => "transport_error",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
