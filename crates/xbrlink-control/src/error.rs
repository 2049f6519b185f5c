use xbrlink_frame::{EncodeError, ResponseError};
use xbrlink_transport::TransportError;

use crate::status::Status;

/// Errors that can end a television transaction.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    /// The command could not be encoded; nothing was sent.
    #[error("cannot encode command: {0}")]
    Encode(#[from] EncodeError),

    /// The response was missing or unreadable.
    #[error("{0}")]
    Response(#[from] ResponseError),

    /// The television rejected a value above its maximum.
    #[error("value overrun (exceeds maximum limit)")]
    LimitOver,

    /// The television rejected a value below its minimum.
    #[error("value underrun (below minimum limit)")]
    LimitUnder,

    /// The television rejected the data or its declared length.
    #[error("invalid data/length (command cancelled)")]
    CommandCancelled,

    /// The television could not parse the command.
    #[error("invalid command (parser error)")]
    Parse,

    /// Channel-level failure.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl ControlError {
    /// Where this error sits in the status taxonomy.
    pub fn status(&self) -> Status {
        match self {
            ControlError::Encode(_) => Status::EncodeError,
            ControlError::Response(_) => Status::ResponseError,
            ControlError::LimitOver => Status::LimitOver,
            ControlError::LimitUnder => Status::LimitUnder,
            ControlError::CommandCancelled => Status::CommandCancelled,
            ControlError::Parse => Status::ParseError,
            ControlError::Transport(_) => Status::TransportError,
        }
    }

    /// True when the television answered and refused the command.
    pub fn is_rejection(&self) -> bool {
        self.status().is_rejection()
    }
}

pub type Result<T> = std::result::Result<T, ControlError>;
