//! Transaction engine and command set for Sony XBR televisions.
//!
//! This is the "just works" layer. Open a serial port, call a named
//! operation, get the television's response code back:
//!
//! ```no_run
//! use xbrlink_control::{open_default, Input};
//! use xbrlink_transport::PortName;
//!
//! let mut tv = open_default(PortName::Index(0))?;
//! tv.power_on()?;
//! tv.select_input(Input::Hdmi1)?;
//! # Ok::<(), xbrlink_control::ControlError>(())
//! ```
//!
//! Lower-level callers can drive an [`Engine`] over any
//! [`Channel`](xbrlink_transport::Channel) with raw [`Command`]s.

pub mod config;
pub mod connector;
pub mod engine;
pub mod error;
pub mod status;
pub mod tables;
pub mod television;

#[cfg(test)]
mod testing;

pub use config::ControlConfig;
pub use connector::{open, open_default};
pub use engine::{Engine, Exchange, FAST_READ_LEN, RETRY_READ_LEN};
pub use error::{ControlError, Result};
pub use status::{
    Status, CODE_CANCELLED, CODE_LIMIT_OVER, CODE_LIMIT_UNDER, CODE_PARSE_ERROR, CODE_SUCCESS,
};
pub use tables::{CineMotion, Input, InputGroup, PictureMode, UnknownName, WideMode};
pub use television::Television;
pub use xbrlink_frame::{Command, Field, HeaderOverride, ResponseCode};
