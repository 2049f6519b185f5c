//! Blocking byte-channel abstraction for xbrlink.
//!
//! The command engine only ever talks to a [`Channel`]: a blocking byte pipe
//! with `write`, `flush_output` and a bounded `read`. This crate provides:
//! - [`StreamChannel`] over any `Read + Write` stream
//! - [`SerialChannel`] over an RS-232 port (9600 8N1 by default)
//!
//! This is the lowest layer of xbrlink.

pub mod error;
pub mod serial;
pub mod stream;
pub mod traits;

pub use error::{Result, TransportError};
pub use serial::{available_ports, PortInfo, PortName, SerialChannel, SerialConfig};
pub use stream::StreamChannel;
pub use traits::Channel;
