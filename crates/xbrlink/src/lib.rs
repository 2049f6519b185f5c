//! RS-232 remote control for Sony XBR televisions.
//!
//! xbrlink frames television commands, sends them over a serial port and
//! classifies the set's answer.
//!
//! # Crate Structure
//!
//! - [`transport`]: serial and stream channels
//! - [`frame`]: command framing, checksums and response decoding
//! - [`control`]: transaction engine and named television operations (behind `control` feature)

/// Re-export transport types.
pub mod transport {
    pub use xbrlink_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use xbrlink_frame::*;
}

/// Re-export control types (requires `control` feature).
#[cfg(feature = "control")]
pub mod control {
    pub use xbrlink_control::*;
}
