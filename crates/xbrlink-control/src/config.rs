use std::time::Duration;

use xbrlink_frame::{Headers, WireFormat, DEFAULT_HEADER0, DEFAULT_HEADER1};
use xbrlink_transport::serial::DEFAULT_TIMEOUT;
use xbrlink_transport::{PortName, SerialConfig};

/// Per-device settings, fixed when the engine is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlConfig {
    /// First header byte for commands that do not override it. Default: `0x8C`.
    pub header0: u8,
    /// Second header byte for commands that do not override it. Default: `0x00`.
    pub header1: u8,
    /// Read timeout applied to the serial channel. Default: 150 ms.
    pub command_interval: Duration,
    /// Line representation of frames. Default: hex text.
    pub wire_format: WireFormat,
    /// Reject responses whose checksum does not match. Default: off.
    pub verify_response_checksum: bool,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            header0: DEFAULT_HEADER0,
            header1: DEFAULT_HEADER1,
            command_interval: DEFAULT_TIMEOUT,
            wire_format: WireFormat::HexText,
            verify_response_checksum: false,
        }
    }
}

impl ControlConfig {
    /// Default headers as a frame-codec value.
    pub fn headers(&self) -> Headers {
        Headers {
            header0: self.header0,
            header1: self.header1,
        }
    }

    /// Serial line settings for `port`, with this config's read timeout.
    pub fn serial_config(&self, port: PortName) -> SerialConfig {
        SerialConfig {
            timeout: self.command_interval,
            ..SerialConfig::for_port(port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_protocol() {
        let cfg = ControlConfig::default();
        assert_eq!(cfg.headers(), Headers::default());
        assert_eq!(cfg.command_interval, Duration::from_millis(150));
        assert_eq!(cfg.wire_format, WireFormat::HexText);
        assert!(!cfg.verify_response_checksum);
    }

    #[test]
    fn serial_config_uses_command_interval() {
        let cfg = ControlConfig {
            command_interval: Duration::from_millis(500),
            ..ControlConfig::default()
        };
        let serial = cfg.serial_config(PortName::Path("/dev/ttyUSB0".into()));
        assert_eq!(serial.timeout, Duration::from_millis(500));
        assert_eq!(serial.baud_rate, 9600);
        assert_eq!(serial.port.device(), "/dev/ttyUSB0");
    }
}
