use tracing::debug;
use xbrlink_transport::{PortName, SerialChannel};

use crate::config::ControlConfig;
use crate::error::Result;
use crate::television::Television;

/// Open a serial port and wrap it for television control.
///
/// The port runs at 9600 8N1 with `config.command_interval` as its read
/// timeout.
pub fn open(port: PortName, config: ControlConfig) -> Result<Television<SerialChannel>> {
    let serial = config.serial_config(port);
    let channel = SerialChannel::open(&serial)?;
    debug!(
        device = channel.device(),
        wire = config.wire_format.name(),
        "television channel ready"
    );
    Ok(Television::with_config(channel, config))
}

/// Open a port with default settings.
pub fn open_default(port: PortName) -> Result<Television<SerialChannel>> {
    open(port, ControlConfig::default())
}

#[cfg(test)]
mod tests {
    use xbrlink_transport::TransportError;

    use super::*;
    use crate::error::ControlError;

    #[test]
    fn missing_port_is_a_transport_error() {
        let port = PortName::Path("/dev/xbrlink-does-not-exist".into());
        let err = open_default(port).unwrap_err();
        assert!(matches!(
            err,
            ControlError::Transport(TransportError::Open { .. })
        ));
    }
}
