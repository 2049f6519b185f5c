/// Errors that can occur on a control channel.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to open the specified serial device.
    #[error("failed to open {port}: {source}")]
    Open {
        port: String,
        source: serialport::Error,
    },

    /// Failed to apply a setting to an open serial device.
    #[error("failed to configure serial port: {0}")]
    Config(serialport::Error),

    /// Failed to enumerate serial devices.
    #[error("failed to enumerate serial ports: {0}")]
    Enumerate(serialport::Error),

    /// An I/O error occurred on the channel.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote end stopped accepting bytes.
    #[error("connection closed")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, TransportError>;
