use std::fmt;
use std::io::{ErrorKind, Read};
use std::str::FromStr;
use std::time::{Duration, Instant};

use bytes::{Bytes, BytesMut};
use serialport::{DataBits, FlowControl, Parity, SerialPort, SerialPortType, StopBits};
use tracing::{debug, trace};

use crate::error::{Result, TransportError};
use crate::stream;
use crate::traits::Channel;

/// Default line speed of the television's RS-232 port.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Default per-read timeout. The manufacturer recommends 500 ms between
/// commands; 150 ms has proven reliable and keeps the control loop snappy.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(150);

/// Serial device selector: a device path or a platform port index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortName {
    /// A device node or port name, e.g. `/dev/ttyUSB0` or `COM3`.
    Path(String),
    /// A zero-based port index: `0` is `/dev/ttyS0` on Unix and `COM1` on Windows.
    Index(u32),
}

impl PortName {
    /// The device name handed to the operating system.
    pub fn device(&self) -> String {
        match self {
            PortName::Path(path) => path.clone(),
            #[cfg(windows)]
            PortName::Index(index) => format!("COM{}", index + 1),
            #[cfg(not(windows))]
            PortName::Index(index) => format!("/dev/ttyS{index}"),
        }
    }
}

impl Default for PortName {
    fn default() -> Self {
        PortName::Index(0)
    }
}

impl FromStr for PortName {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        match s.parse::<u32>() {
            Ok(index) => Ok(PortName::Index(index)),
            Err(_) => Ok(PortName::Path(s.to_string())),
        }
    }
}

impl fmt::Display for PortName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.device())
    }
}

/// Line settings for a serial control channel.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Device to open.
    pub port: PortName,
    /// Line speed. Default: 9600.
    pub baud_rate: u32,
    /// Default: 8.
    pub data_bits: DataBits,
    /// Default: none.
    pub parity: Parity,
    /// Default: 1.
    pub stop_bits: StopBits,
    /// Default: none.
    pub flow_control: FlowControl,
    /// Total time a single read may block. Default: 150 ms.
    pub timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: PortName::default(),
            baud_rate: DEFAULT_BAUD_RATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SerialConfig {
    /// Default line settings on a specific port.
    pub fn for_port(port: PortName) -> Self {
        Self {
            port,
            ..Self::default()
        }
    }
}

/// A [`Channel`] over an RS-232 serial port.
///
/// Reads honour the configured timeout as a total budget across partial
/// chunks, so `read(6)` returns once six bytes arrived or the time is up.
pub struct SerialChannel {
    port: Box<dyn SerialPort>,
    device: String,
    timeout: Duration,
}

impl SerialChannel {
    /// Open a serial port with the given line settings (blocking).
    pub fn open(config: &SerialConfig) -> Result<Self> {
        let device = config.port.device();
        let port = serialport::new(device.as_str(), config.baud_rate)
            .data_bits(config.data_bits)
            .parity(config.parity)
            .stop_bits(config.stop_bits)
            .flow_control(config.flow_control)
            .timeout(config.timeout)
            .open()
            .map_err(|source| TransportError::Open {
                port: device.clone(),
                source,
            })?;

        debug!(
            port = %device,
            baud = config.baud_rate,
            timeout_ms = config.timeout.as_millis() as u64,
            "opened serial port"
        );

        Ok(Self {
            port,
            device,
            timeout: config.timeout,
        })
    }

    /// Wrap an already opened port.
    pub fn from_port(port: Box<dyn SerialPort>, timeout: Duration) -> Self {
        let device = port.name().unwrap_or_else(|| "<unnamed>".to_string());
        Self {
            port,
            device,
            timeout,
        }
    }

    /// Device name this channel was opened on.
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Total read timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Borrow the underlying port.
    pub fn get_ref(&self) -> &dyn SerialPort {
        self.port.as_ref()
    }

    /// Consume the channel and return the underlying port.
    pub fn into_inner(self) -> Box<dyn SerialPort> {
        self.port
    }
}

impl Channel for SerialChannel {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        stream::write_all(self.port.as_mut(), bytes)
    }

    fn flush_output(&mut self) -> Result<()> {
        stream::flush(self.port.as_mut())
    }

    fn read(&mut self, max_bytes: usize) -> Result<Bytes> {
        let deadline = Instant::now() + self.timeout;
        let mut buf = BytesMut::zeroed(max_bytes);
        let mut filled = 0usize;

        while filled < max_bytes {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            self.port
                .set_timeout(remaining)
                .map_err(TransportError::Config)?;

            match self.port.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => {
                    trace!(port = %self.device, bytes = n, "read chunk");
                    filled += n;
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::TimedOut => break,
                Err(err) => return Err(TransportError::Io(err)),
            }
        }

        buf.truncate(filled);
        Ok(buf.freeze())
    }
}

impl fmt::Debug for SerialChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialChannel")
            .field("device", &self.device)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// A serial device found on this machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    /// Device name to pass to [`PortName::Path`].
    pub name: String,
    /// Short description of the port type (`usb`, `pci`, `bluetooth`, `unknown`).
    pub kind: &'static str,
    /// USB product string, when known.
    pub product: Option<String>,
}

/// Enumerate serial ports visible to the operating system.
pub fn available_ports() -> Result<Vec<PortInfo>> {
    let ports = serialport::available_ports().map_err(TransportError::Enumerate)?;
    Ok(ports
        .into_iter()
        .map(|info| {
            let (kind, product) = match info.port_type {
                SerialPortType::UsbPort(usb) => ("usb", usb.product),
                SerialPortType::PciPort => ("pci", None),
                SerialPortType::BluetoothPort => ("bluetooth", None),
                SerialPortType::Unknown => ("unknown", None),
            };
            PortInfo {
                name: info.port_name,
                kind,
                product,
            }
        })
        .collect())
}


#[cfg(all(test, unix))]
mod pty_tests {
    use std::io::{Read, Write};

    use serialport::TTYPort;

    use super::*;

    const READ_TIMEOUT: Duration = Duration::from_millis(150);

    fn pty_channel() -> (TTYPort, SerialChannel) {
        let (master, slave) = TTYPort::pair().expect("pty pair should open");
        let channel = SerialChannel::from_port(Box::new(slave), READ_TIMEOUT);
        (master, channel)
    }

    #[test]
    fn silent_line_reads_empty_after_timeout() {
        let (_master, mut channel) = pty_channel();

        let started = Instant::now();
        let got = channel.read(6).unwrap();

        assert!(got.is_empty());
        assert!(started.elapsed() >= Duration::from_millis(100));
    }

    #[test]
    fn partial_response_is_kept_when_time_runs_out() {
        let (mut master, mut channel) = pty_channel();

        master.write_all(b"700").unwrap();
        master.flush().unwrap();

        assert_eq!(channel.read(6).unwrap().as_ref(), b"700");
    }

    #[test]
    fn full_response_is_read_in_one_call() {
        let (mut master, mut channel) = pty_channel();

        master.write_all(b"700070").unwrap();
        master.flush().unwrap();

        assert_eq!(channel.read(6).unwrap().as_ref(), b"700070");
    }

    #[test]
    fn written_frame_reaches_the_other_end() {
        let (mut master, mut channel) = pty_channel();

        channel.write(b"8C000002018F").unwrap();
        channel.flush_output().unwrap();

        master.set_timeout(Duration::from_secs(1)).unwrap();
        let mut buf = [0u8; 12];
        master.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"8C000002018F");
    }

    #[test]
    fn from_port_keeps_timeout() {
        let (_master, channel) = pty_channel();
        assert_eq!(channel.timeout(), READ_TIMEOUT);
        assert!(!channel.device().is_empty());
    }
}
