use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use clap::{Args, Subcommand, ValueEnum};
use xbrlink_control::{CineMotion, ControlConfig, Input, PictureMode, UnknownName, WideMode};
use xbrlink_frame::{EncodeError, Field, HeaderOverride, WireFormat};
use xbrlink_transport::PortName;

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod checksum;
pub mod encode;
pub mod operate;
pub mod ports;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Switch the television on or off.
    Power { state: OnOff },
    /// Enable or disable standby (required for power-on over RS-232).
    Standby { state: OnOff },
    /// Internal speakers.
    Speaker { state: Switch },
    /// Select an input (toggle, tv, video1, video2, component1, component2, hdmi1-4, pc).
    Input { input: Input },
    /// Step the tuner channel.
    Program { direction: Direction },
    /// Picture on/off without affecting audio.
    Picture { state: Switch },
    /// Set a picture mode (vivid, standard, custom) or cycle with `toggle`.
    PictureMode { mode: Selection<PictureMode> },
    /// Toggle the on-screen information display.
    Display,
    /// Set CineMotion (off, auto1, auto2).
    Cinemotion { mode: CineMotion },
    /// Set a wide mode (wide-zoom, full, zoom, normal, pc-normal, pc-full1, pc-full2,
    /// h-stretch) or `toggle`.
    Wide { mode: Selection<WideMode> },
    /// Toggle theater mode.
    Theater,
    /// Send a SIRCS remote code.
    Sircs(SircsArgs),
    /// Set the color temperature preset.
    ColorTemp {
        /// Preset as two hex digits or `#N`.
        #[arg(value_parser = parse_field)]
        temp: Field,
    },
    /// Send raw command fields and print the full exchange.
    Send(FrameArgs),
    /// Build a frame without opening a port.
    Encode(FrameArgs),
    /// Checksum fields without opening a port.
    Checksum(ChecksumArgs),
    /// List serial ports.
    Ports,
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, conn: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, conn, format),
        Command::Encode(args) => encode::run(args, conn, format),
        Command::Checksum(args) => checksum::run(args, format),
        Command::Ports => ports::run(format),
        Command::Version(args) => version::run(args),
        other => operate::run(other, conn, format),
    }
}

/// Serial connection settings shared by every device subcommand.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Serial device path, or a port index (0 = /dev/ttyS0 or COM1).
    #[arg(long, env = "XBRLINK_PORT", default_value = "0", global = true)]
    pub port: PortName,

    /// Read timeout per response (e.g. 150ms, 1s).
    #[arg(long, env = "XBRLINK_INTERVAL", default_value = "150ms", global = true)]
    pub interval: String,

    /// Line representation of frames.
    #[arg(long, env = "XBRLINK_WIRE", value_enum, default_value = "hex", global = true)]
    pub wire: WireArg,

    /// Fail on responses whose checksum does not match.
    #[arg(long, global = true)]
    pub verify_checksum: bool,
}

impl ConnectionArgs {
    pub fn control_config(&self) -> CliResult<ControlConfig> {
        Ok(ControlConfig {
            command_interval: parse_duration(&self.interval)?,
            wire_format: self.wire.into(),
            verify_response_checksum: self.verify_checksum,
            ..ControlConfig::default()
        })
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum WireArg {
    /// ASCII hex text.
    Hex,
    /// Raw frame bytes.
    Raw,
}

impl From<WireArg> for WireFormat {
    fn from(arg: WireArg) -> Self {
        match arg {
            WireArg::Hex => WireFormat::HexText,
            WireArg::Raw => WireFormat::Raw,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum OnOff {
    On,
    Off,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Switch {
    On,
    Off,
    Toggle,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Direction {
    Up,
    Down,
}

/// A table value, or `toggle` to cycle through them on the set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Selection<T> {
    Toggle,
    Set(T),
}

impl<T> FromStr for Selection<T>
where
    T: FromStr<Err = UnknownName>,
{
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("toggle") {
            return Ok(Selection::Toggle);
        }
        s.parse().map(Selection::Set).map_err(|mut err: UnknownName| {
            err.expected.push_str(", toggle");
            err
        })
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Toggle => f.write_str("toggle"),
            Selection::Set(value) => value.fmt(f),
        }
    }
}

#[derive(Args, Debug)]
pub struct SircsArgs {
    /// SIRCS category (usually 0-3).
    #[arg(long)]
    pub category: u8,
    /// SIRCS data code.
    #[arg(long)]
    pub data: u8,
}

/// Command fields: two hex digits (`8C`) or a decimal byte (`#96`).
#[derive(Args, Debug)]
pub struct FrameArgs {
    /// Category code, length byte, then data.
    #[arg(required = true, num_args = 2.., value_name = "FIELD", value_parser = parse_field)]
    pub fields: Vec<Field>,
    /// Replace the first header byte (disables padding).
    #[arg(long, value_name = "FIELD", value_parser = parse_field)]
    pub header0: Option<Field>,
    /// Replace the second header byte (disables padding).
    #[arg(long, value_name = "FIELD", value_parser = parse_field)]
    pub header1: Option<Field>,
}

impl FrameArgs {
    pub fn overrides(&self) -> HeaderOverride {
        HeaderOverride {
            header0: self.header0.clone(),
            header1: self.header1.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct ChecksumArgs {
    /// Fields to sum: all hex (`8C`) or all decimal (`#96`).
    #[arg(value_name = "FIELD", value_parser = parse_field)]
    pub fields: Vec<Field>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// `Field` also converts from `String` unchecked; the command line always
/// goes through the validating parser.
fn parse_field(input: &str) -> Result<Field, EncodeError> {
    input.parse()
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "ms")
    };

    let value: u64 = number
        .trim()
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}
