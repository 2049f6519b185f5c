mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::{Command, ConnectionArgs};
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "xbrlink",
    version,
    about = "Control Sony XBR televisions over RS-232"
)]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, &cli.connection, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use xbrlink_control::{Input, PictureMode};
    use xbrlink_frame::Field;
    use xbrlink_transport::PortName;

    use super::*;
    use crate::cmd::{OnOff, Selection, WireArg};

    #[test]
    fn parses_power_with_global_port() {
        let cli = Cli::try_parse_from(["xbrlink", "power", "on", "--port", "/dev/ttyUSB0"])
            .expect("power args should parse");

        assert!(matches!(cli.command, Command::Power { state: OnOff::On }));
        assert_eq!(
            cli.connection.port,
            PortName::Path("/dev/ttyUSB0".to_string())
        );
    }

    #[test]
    fn port_index_and_wire_flags() {
        let cli = Cli::try_parse_from(["xbrlink", "--port", "1", "--wire", "raw", "display"])
            .expect("display args should parse");
        assert_eq!(cli.connection.port, PortName::Index(1));
        assert!(matches!(cli.connection.wire, WireArg::Raw));
    }

    #[test]
    fn parses_table_values() {
        let cli = Cli::try_parse_from(["xbrlink", "input", "hdmi2"]).expect("input should parse");
        assert!(matches!(
            cli.command,
            Command::Input {
                input: Input::Hdmi2
            }
        ));

        let cli = Cli::try_parse_from(["xbrlink", "picture-mode", "vivid"])
            .expect("picture-mode should parse");
        assert!(matches!(
            cli.command,
            Command::PictureMode {
                mode: Selection::Set(PictureMode::Vivid)
            }
        ));
    }

    #[test]
    fn rejects_unknown_input() {
        let err = Cli::try_parse_from(["xbrlink", "input", "hdmi9"])
            .expect_err("unknown input should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn send_fields_accept_hex_and_decimal() {
        let cli = Cli::try_parse_from([
            "xbrlink", "send", "03", "00", "00", "--header0", "81", "--header1", "#96",
        ])
        .expect("send args should parse");

        let Command::Send(args) = cli.command else {
            panic!("expected send");
        };
        assert_eq!(args.fields.len(), 3);
        assert_eq!(args.header0, Some(Field::hex("81")));
        assert_eq!(args.header1, Some(Field::Byte(96)));
    }

    #[test]
    fn send_requires_category_and_length() {
        assert!(Cli::try_parse_from(["xbrlink", "send", "00"]).is_err());
    }
}
