use tracing::warn;
use xbrlink_control::open;
use xbrlink_frame::Command;

use crate::cmd::{ConnectionArgs, FrameArgs};
use crate::exit::{control_error, CliResult, DEVICE_REJECTED, SUCCESS};
use crate::output::{print_report, ExchangeOutput, OutputFormat};

pub fn run(args: FrameArgs, conn: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let config = conn.control_config()?;
    let wire = config.wire_format;
    let command = Command::new(args.fields.clone());
    let overrides = args.overrides();

    let mut tv = open(conn.port.clone(), config)
        .map_err(|err| control_error(&format!("cannot open {}", conn.port), err))?;
    let exchange = tv
        .transact(&command, &overrides)
        .map_err(|err| control_error("send failed", err))?;

    print_report(
        &ExchangeOutput::new(conn.port.to_string(), command.to_string(), wire, &exchange),
        format,
    );

    if exchange.status.is_rejection() {
        warn!(status = %exchange.status, code = %exchange.code(), "television rejected command");
        return Ok(DEVICE_REJECTED);
    }
    Ok(SUCCESS)
}
