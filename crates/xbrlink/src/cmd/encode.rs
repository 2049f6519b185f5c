use xbrlink_frame::{build_frame_with_headers, Command};

use crate::cmd::{ConnectionArgs, FrameArgs};
use crate::exit::{encode_error, CliResult, SUCCESS};
use crate::output::{print_report, FrameOutput, OutputFormat};

pub fn run(args: FrameArgs, conn: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let config = conn.control_config()?;
    let command = Command::new(args.fields.clone());
    let frame = build_frame_with_headers(&command, &args.overrides(), config.headers())
        .map_err(|err| encode_error("encode failed", err))?;

    print_report(
        &FrameOutput::new(command.to_string(), &frame, config.wire_format),
        format,
    );
    Ok(SUCCESS)
}
