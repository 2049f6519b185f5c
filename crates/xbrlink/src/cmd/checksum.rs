use xbrlink_frame::checksum;

use crate::cmd::ChecksumArgs;
use crate::exit::{encode_error, CliResult, SUCCESS};
use crate::output::{print_report, ChecksumOutput, OutputFormat};

pub fn run(args: ChecksumArgs, format: OutputFormat) -> CliResult<i32> {
    let sum = checksum(&args.fields).map_err(|err| encode_error("checksum failed", err))?;

    print_report(
        &ChecksumOutput {
            fields: args.fields.iter().map(ToString::to_string).collect(),
            checksum: sum.to_string(),
        },
        format,
    );
    Ok(SUCCESS)
}
