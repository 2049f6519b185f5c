use tracing::debug;
use xbrlink_control::{open, ResponseCode, Television};
use xbrlink_transport::Channel;

use crate::cmd::{Command, ConnectionArgs, Direction, OnOff, Selection, Switch};
use crate::exit::{control_error, encode_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{print_report, OperationOutput, OutputFormat};

pub fn run(command: Command, conn: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let name = operation_name(&command);
    let config = conn.control_config()?;
    let mut tv = open(conn.port.clone(), config)
        .map_err(|err| control_error(&format!("cannot open {}", conn.port), err))?;

    debug!(operation = %name, port = %conn.port, "running operation");
    let code = dispatch(&mut tv, command)?.map_err(|err| control_error(&name, err))?;

    print_report(
        &OperationOutput::new(&name, conn.port.to_string(), code),
        format,
    );
    Ok(SUCCESS)
}

/// Run one named operation. The outer result covers argument problems found
/// before anything is sent.
fn dispatch<C: Channel>(
    tv: &mut Television<C>,
    command: Command,
) -> CliResult<xbrlink_control::Result<ResponseCode>> {
    Ok(match command {
        Command::Power { state: OnOff::On } => tv.power_on(),
        Command::Power { state: OnOff::Off } => tv.power_off(),
        Command::Standby { state: OnOff::On } => tv.standby_enable(),
        Command::Standby { state: OnOff::Off } => tv.standby_disable(),
        Command::Speaker { state } => match state {
            Switch::On => tv.speaker_on(),
            Switch::Off => tv.speaker_off(),
            Switch::Toggle => tv.speaker_toggle(),
        },
        Command::Input { input } => tv.select_input(input),
        Command::Program { direction } => match direction {
            Direction::Up => tv.program_up(),
            Direction::Down => tv.program_down(),
        },
        Command::Picture { state } => match state {
            Switch::On => tv.picture_on(),
            Switch::Off => tv.picture_off(),
            Switch::Toggle => tv.picture_toggle(),
        },
        Command::PictureMode { mode } => match mode {
            Selection::Toggle => tv.picture_mode_toggle(),
            Selection::Set(mode) => tv.picture_mode(mode),
        },
        Command::Display => tv.display_toggle(),
        Command::Cinemotion { mode } => tv.cinemotion(mode),
        Command::Wide { mode } => match mode {
            Selection::Toggle => tv.wide_toggle(),
            Selection::Set(mode) => tv.wide_mode(mode),
        },
        Command::Theater => tv.theater_toggle(),
        Command::Sircs(args) => tv.sircs(args.category, args.data),
        Command::ColorTemp { temp } => {
            let temp = temp
                .value()
                .map_err(|err| encode_error("color-temp", err))?;
            tv.color_temp(temp)
        }
        other => {
            return Err(CliError::new(
                INTERNAL,
                format!("{} is not a television operation", operation_name(&other)),
            ))
        }
    })
}

fn operation_name(command: &Command) -> String {
    match command {
        Command::Power { state } => format!("power {}", on_off(*state)),
        Command::Standby { state } => format!("standby {}", on_off(*state)),
        Command::Speaker { state } => format!("speaker {}", switch(*state)),
        Command::Input { input } => format!("input {input}"),
        Command::Program { direction } => match direction {
            Direction::Up => "program up".to_string(),
            Direction::Down => "program down".to_string(),
        },
        Command::Picture { state } => format!("picture {}", switch(*state)),
        Command::PictureMode { mode } => format!("picture-mode {mode}"),
        Command::Display => "display".to_string(),
        Command::Cinemotion { mode } => format!("cinemotion {mode}"),
        Command::Wide { mode } => format!("wide {mode}"),
        Command::Theater => "theater".to_string(),
        Command::Sircs(args) => format!("sircs {} {}", args.category, args.data),
        Command::ColorTemp { temp } => format!("color-temp {temp}"),
        Command::Send(_) => "send".to_string(),
        Command::Encode(_) => "encode".to_string(),
        Command::Checksum(_) => "checksum".to_string(),
        Command::Ports => "ports".to_string(),
        Command::Version(_) => "version".to_string(),
    }
}

fn on_off(state: OnOff) -> &'static str {
    match state {
        OnOff::On => "on",
        OnOff::Off => "off",
    }
}

fn switch(state: Switch) -> &'static str {
    match state {
        Switch::On => "on",
        Switch::Off => "off",
        Switch::Toggle => "toggle",
    }
}
