use tracing::debug;
use xbrlink_frame::{Command, CommandFrame, Field, HeaderOverride, ResponseCode};
use xbrlink_transport::Channel;

use crate::config::ControlConfig;
use crate::engine::{Engine, Exchange};
use crate::error::Result;
use crate::tables::{CineMotion, Input, InputGroup, PictureMode, WideMode};

const POWER: u8 = 0x00;
const STANDBY: u8 = 0x01;
const INPUT_SELECT: u8 = 0x02;
const PROGRAM: u8 = 0x04;
const PICTURE: u8 = 0x0D;
const DISPLAY: u8 = 0x0F;
const PICTURE_MODE: u8 = 0x20;
const CINEMOTION: u8 = 0x2A;
const SPEAKER: u8 = 0x36;
const WIDE: u8 = 0x44;

const COLOR_TEMP: u8 = 0x04;
const COLOR_TEMP_HEADERS: (u8, u8) = (0x8C, 0x10);
const SIRCS_HEADER0: u8 = 0x81;
const THEATER_CATEGORY: u8 = 3;
const THEATER_DATA: u8 = 96;

fn cmd(bytes: &[u8]) -> Command {
    Command::new(bytes.iter().copied().map(Field::Byte).collect::<Vec<_>>())
}

/// Named television operations on top of an [`Engine`].
///
/// Every method runs exactly one transaction, except [`Television::power_off`]
/// which enables standby first so that a later power-on is accepted.
#[derive(Debug)]
pub struct Television<C> {
    engine: Engine<C>,
}

impl<C: Channel> Television<C> {
    pub fn new(channel: C) -> Self {
        Self::from_engine(Engine::new(channel))
    }

    pub fn with_config(channel: C, config: ControlConfig) -> Self {
        Self::from_engine(Engine::with_config(channel, config))
    }

    pub fn from_engine(engine: Engine<C>) -> Self {
        Self { engine }
    }

    /// Send an arbitrary command.
    pub fn execute(
        &mut self,
        command: &Command,
        overrides: &HeaderOverride,
    ) -> Result<ResponseCode> {
        self.engine.execute(command, overrides)
    }

    /// Send an arbitrary command and keep the full exchange.
    pub fn transact(&mut self, command: &Command, overrides: &HeaderOverride) -> Result<Exchange> {
        self.engine.transact(command, overrides)
    }

    /// Frame a command as it would be sent, without sending it.
    pub fn build(&self, command: &Command, overrides: &HeaderOverride) -> Result<CommandFrame> {
        self.engine.build(command, overrides)
    }

    fn send(&mut self, bytes: &[u8]) -> Result<ResponseCode> {
        self.engine.execute(&cmd(bytes), &HeaderOverride::none())
    }

    pub fn power_on(&mut self) -> Result<ResponseCode> {
        self.send(&[POWER, 0x02, 0x01])
    }

    /// Enable standby, then switch off.
    ///
    /// Without standby enabled the television ignores the next power-on.
    pub fn power_off(&mut self) -> Result<ResponseCode> {
        self.standby_enable()?;
        self.send(&[POWER, 0x02, 0x00])
    }

    pub fn standby_enable(&mut self) -> Result<ResponseCode> {
        self.send(&[STANDBY, 0x02, 0x01])
    }

    pub fn standby_disable(&mut self) -> Result<ResponseCode> {
        self.send(&[STANDBY, 0x02, 0x00])
    }

    /// Enable the internal speakers.
    pub fn speaker_on(&mut self) -> Result<ResponseCode> {
        self.send(&[SPEAKER, 0x03, 0x01, 0x01])
    }

    pub fn speaker_off(&mut self) -> Result<ResponseCode> {
        self.send(&[SPEAKER, 0x03, 0x01, 0x00])
    }

    pub fn speaker_toggle(&mut self) -> Result<ResponseCode> {
        self.send(&[SPEAKER, 0x02, 0x00])
    }

    /// Select an input by group and optional unit number.
    pub fn input_select(&mut self, group: InputGroup, unit: Option<u8>) -> Result<ResponseCode> {
        match unit {
            Some(unit) => self.send(&[INPUT_SELECT, 0x03, group.code(), unit]),
            None => self.send(&[INPUT_SELECT, 0x02, group.code()]),
        }
    }

    pub fn select_input(&mut self, input: Input) -> Result<ResponseCode> {
        debug!(%input, "selecting input");
        self.input_select(input.group(), input.unit())
    }

    pub fn program_up(&mut self) -> Result<ResponseCode> {
        self.send(&[PROGRAM, 0x03, 0x00, 0x00])
    }

    pub fn program_down(&mut self) -> Result<ResponseCode> {
        self.send(&[PROGRAM, 0x03, 0x00, 0x01])
    }

    /// Toggle the picture without affecting other subunits.
    pub fn picture_toggle(&mut self) -> Result<ResponseCode> {
        self.send(&[PICTURE, 0x02, 0x00])
    }

    pub fn picture_off(&mut self) -> Result<ResponseCode> {
        self.send(&[PICTURE, 0x03, 0x01, 0x00])
    }

    pub fn picture_on(&mut self) -> Result<ResponseCode> {
        self.send(&[PICTURE, 0x03, 0x01, 0x01])
    }

    /// Toggle the on-screen picture/input information.
    pub fn display_toggle(&mut self) -> Result<ResponseCode> {
        self.send(&[DISPLAY, 0x02, 0x00])
    }

    pub fn picture_mode_toggle(&mut self) -> Result<ResponseCode> {
        self.send(&[PICTURE_MODE, 0x02, 0x00])
    }

    pub fn picture_mode(&mut self, mode: PictureMode) -> Result<ResponseCode> {
        self.send(&[PICTURE_MODE, 0x03, 0x01, mode.code()])
    }

    pub fn cinemotion(&mut self, mode: CineMotion) -> Result<ResponseCode> {
        self.send(&[CINEMOTION, 0x02, mode.code()])
    }

    pub fn wide_toggle(&mut self) -> Result<ResponseCode> {
        self.send(&[WIDE, 0x02, 0x00])
    }

    pub fn wide_mode(&mut self, mode: WideMode) -> Result<ResponseCode> {
        self.send(&[WIDE, 0x03, 0x01, mode.code()])
    }

    /// Send a SIRCS (infrared remote) code.
    ///
    /// The data byte travels in the second header slot, so the frame is
    /// never padded.
    pub fn sircs(&mut self, category: u8, data: u8) -> Result<ResponseCode> {
        let overrides = HeaderOverride::both(SIRCS_HEADER0, data);
        self.engine.execute(&cmd(&[category, 0x00, 0x00]), &overrides)
    }

    pub fn theater_toggle(&mut self) -> Result<ResponseCode> {
        self.sircs(THEATER_CATEGORY, THEATER_DATA)
    }

    /// Set the color temperature preset (`00`-`02`).
    pub fn color_temp(&mut self, temp: u8) -> Result<ResponseCode> {
        let (header0, header1) = COLOR_TEMP_HEADERS;
        let overrides = HeaderOverride::both(header0, header1);
        self.engine.execute(&cmd(&[COLOR_TEMP, 0x02, temp]), &overrides)
    }

    pub fn engine(&self) -> &Engine<C> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<C> {
        &mut self.engine
    }

    /// Consume and return the underlying channel.
    pub fn into_inner(self) -> C {
        self.engine.into_inner()
    }
}
