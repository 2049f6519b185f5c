use bytes::Bytes;
use tracing::{debug, warn};
use xbrlink_frame::{
    build_frame_with_headers, decode_response, Command, CommandFrame, HeaderOverride,
    ResponseCode, ResponseError, ResponseFrame,
};
use xbrlink_transport::Channel;

use crate::config::ControlConfig;
use crate::error::Result;
use crate::status::Status;

/// First read: a full hex-encoded response (3 bytes, 6 characters).
pub const FAST_READ_LEN: usize = 6;

/// Second read, taken only when the first one came back empty.
pub const RETRY_READ_LEN: usize = 3;

/// Everything observed during one request/response exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// The frame that was written.
    pub frame: CommandFrame,
    /// The decoded answer.
    pub response: ResponseFrame,
    /// Classification of the answer's code.
    pub status: Status,
}

impl Exchange {
    pub fn code(&self) -> ResponseCode {
        self.response.code()
    }

    /// The response code, or the error a device refusal maps to.
    pub fn into_result(self) -> Result<ResponseCode> {
        match self.status.rejection() {
            Some(err) => Err(err),
            None => Ok(self.response.code()),
        }
    }
}

/// Runs command transactions over an exclusively owned channel.
///
/// One transaction is: build the frame, write and flush it, read the answer
/// (one quick retry if nothing arrived), decode and classify. Failed
/// transactions are never retried here.
pub struct Engine<C> {
    channel: C,
    config: ControlConfig,
}

impl<C: Channel> Engine<C> {
    /// Create an engine with default configuration.
    pub fn new(channel: C) -> Self {
        Self::with_config(channel, ControlConfig::default())
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(channel: C, config: ControlConfig) -> Self {
        Self { channel, config }
    }

    /// Build the frame a command would be sent as, without touching the channel.
    pub fn build(&self, command: &Command, overrides: &HeaderOverride) -> Result<CommandFrame> {
        Ok(build_frame_with_headers(
            command,
            overrides,
            self.config.headers(),
        )?)
    }

    /// Run one transaction and return the response code.
    ///
    /// Device refusals (`01`-`04`) come back as their matching error.
    pub fn execute(
        &mut self,
        command: &Command,
        overrides: &HeaderOverride,
    ) -> Result<ResponseCode> {
        self.transact(command, overrides)?.into_result()
    }

    /// Run one transaction and return everything observed.
    ///
    /// Only encoding, transport and unreadable-response failures are errors
    /// here; device refusals are reported through [`Exchange::status`].
    pub fn transact(&mut self, command: &Command, overrides: &HeaderOverride) -> Result<Exchange> {
        let frame = self.build(command, overrides)?;
        let wire = frame.encode(self.config.wire_format);

        debug!(
            command = %command,
            frame = %frame.to_hex(),
            wire = self.config.wire_format.name(),
            "sending command"
        );
        self.channel.write(&wire)?;
        self.channel.flush_output()?;

        let raw = self.receive()?;
        let response = decode_response(&raw, self.config.wire_format)?;

        if self.config.verify_response_checksum {
            response.verify_checksum()?;
        } else if response.checksum_ok() == Some(false) {
            warn!(
                expected = response.expected_checksum(),
                actual = ?response.checksum(),
                "response checksum mismatch"
            );
        }

        let status = Status::from_code(response.code());
        debug!(code = %response.code(), %status, "received response");

        Ok(Exchange {
            frame,
            response,
            status,
        })
    }

    fn receive(&mut self) -> Result<Bytes> {
        let raw = self.channel.read(FAST_READ_LEN)?;
        if !raw.is_empty() {
            return Ok(raw);
        }

        debug!("no response on first read; retrying");
        let raw = self.channel.read(RETRY_READ_LEN)?;
        if raw.is_empty() {
            return Err(ResponseError::NoResponse.into());
        }
        Ok(raw)
    }

    /// Current configuration.
    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Borrow the underlying channel.
    pub fn get_ref(&self) -> &C {
        &self.channel
    }

    /// Mutably borrow the underlying channel.
    pub fn get_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Consume the engine and return the channel.
    pub fn into_inner(self) -> C {
        self.channel
    }
}

impl<C> std::fmt::Debug for Engine<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
