use std::collections::VecDeque;

use bytes::Bytes;
use xbrlink_transport::{Channel, Result};

/// One call made on a [`ScriptedChannel`], in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Write,
    Flush,
    Read(usize),
}

/// Channel double: records writes and answers reads from a script.
///
/// Each scripted reply is returned by one `read` call, cut to the requested
/// size. An exhausted script reads as a timeout (zero bytes).
#[derive(Debug, Default)]
pub(crate) struct ScriptedChannel {
    pub replies: VecDeque<Vec<u8>>,
    pub written: Vec<u8>,
    pub writes: usize,
    pub flushes: usize,
    pub read_sizes: Vec<usize>,
    pub events: Vec<Event>,
}

impl ScriptedChannel {
    pub fn replying<I, R>(replies: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        Self {
            replies: replies.into_iter().map(|r| r.as_ref().to_vec()).collect(),
            ..Self::default()
        }
    }

    pub fn silent() -> Self {
        Self::default()
    }
}

impl Channel for ScriptedChannel {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.writes += 1;
        self.events.push(Event::Write);
        self.written.extend_from_slice(bytes);
        Ok(())
    }

    fn flush_output(&mut self) -> Result<()> {
        self.flushes += 1;
        self.events.push(Event::Flush);
        Ok(())
    }

    fn read(&mut self, max_bytes: usize) -> Result<Bytes> {
        self.read_sizes.push(max_bytes);
        self.events.push(Event::Read(max_bytes));
        let mut reply = self.replies.pop_front().unwrap_or_default();
        reply.truncate(max_bytes);
        Ok(Bytes::from(reply))
    }
}
