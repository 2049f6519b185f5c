use bytes::Bytes;

use crate::error::Result;

/// A blocking, point-to-point byte channel.
///
/// Every read is bounded by a timeout owned by the channel itself (fixed when
/// the channel is built). A read that times out returns whatever arrived,
/// which may be nothing at all.
pub trait Channel {
    /// Write all of `bytes` (blocking).
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Make sure queued output has been handed to the device.
    fn flush_output(&mut self) -> Result<()>;

    /// Read up to `max_bytes`, returning early when the timeout elapses.
    fn read(&mut self, max_bytes: usize) -> Result<Bytes>;
}

impl<C: Channel + ?Sized> Channel for &mut C {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn flush_output(&mut self) -> Result<()> {
        (**self).flush_output()
    }

    fn read(&mut self, max_bytes: usize) -> Result<Bytes> {
        (**self).read(max_bytes)
    }
}

impl<C: Channel + ?Sized> Channel for Box<C> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn flush_output(&mut self) -> Result<()> {
        (**self).flush_output()
    }

    fn read(&mut self, max_bytes: usize) -> Result<Bytes> {
        (**self).read(max_bytes)
    }
}
