use std::io::{ErrorKind, Read, Write};

use bytes::{Bytes, BytesMut};
use tracing::trace;

use crate::error::{Result, TransportError};
use crate::traits::Channel;

/// A [`Channel`] over any blocking `Read + Write` stream.
///
/// The stream's own timeout (if any) bounds each read. `TimedOut` and
/// `WouldBlock` end a read with whatever has arrived so far; EOF does the same.
pub struct StreamChannel<T> {
    inner: T,
}

impl<T: Read + Write> StreamChannel<T> {
    /// Wrap a stream.
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the channel and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read + Write> Channel for StreamChannel<T> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        write_all(&mut self.inner, bytes)
    }

    fn flush_output(&mut self) -> Result<()> {
        flush(&mut self.inner)
    }

    fn read(&mut self, max_bytes: usize) -> Result<Bytes> {
        let mut buf = BytesMut::zeroed(max_bytes);
        let mut filled = 0usize;

        while filled < max_bytes {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => {
                    trace!(bytes = n, "read chunk");
                    filled += n;
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err)
                    if err.kind() == ErrorKind::TimedOut || err.kind() == ErrorKind::WouldBlock =>
                {
                    break
                }
                Err(err) => return Err(TransportError::Io(err)),
            }
        }

        buf.truncate(filled);
        Ok(buf.freeze())
    }
}

/// Write every byte, retrying `Interrupted` and `WouldBlock`.
///
/// A writer that accepts zero bytes is treated as closed.
pub(crate) fn write_all<W: Write + ?Sized>(writer: &mut W, bytes: &[u8]) -> Result<()> {
    let mut offset = 0usize;
    while offset < bytes.len() {
        match writer.write(&bytes[offset..]) {
            Ok(0) => return Err(TransportError::ConnectionClosed),
            Ok(n) => offset += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
            Err(err) => return Err(TransportError::Io(err)),
        }
    }
    Ok(())
}

pub(crate) fn flush<W: Write + ?Sized>(writer: &mut W) -> Result<()> {
    loop {
        match writer.flush() {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
            Err(err) => return Err(TransportError::Io(err)),
        }
    }
}

impl<T> std::fmt::Debug for StreamChannel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamChannel").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;

    /// Reads come from `input`, writes land in `output`.
    #[derive(Default)]
    struct Duplex {
        input: Cursor<Vec<u8>>,
        output: Vec<u8>,
        flushed: Arc<AtomicBool>,
    }

    impl Duplex {
        fn with_input(bytes: &[u8]) -> Self {
            Self {
                input: Cursor::new(bytes.to_vec()),
                ..Self::default()
            }
        }
    }

    impl Read for Duplex {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for Duplex {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.output.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn write_and_flush_reach_stream() {
        let duplex = Duplex::default();
        let flag = Arc::clone(&duplex.flushed);
        let mut channel = StreamChannel::new(duplex);

        channel.write(b"8C00000201").unwrap();
        channel.flush_output().unwrap();

        assert!(flag.load(Ordering::SeqCst));
        assert_eq!(channel.into_inner().output, b"8C00000201");
    }

    #[test]
    fn read_stops_at_max_bytes() {
        let mut channel = StreamChannel::new(Duplex::with_input(b"700003700003"));
        let first = channel.read(6).unwrap();
        assert_eq!(first.as_ref(), b"700003");
        let second = channel.read(3).unwrap();
        assert_eq!(second.as_ref(), b"700");
    }

    #[test]
    fn read_returns_short_on_eof() {
        let mut channel = StreamChannel::new(Duplex::with_input(b"70"));
        let got = channel.read(6).unwrap();
        assert_eq!(got.as_ref(), b"70");
    }

    #[test]
    fn read_returns_empty_when_nothing_arrives() {
        let mut channel = StreamChannel::new(Duplex::default());
        assert!(channel.read(6).unwrap().is_empty());
    }

    #[test]
    fn timed_out_read_keeps_partial_bytes() {
        let mut channel = StreamChannel::new(TimeoutAfter {
            bytes: b"7000".to_vec(),
            pos: 0,
        });
        let got = channel.read(6).unwrap();
        assert_eq!(got.as_ref(), b"7000");
    }

    #[test]
    fn interrupted_read_retries() {
        let mut channel = StreamChannel::new(InterruptedOnce {
            interrupted: false,
            inner: Cursor::new(b"700003".to_vec()),
        });
        let got = channel.read(6).unwrap();
        assert_eq!(got.as_ref(), b"700003");
    }

    #[test]
    fn other_read_errors_propagate() {
        let mut channel = StreamChannel::new(BrokenPipe);
        let err = channel.read(6).unwrap_err();
        assert!(matches!(err, TransportError::Io(e) if e.kind() == ErrorKind::BrokenPipe));
    }

    #[test]
    fn connection_closed_when_write_returns_zero() {
        let mut channel = StreamChannel::new(BrokenPipe);
        let err = channel.write(b"x").unwrap_err();
        assert!(matches!(err, TransportError::ConnectionClosed));
    }

    #[test]
    fn handles_interrupted_write_and_flush() {
        let mut channel = StreamChannel::new(InterruptedOnce {
            interrupted: false,
            inner: Cursor::new(Vec::new()),
        });
        channel.write(b"retry").unwrap();
        channel.flush_output().unwrap();
        assert_eq!(channel.get_ref().inner.get_ref().as_slice(), b"retry");
    }

    #[test]
    fn accessors_and_into_inner() {
        let mut channel = StreamChannel::new(Duplex::default());
        let _ = channel.get_ref();
        let _ = channel.get_mut();
        let _inner = channel.into_inner();
    }

    struct TimeoutAfter {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for TimeoutAfter {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() {
                return Err(std::io::Error::from(ErrorKind::TimedOut));
            }
            let n = (self.bytes.len() - self.pos).min(buf.len()).min(2);
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    impl Write for TimeoutAfter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct InterruptedOnce {
        interrupted: bool,
        inner: Cursor<Vec<u8>>,
    }

    impl InterruptedOnce {
        fn trip(&mut self) -> Option<std::io::Error> {
            if self.interrupted {
                return None;
            }
            self.interrupted = true;
            Some(std::io::Error::from(ErrorKind::Interrupted))
        }
    }

    impl Read for InterruptedOnce {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if let Some(err) = self.trip() {
                return Err(err);
            }
            self.inner.read(buf)
        }
    }

    impl Write for InterruptedOnce {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if let Some(err) = self.trip() {
                return Err(err);
            }
            self.inner.write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::BrokenPipe))
        }
    }

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
