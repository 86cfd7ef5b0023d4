pub mod filter;
pub mod utf8;
pub mod utils;

use thiserror::Error;

/// Stores information about the environment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Context {
    /// Specifies the size of the intermediate buffer used when pumping a
    /// source into a sink.
    buffer_size: usize,
}

impl Context {
    pub fn new(buffer_size: usize) -> Self {
        Self { buffer_size }
    }

    /// Returns the size of the intermediate buffer. A zero size is rounded up
    /// so that every pump iteration can make progress.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size.max(1)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(4096)
    }
}

/// A terminal condition reported by a source. Once a source reports a
/// condition it keeps reporting the same one on every following read.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Condition {
    /// The source is exhausted. This is the normal way for a stream to end.
    #[error("end of stream")]
    EndOfStream,
    /// The source contains a malformed encoding unit at byte 'offset'.
    #[error("invalid UTF-8 sequence at byte offset {offset}")]
    DecodeError { offset: usize },
}

impl Condition {
    /// Return True if this condition is the clean end of the stream.
    pub fn is_eof(&self) -> bool {
        matches!(self, Condition::EndOfStream)
    }
}

/// A trait that defines the interface for pulling bytes out of a stream.
pub trait Source {
    /// Fill 'buf' with up to 'buf.len()' bytes and return the number of bytes
    /// written. A call may fill fewer bytes than requested, even zero, without
    /// the stream being over; the end of the stream and failures are reported
    /// as a condition on a call that transfers no bytes. An empty 'buf' always
    /// returns Ok(0).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Condition>;
}

/// A trait that defines the interface for pushing bytes into a stream.
pub trait Sink {
    /// Drain 'buf' into the sink and return the number of bytes that were
    /// accepted.
    #[must_use]
    fn write(&mut self, buf: &[u8]) -> usize;
}

impl Sink for Vec<u8> {
    fn write(&mut self, buf: &[u8]) -> usize {
        self.extend_from_slice(buf);
        buf.len()
    }
}
