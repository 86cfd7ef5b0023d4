//! The 'AsciiFilter' decodes UTF-8 text and hands out only the characters that
//! are encoded in a single byte. Multi-byte characters are dropped.
//!
//! The end of the stream and decoding failures are detected while filling a
//! buffer, but they are not reported by the call that detected them. The
//! filter latches the condition and reports it on the next call, so the call
//! that detected it can still return the bytes it collected.

use crate::utf8::{next_char, Step};
use crate::{Condition, Source};
use std::io;

/// The states of the filter. 'EndOfStream' and 'DecodeError' are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Active,
    EndOfStream,
    DecodeError,
}

/// A stream of the ASCII characters of some UTF-8 text.
#[derive(Debug, Clone)]
pub struct AsciiFilter<'a> {
    /// The encoded text.
    source: &'a [u8],
    /// The offset of the next unread byte in 'source'.
    cursor: usize,
    /// The latched terminal condition.
    terminal: Option<Condition>,
}

impl<'a> AsciiFilter<'a> {
    /// Creates a new filter over the text 'text'.
    pub fn new(text: &'a str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// Creates a new filter over 'bytes', which are expected to be UTF-8. Any
    /// malformed sequence ends the stream with a decode error.
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        let terminal = if bytes.is_empty() {
            Some(Condition::EndOfStream)
        } else {
            None
        };
        Self {
            source: bytes,
            cursor: 0,
            terminal,
        }
    }

    /// Returns the current state of the filter.
    pub fn state(&self) -> State {
        match self.terminal {
            None => State::Active,
            Some(Condition::EndOfStream) => State::EndOfStream,
            Some(Condition::DecodeError { .. }) => State::DecodeError,
        }
    }

    /// Returns the latched condition, if any.
    pub fn condition(&self) -> Option<Condition> {
        self.terminal
    }

    /// Returns the offset of the next unread byte of the source.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Returns the number of source bytes that were not consumed yet.
    pub fn remaining(&self) -> usize {
        self.source.len() - self.cursor
    }

    fn latch(&mut self, condition: Condition) {
        debug_assert!(self.terminal.is_none(), "Condition already latched");
        log::trace!("Latched '{}' at offset {}", condition, self.cursor);
        self.terminal = Some(condition);
    }

    fn read_impl(&mut self, buf: &mut [u8]) -> Result<usize, Condition> {
        if buf.is_empty() {
            return Ok(0);
        }
        if let Some(condition) = self.terminal {
            return Err(condition);
        }

        let mut written = 0;
        while written < buf.len() {
            let len = match next_char(&self.source[self.cursor..]) {
                Step::Valid { len, .. } => len,
                Step::Invalid => {
                    self.latch(Condition::DecodeError {
                        offset: self.cursor,
                    });
                    return Ok(written);
                }
            };

            // Single byte characters are ASCII and are copied as-is.
            if len == 1 {
                buf[written] = self.source[self.cursor];
                written += 1;
            }
            self.cursor += len;

            if self.cursor == self.source.len() {
                self.latch(Condition::EndOfStream);
                return Ok(written);
            }
        }
        Ok(written)
    }
}

impl<'a> Source for AsciiFilter<'a> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Condition> {
        self.read_impl(buf)
    }
}

impl<'a> io::Read for AsciiFilter<'a> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        // A read that only skipped multi-byte characters returns zero bytes,
        // which 'io::Read' would take for the end of the stream. Every such
        // read moves the cursor or latches a condition, so this terminates.
        loop {
            match self.read_impl(buf) {
                Ok(0) => continue,
                Ok(n) => return Ok(n),
                Err(Condition::EndOfStream) => return Ok(0),
                Err(err) => {
                    return Err(io::Error::new(io::ErrorKind::InvalidData, err))
                }
            }
        }
    }
}
