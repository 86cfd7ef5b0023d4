//! A collection of utilities for driving sources and sinks.

/// Pumps bytes from a source into a sink.
pub mod stream {
    use crate::{Condition, Context, Sink, Source};
    use thiserror::Error;

    /// The ways a copy can fail.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
    pub enum CopyError {
        /// The source reported a malformed sequence at byte 'offset'.
        #[error("invalid UTF-8 sequence at byte offset {offset}")]
        Decode { offset: usize },
        /// The sink stopped accepting bytes after 'written' bytes.
        #[error("sink stopped accepting bytes after {written} bytes")]
        ShortWrite { written: usize },
    }

    /// Drain all of 'chunk' into 'sink'. Returns false if the sink stopped
    /// accepting bytes, and adds the accepted bytes to 'written'.
    fn drain<K: Sink + ?Sized>(sink: &mut K, chunk: &[u8], written: &mut usize) -> bool {
        let mut pos = 0;
        while pos < chunk.len() {
            let accepted = sink.write(&chunk[pos..]);
            if accepted == 0 {
                return false;
            }
            pos += accepted;
            *written += accepted;
        }
        true
    }

    /// Read 'src' until the end of the stream and write everything into
    /// 'sink', using a buffer of 'ctx.buffer_size()' bytes. Returns the number
    /// of bytes that were copied.
    pub fn copy<S, K>(src: &mut S, sink: &mut K, ctx: Context) -> Result<usize, CopyError>
    where
        S: Source + ?Sized,
        K: Sink + ?Sized,
    {
        let mut buffer = vec![0u8; ctx.buffer_size()];
        let mut written = 0;

        loop {
            match src.read(&mut buffer) {
                Ok(n) => {
                    if !drain(sink, &buffer[..n], &mut written) {
                        log::debug!("Sink is full after {} bytes", written);
                        return Err(CopyError::ShortWrite { written });
                    }
                }
                Err(Condition::EndOfStream) => {
                    log::debug!("Copied {} bytes", written);
                    return Ok(written);
                }
                Err(Condition::DecodeError { offset }) => {
                    log::debug!("Copy failed after {} bytes", written);
                    return Err(CopyError::Decode { offset });
                }
            }
        }
    }

    /// Read 'src' until the end of the stream and return the collected bytes.
    pub fn read_to_end<S: Source + ?Sized>(
        src: &mut S,
        ctx: Context,
    ) -> Result<Vec<u8>, CopyError> {
        let mut output = Vec::new();
        copy(src, &mut output, ctx)?;
        Ok(output)
    }
}

/// Helpers for working with ASCII text.
pub mod ascii {
    use crate::filter::AsciiFilter;
    use crate::Source;

    /// Returns the ASCII characters of 'text'.
    pub fn filter_ascii(text: &str) -> String {
        let mut filter = AsciiFilter::new(text);
        let mut output = String::with_capacity(text.len());
        let mut buffer = [0u8; 256];
        // A str is always valid UTF-8, so the only condition is the end of
        // the stream.
        while let Ok(n) = filter.read(&mut buffer) {
            output.extend(buffer[..n].iter().map(|&b| char::from(b)));
        }
        output
    }

    /// Return True if every byte in 'input' is in the ASCII range.
    pub fn is_ascii_only(input: &[u8]) -> bool {
        input.iter().all(|b| b.is_ascii())
    }
}
