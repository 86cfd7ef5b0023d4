use asciistream::filter::{AsciiFilter, State};
use asciistream::{Condition, Source};

/// Pull everything out of 'filter' using reads of 'size' bytes. Returns the
/// collected bytes and the condition that ended the stream.
fn drain(filter: &mut AsciiFilter, size: usize) -> (Vec<u8>, Condition) {
    let mut buffer = vec![0; size];
    let mut output = Vec::new();
    loop {
        match filter.read(&mut buffer) {
            Ok(n) => output.extend(&buffer[..n]),
            Err(condition) => return (output, condition),
        }
    }
}

#[test]
fn test_ascii_passes_through() {
    let text = "entropy encoding is typically the last stage of a pipeline";
    for size in [1, 2, 3, 7, 64, 1024] {
        let mut filter = AsciiFilter::new(text);
        let (output, condition) = drain(&mut filter, size);
        assert_eq!(output, text.as_bytes());
        assert_eq!(condition, Condition::EndOfStream);
        assert_eq!(filter.state(), State::EndOfStream);
        assert_eq!(filter.position(), text.len());
        assert_eq!(filter.remaining(), 0);
    }
}

#[test]
fn test_empty_source() {
    let mut filter = AsciiFilter::new("");
    assert_eq!(filter.state(), State::EndOfStream);
    let mut buffer = [0; 4];
    assert_eq!(filter.read(&mut buffer), Err(Condition::EndOfStream));
    assert_eq!(filter.read(&mut buffer), Err(Condition::EndOfStream));
}

#[test]
fn test_empty_buffer_is_a_nop() {
    let mut empty: [u8; 0] = [];

    // Fresh filter.
    let mut filter = AsciiFilter::new("abc");
    assert_eq!(filter.read(&mut empty), Ok(0));
    assert_eq!(filter.position(), 0);
    assert_eq!(filter.state(), State::Active);

    // Empty source, with a pre-latched condition.
    let mut filter = AsciiFilter::new("");
    assert_eq!(filter.read(&mut empty), Ok(0));

    // After a decode error was latched.
    let mut filter = AsciiFilter::from_bytes(b"a\xffb");
    let mut buffer = [0; 8];
    assert_eq!(filter.read(&mut buffer), Ok(1));
    assert_eq!(filter.read(&mut empty), Ok(0));
    assert_eq!(filter.position(), 1);
    assert_eq!(filter.state(), State::DecodeError);
}

#[test]
fn test_multibyte_chars_are_dropped() {
    let mut filter = AsciiFilter::new("ab的c");
    let mut buffer = [0; 16];
    assert_eq!(filter.read(&mut buffer), Ok(3));
    assert_eq!(&buffer[..3], b"abc");
    assert_eq!(filter.read(&mut buffer), Err(Condition::EndOfStream));

    let text = "größe: 12€, naïve café 🎉!";
    let mut filter = AsciiFilter::new(text);
    let (output, condition) = drain(&mut filter, 5);
    assert_eq!(output, b"gre: 12, nave caf !");
    assert_eq!(condition, Condition::EndOfStream);
}

#[test]
fn test_only_multibyte_chars() {
    // The call that skips the last characters returns no bytes and the end of
    // the stream is only reported by the next call.
    let mut filter = AsciiFilter::new("的的");
    let mut buffer = [0; 4];
    assert_eq!(filter.read(&mut buffer), Ok(0));
    assert_eq!(filter.state(), State::EndOfStream);
    assert_eq!(filter.read(&mut buffer), Err(Condition::EndOfStream));
}

#[test]
fn test_decode_error_is_reported_on_the_next_call() {
    let mut filter = AsciiFilter::from_bytes(b"abc\x80def");
    let mut buffer = [0; 16];
    assert_eq!(filter.read(&mut buffer), Ok(3));
    assert_eq!(&buffer[..3], b"abc");
    assert_eq!(filter.state(), State::DecodeError);
    assert_eq!(filter.position(), 3);
    assert_eq!(
        filter.read(&mut buffer),
        Err(Condition::DecodeError { offset: 3 })
    );
}

#[test]
fn test_decode_error_after_multibyte_char() {
    // A truncated sequence at the end of the input.
    let mut bytes = "x的y".as_bytes().to_vec();
    bytes.extend_from_slice(&"的".as_bytes()[..2]);
    let mut filter = AsciiFilter::from_bytes(&bytes);
    let (output, condition) = drain(&mut filter, 1);
    assert_eq!(output, b"xy");
    assert_eq!(condition, Condition::DecodeError { offset: 5 });
}

#[test]
fn test_decode_error_at_start() {
    let mut filter = AsciiFilter::from_bytes(&[0xC0, 0x80, b'a']);
    let mut buffer = [0; 4];
    assert_eq!(filter.read(&mut buffer), Ok(0));
    assert_eq!(
        filter.read(&mut buffer),
        Err(Condition::DecodeError { offset: 0 })
    );
}

#[test]
fn test_latched_condition_is_sticky() {
    let mut filter = AsciiFilter::from_bytes(b"ok\xfe");
    let mut buffer = [0; 8];
    assert_eq!(filter.read(&mut buffer), Ok(2));

    for _ in 0..10 {
        let mut buffer = [0x55; 8];
        assert_eq!(
            filter.read(&mut buffer),
            Err(Condition::DecodeError { offset: 2 })
        );
        assert_eq!(buffer, [0x55; 8]);
        assert_eq!(filter.position(), 2);
    }

    let mut filter = AsciiFilter::new("ok");
    assert_eq!(filter.read(&mut buffer), Ok(2));
    for _ in 0..10 {
        let mut buffer = [0x55; 8];
        assert_eq!(filter.read(&mut buffer), Err(Condition::EndOfStream));
        assert_eq!(buffer, [0x55; 8]);
    }
}

#[test]
fn test_buffer_fills_exactly_at_end_of_stream() {
    let mut filter = AsciiFilter::new("abc");
    let mut buffer = [0; 3];
    assert_eq!(filter.read(&mut buffer), Ok(3));
    assert_eq!(&buffer, b"abc");
    assert_eq!(filter.state(), State::EndOfStream);
    assert_eq!(filter.read(&mut buffer), Err(Condition::EndOfStream));

    // The same when the ASCII characters are the tail of the source.
    let mut filter = AsciiFilter::new("的ab");
    let mut buffer = [0; 2];
    assert_eq!(filter.read(&mut buffer), Ok(2));
    assert_eq!(&buffer, b"ab");
    assert_eq!(filter.read(&mut buffer), Err(Condition::EndOfStream));
}

#[test]
fn test_full_buffer_stops_before_trailing_multibyte() {
    // The buffer fills before the trailing character is decoded, so the
    // stream is still active after the first call.
    let mut filter = AsciiFilter::new("ab的");
    let mut buffer = [0; 2];
    assert_eq!(filter.read(&mut buffer), Ok(2));
    assert_eq!(filter.state(), State::Active);
    assert_eq!(filter.read(&mut buffer), Ok(0));
    assert_eq!(filter.state(), State::EndOfStream);
    assert_eq!(filter.read(&mut buffer), Err(Condition::EndOfStream));
}

#[test]
fn test_io_read_adapter() {
    use std::io::Read;

    let mut filter = AsciiFilter::new("的的的a的的b");
    let mut output = String::new();
    filter.read_to_string(&mut output).unwrap();
    assert_eq!(output, "ab");

    let mut filter = AsciiFilter::new("的的的");
    let mut output = Vec::new();
    assert_eq!(filter.read_to_end(&mut output).unwrap(), 0);

    let mut filter = AsciiFilter::from_bytes(b"abc\xffd");
    let mut output = Vec::new();
    let err = filter.read_to_end(&mut output).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert_eq!(output, b"abc");
    let inner = err.into_inner().unwrap();
    let condition = inner.downcast_ref::<Condition>().unwrap();
    assert_eq!(*condition, Condition::DecodeError { offset: 3 });
}

#[test]
fn test_condition_display() {
    assert_eq!(Condition::EndOfStream.to_string(), "end of stream");
    assert_eq!(
        Condition::DecodeError { offset: 7 }.to_string(),
        "invalid UTF-8 sequence at byte offset 7"
    );
    assert!(Condition::EndOfStream.is_eof());
    assert!(!Condition::DecodeError { offset: 0 }.is_eof());
}
