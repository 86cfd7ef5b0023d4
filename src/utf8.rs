//! Decodes single UTF-8 characters from a byte buffer. The decoder is strict:
//! overlong forms, surrogates, code points above U+10FFFF and sequences that
//! are cut short by the end of the buffer are all rejected.

/// The result of decoding a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// A well formed character 'ch' that occupies 'len' bytes.
    Valid { ch: char, len: usize },
    /// The bytes at the start of the buffer are not a valid UTF-8 sequence.
    Invalid,
}

impl Step {
    /// Returns the number of bytes the character occupies, or None if the
    /// sequence was invalid.
    pub fn len(&self) -> Option<usize> {
        match self {
            Step::Valid { len, .. } => Some(*len),
            Step::Invalid => None,
        }
    }
}

/// Returns the width of the sequence that starts with the byte 'first', or
/// None if 'first' can't start a sequence.
pub fn width(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn is_cont(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Decode the character at the start of 'bytes'.
pub fn next_char(bytes: &[u8]) -> Step {
    let Some(&b0) = bytes.first() else {
        return Step::Invalid;
    };
    let Some(len) = width(b0) else {
        return Step::Invalid;
    };
    if len == 1 {
        return Step::Valid {
            ch: b0 as char,
            len,
        };
    }
    if bytes.len() < len || !bytes[1..len].iter().all(|&b| is_cont(b)) {
        return Step::Invalid;
    }

    let unicode = match len {
        2 => ((b0 & 0x1F) as u32) << 6 | (bytes[1] & 0x3F) as u32,
        3 => {
            ((b0 & 0x0F) as u32) << 12
                | ((bytes[1] & 0x3F) as u32) << 6
                | (bytes[2] & 0x3F) as u32
        }
        _ => {
            ((b0 & 0x07) as u32) << 18
                | ((bytes[1] & 0x3F) as u32) << 12
                | ((bytes[2] & 0x3F) as u32) << 6
                | (bytes[3] & 0x3F) as u32
        }
    };

    // Reject overlong forms. The two byte overlong forms are already excluded
    // by the leading byte range.
    let min = match len {
        2 => 0x80,
        3 => 0x800,
        _ => 0x10000,
    };
    if unicode < min {
        return Step::Invalid;
    }

    // Surrogates and values above U+10FFFF have no char representation.
    match char::from_u32(unicode) {
        Some(ch) => Step::Valid { ch, len },
        None => Step::Invalid,
    }
}
