//! UTF-8 code point decoding for the generic kernel paths
//!
//! Input is never rejected. A malformed sequence decodes to an
//! [`Utf8Unit::Invalid`] carrying the number of bytes to skip, which is always
//! at least one so every cursor makes forward progress. A sequence that is
//! structurally complete but illegal (overlong, surrogate, above U+10FFFF) is
//! skipped as a whole; any other malformation skips a single byte.
//!
//! Every unit, valid or not, counts as one character.

/// Decoded code points; invalid units are stored as `-(recovery length)`
pub type CodePointSequence = Vec<i32>;

/// One decoded unit of a byte string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Utf8Unit {
    Char { code_point: u32, len: usize },
    Invalid { recovery: usize },
}

impl Utf8Unit {
    /// Bytes consumed by this unit
    pub fn byte_len(&self) -> usize {
        match self {
            Utf8Unit::Char { len, .. } => *len,
            Utf8Unit::Invalid { recovery } => *recovery,
        }
    }

    pub fn code_point(&self) -> Option<u32> {
        match self {
            Utf8Unit::Char { code_point, .. } => Some(*code_point),
            Utf8Unit::Invalid { .. } => None,
        }
    }

    /// Comparable key: the code point, or the negated recovery length.
    ///
    /// Two invalid units with the same recovery length compare equal.
    pub fn key(&self) -> i32 {
        match self {
            Utf8Unit::Char { code_point, .. } => *code_point as i32,
            Utf8Unit::Invalid { recovery } => -(*recovery as i32),
        }
    }
}

/// Decode the unit starting at `offset`.
///
/// `offset` must be inside `bytes`; an offset at or past the end yields a
/// one-byte invalid unit.
pub fn decode_at(bytes: &[u8], offset: usize) -> Utf8Unit {
    let rest = match bytes.get(offset..) {
        Some(rest) if !rest.is_empty() => rest,
        _ => return Utf8Unit::Invalid { recovery: 1 },
    };

    let lead = rest[0];
    if lead < 0x80 {
        return Utf8Unit::Char { code_point: lead as u32, len: 1 };
    }

    let (len, min, init) = match lead {
        0xC0..=0xDF => (2, 0x80, (lead & 0x1F) as u32),
        0xE0..=0xEF => (3, 0x800, (lead & 0x0F) as u32),
        0xF0..=0xF7 => (4, 0x10000, (lead & 0x07) as u32),
        // Stray continuation byte or a lead byte no encoding uses
        _ => return Utf8Unit::Invalid { recovery: 1 },
    };

    if rest.len() < len {
        return Utf8Unit::Invalid { recovery: 1 };
    }

    let mut code_point = init;
    for &byte in &rest[1..len] {
        if byte & 0xC0 != 0x80 {
            return Utf8Unit::Invalid { recovery: 1 };
        }
        code_point = (code_point << 6) | (byte & 0x3F) as u32;
    }

    if code_point < min || (0xD800..=0xDFFF).contains(&code_point) || code_point > 0x10FFFF {
        return Utf8Unit::Invalid { recovery: len };
    }

    Utf8Unit::Char { code_point, len }
}

/// Iterator over the units of a byte string
#[derive(Debug, Clone)]
pub struct Utf8Units<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Utf8Units<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Utf8Units { bytes, pos: 0 }
    }

    /// Byte offset of the next unit
    pub fn offset(&self) -> usize {
        self.pos
    }
}

impl Iterator for Utf8Units<'_> {
    type Item = Utf8Unit;

    fn next(&mut self) -> Option<Utf8Unit> {
        if self.pos >= self.bytes.len() {
            return None;
        }
        let unit = decode_at(self.bytes, self.pos);
        self.pos += unit.byte_len();
        Some(unit)
    }
}

/// Decode the last unit of `bytes`, returning it with its starting offset.
///
/// Walks back over at most three continuation bytes; if the sequence found
/// there does not end exactly at the end of `bytes`, the final byte is
/// treated as a one-byte invalid unit.
pub fn decode_last(bytes: &[u8]) -> Option<(Utf8Unit, usize)> {
    let end = bytes.len();
    if end == 0 {
        return None;
    }
    let floor = end.saturating_sub(4);
    let mut start = end - 1;
    while start > floor && bytes[start] & 0xC0 == 0x80 {
        start -= 1;
    }
    let unit = decode_at(bytes, start);
    if start + unit.byte_len() == end {
        Some((unit, start))
    } else {
        Some((Utf8Unit::Invalid { recovery: 1 }, end - 1))
    }
}

/// Number of characters in `bytes`.
///
/// O(1) when the caller knows the input is ASCII, otherwise a decoding scan.
pub fn length(bytes: &[u8], is_ascii: bool) -> usize {
    if is_ascii {
        bytes.len()
    } else {
        Utf8Units::new(bytes).count()
    }
}

/// Byte offset reached by skipping `chars` characters starting at byte `from`,
/// clamped to the end of the input
pub fn advance(bytes: &[u8], from: usize, chars: usize) -> usize {
    let mut pos = from;
    for _ in 0..chars {
        if pos >= bytes.len() {
            return bytes.len();
        }
        pos += decode_at(bytes, pos).byte_len();
    }
    pos.min(bytes.len())
}

/// Byte range of `length` characters starting at 1-based character `start`.
///
/// The result is clamped to the input, so callers may pass counts that run
/// past the end. Under `is_ascii` this is pure arithmetic.
pub fn char_byte_range(bytes: &[u8], is_ascii: bool, start: usize, length: usize) -> (usize, usize) {
    debug_assert!(start >= 1);
    let skip = start.saturating_sub(1);
    if is_ascii {
        let begin = skip.min(bytes.len());
        let end = begin.saturating_add(length).min(bytes.len());
        return (begin, end);
    }
    let begin = advance(bytes, 0, skip);
    let end = advance(bytes, begin, length);
    (begin, end)
}

/// Materialize the units of `bytes` for random access
pub fn to_code_points(bytes: &[u8]) -> CodePointSequence {
    Utf8Units::new(bytes).map(|unit| unit.key()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_sequences() {
        assert_eq!(decode_at(b"a", 0), Utf8Unit::Char { code_point: 0x61, len: 1 });
        assert_eq!(decode_at("é".as_bytes(), 0), Utf8Unit::Char { code_point: 0xE9, len: 2 });
        assert_eq!(decode_at("€".as_bytes(), 0), Utf8Unit::Char { code_point: 0x20AC, len: 3 });
        assert_eq!(decode_at("😀".as_bytes(), 0), Utf8Unit::Char { code_point: 0x1F600, len: 4 });
    }

    #[test]
    fn test_decode_malformed_sequences() {
        // Stray continuation byte
        assert_eq!(decode_at(&[0x80], 0), Utf8Unit::Invalid { recovery: 1 });
        // Truncated three-byte sequence
        assert_eq!(decode_at(&[0xE2, 0x82], 0), Utf8Unit::Invalid { recovery: 1 });
        // Lead byte followed by a non-continuation byte
        assert_eq!(decode_at(&[0xC3, 0x41], 0), Utf8Unit::Invalid { recovery: 1 });
        // Overlong encoding of '/' is complete, so it is skipped whole
        assert_eq!(decode_at(&[0xC0, 0xAF], 0), Utf8Unit::Invalid { recovery: 2 });
        // UTF-16 surrogate U+D800
        assert_eq!(decode_at(&[0xED, 0xA0, 0x80], 0), Utf8Unit::Invalid { recovery: 3 });
        // Above U+10FFFF
        assert_eq!(decode_at(&[0xF4, 0x90, 0x80, 0x80], 0), Utf8Unit::Invalid { recovery: 4 });
        assert_eq!(decode_at(&[0xFF], 0), Utf8Unit::Invalid { recovery: 1 });
    }

    #[test]
    fn test_decode_past_end_still_progresses() {
        assert_eq!(decode_at(b"ab", 2).byte_len(), 1);
    }

    #[test]
    fn test_length() {
        assert_eq!(length(b"hello", true), 5);
        assert_eq!(length(b"hello", false), 5);
        assert_eq!(length("héllo".as_bytes(), false), 5);
        assert_eq!(length(b"", false), 0);
        // Each malformed unit counts once
        assert_eq!(length(&[b'a', 0x80, 0x80, b'b'], false), 4);
        assert_eq!(length(&[0xED, 0xA0, 0x80], false), 1);
    }

    #[test]
    fn test_char_byte_range() {
        let text = "aé€😀b".as_bytes();
        assert_eq!(char_byte_range(text, false, 1, 1), (0, 1));
        assert_eq!(char_byte_range(text, false, 2, 2), (1, 6));
        assert_eq!(char_byte_range(text, false, 4, 10), (6, 11));
        assert_eq!(char_byte_range(text, false, 6, 1), (11, 11));

        assert_eq!(char_byte_range(b"Hello World", true, 7, 5), (6, 11));
        assert_eq!(char_byte_range(b"Hello", true, 3, usize::MAX), (2, 5));
    }

    #[test]
    fn test_ascii_and_generic_ranges_agree() {
        let text = b"The quick brown fox";
        for start in 1..=text.len() {
            for len in 0..=text.len() + 1 {
                assert_eq!(
                    char_byte_range(text, true, start, len),
                    char_byte_range(text, false, start, len),
                    "start={} len={}",
                    start,
                    len
                );
            }
        }
    }

    #[test]
    fn test_decode_last() {
        assert_eq!(decode_last(b""), None);
        assert_eq!(decode_last(b"ab"), Some((Utf8Unit::Char { code_point: 0x62, len: 1 }, 1)));
        let text = "a€".as_bytes();
        assert_eq!(decode_last(text), Some((Utf8Unit::Char { code_point: 0x20AC, len: 3 }, 1)));
        // Dangling lead byte at the end
        assert_eq!(decode_last(&[b'a', 0xE2]), Some((Utf8Unit::Invalid { recovery: 1 }, 1)));
        // Lone continuation bytes are peeled one at a time
        assert_eq!(decode_last(&[b'a', 0x80, 0x80]), Some((Utf8Unit::Invalid { recovery: 1 }, 2)));
    }

    #[test]
    fn test_to_code_points() {
        assert_eq!(to_code_points("aé".as_bytes()), vec![0x61, 0xE9]);
        assert_eq!(to_code_points(&[b'x', 0xC0, 0xAF]), vec![0x78, -2]);
    }
}
