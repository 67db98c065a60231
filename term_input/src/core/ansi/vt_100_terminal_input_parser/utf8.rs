// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! UTF-8 boundary detection for plain text input.

/// Result of looking for one UTF-8 encoded character at the start of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Scan {
    /// A valid character of this many bytes.
    Complete(usize),
    /// The lead byte is valid but continuation bytes haven't arrived yet.
    Incomplete,
    /// The first byte can't start a valid character.
    Invalid,
}

/// Byte length of a UTF-8 character from its lead byte. [`None`] for continuation
/// bytes and bytes that never appear in UTF-8.
#[must_use]
pub fn utf8_char_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn is_continuation_byte(byte: u8) -> bool { byte & 0b1100_0000 == 0b1000_0000 }

/// Looks for one complete UTF-8 character at the start of `buffer`.
#[must_use]
pub fn scan_utf8_char(buffer: &[u8]) -> Utf8Scan {
    let Some(&lead) = buffer.first() else {
        return Utf8Scan::Incomplete;
    };
    let Some(width) = utf8_char_width(lead) else {
        return Utf8Scan::Invalid;
    };

    let available = buffer.len().min(width);
    if !buffer[1..available].iter().all(|&it| is_continuation_byte(it)) {
        return Utf8Scan::Invalid;
    }
    if buffer.len() < width {
        return Utf8Scan::Incomplete;
    }

    // Rejects overlong encodings and surrogates.
    match std::str::from_utf8(&buffer[..width]) {
        Ok(_) => Utf8Scan::Complete(width),
        Err(_) => Utf8Scan::Invalid,
    }
}

/// Decodes the single character that makes up `bytes`, if that's what it is.
#[must_use]
pub fn decode_single_char(bytes: &[u8]) -> Option<char> {
    let text = std::str::from_utf8(bytes).ok()?;
    let mut chars = text.chars();
    let ch = chars.next()?;
    chars.next().is_none().then_some(ch)
}

#[cfg(test)]
mod tests_utf8 {
    use super::*;
    use test_case::test_case;

    #[test_case(b"a", Utf8Scan::Complete(1) ; "ascii")]
    #[test_case("é".as_bytes(), Utf8Scan::Complete(2) ; "two bytes")]
    #[test_case("😀!".as_bytes(), Utf8Scan::Complete(4) ; "four bytes then more")]
    #[test_case(&[0xE2, 0x82], Utf8Scan::Incomplete ; "split three byte char")]
    #[test_case(&[0x80], Utf8Scan::Invalid ; "lone continuation byte")]
    #[test_case(&[0xE2, b'a'], Utf8Scan::Invalid ; "lead then ascii")]
    #[test_case(&[0xED, 0xA0, 0x80], Utf8Scan::Invalid ; "surrogate")]
    fn test_scan(bytes: &[u8], expected: Utf8Scan) {
        assert_eq!(scan_utf8_char(bytes), expected);
    }

    #[test]
    fn test_decode_single_char() {
        assert_eq!(decode_single_char("ß".as_bytes()), Some('ß'));
        assert_eq!(decode_single_char(b"ab"), None);
        assert_eq!(decode_single_char(&[0xFF]), None);
    }
}
