// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Splits a byte buffer into complete sequences before classification.
//!
//! The `more` flag tells the splitter whether more bytes are known to be on the way
//! (either later in the same read, or because the read filled its buffer). A lone
//! `ESC` is only reported as the Escape key once `more` is `false`.
//!
//! An unterminated CSI, OSC, or SS3 prefix keeps waiting even when `more` is `false`,
//! because terminal replies (color queries, device attributes) are often split
//! across reads. The cost is that a prefix which never gets its final byte absorbs
//! whatever arrives next: `ESC [ 1` followed by a typed `a` decodes as one unknown
//! `ESC [ 1 a`. Waiting is bounded by [`MAX_PENDING_CSI_LEN`] and
//! [`MAX_PENDING_OSC_LEN`]; a longer prefix is cut and decodes as
//! [`InputEvent::Unknown`], so the bytes after it decode normally. At end of input
//! [`InputDecoder::flush()`] reports any leftover prefix the same way.
//!
//! [`InputDecoder::flush()`]: super::InputDecoder::flush
//! [`InputEvent::Unknown`]: crate::InputEvent::Unknown

use super::{Utf8Scan, scan_utf8_char};
use crate::{ANSI_BEL, ANSI_CSI_BRACKET, ANSI_ESC, ANSI_OSC_BRACKET, ANSI_SS3_O,
            ANSI_ST_BACKSLASH, CSI_FINAL_BYTE_RANGE, CSI_INTERMEDIATE_BYTE_RANGE,
            CSI_PARAM_BYTE_RANGE, MOUSE_X10_MARKER, MOUSE_X10_SEQUENCE_LEN,
            URXVT_SHIFT_SUFFIX};

/// Longest unterminated CSI or SS3 prefix that is kept waiting for its final byte.
pub const MAX_PENDING_CSI_LEN: usize = 64;

/// Longest unterminated OSC that is kept waiting for its terminator.
pub const MAX_PENDING_OSC_LEN: usize = 4_096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceBoundary {
    /// The first `n` bytes form one sequence (or one plain character).
    Complete(usize),
    /// Wait for more bytes.
    Incomplete,
}

/// Finds the end of the first sequence in `buffer`.
#[must_use]
pub fn find_sequence_boundary(buffer: &[u8], more: bool) -> SequenceBoundary {
    match buffer {
        [] => SequenceBoundary::Incomplete,
        [ANSI_ESC] => wait_if(more, 1),
        [ANSI_ESC, ANSI_CSI_BRACKET, ..] => csi_boundary(buffer, more),
        [ANSI_ESC, ANSI_OSC_BRACKET, ..] => osc_boundary(buffer, more),
        [ANSI_ESC, ANSI_SS3_O, ..] => ss3_boundary(buffer, more),
        [ANSI_ESC, ANSI_ESC, ..] => match find_sequence_boundary(&buffer[1..], more) {
            SequenceBoundary::Complete(len) => SequenceBoundary::Complete(len + 1),
            SequenceBoundary::Incomplete => SequenceBoundary::Incomplete,
        },
        [ANSI_ESC, rest @ ..] => match scan_utf8_char(rest) {
            Utf8Scan::Complete(width) => SequenceBoundary::Complete(width + 1),
            Utf8Scan::Incomplete => SequenceBoundary::Incomplete,
            Utf8Scan::Invalid => SequenceBoundary::Complete(1),
        },
        _ => match scan_utf8_char(buffer) {
            Utf8Scan::Complete(width) => SequenceBoundary::Complete(width),
            Utf8Scan::Incomplete => SequenceBoundary::Incomplete,
            Utf8Scan::Invalid => SequenceBoundary::Complete(1),
        },
    }
}

fn wait_if(more: bool, len: usize) -> SequenceBoundary {
    if more {
        SequenceBoundary::Incomplete
    } else {
        SequenceBoundary::Complete(len)
    }
}

/// Keeps waiting for the rest of a sequence unless `len` bytes is already too long,
/// in which case the whole prefix is cut as one sequence.
fn wait_unless_longer_than(max_len: usize, len: usize) -> SequenceBoundary {
    if len >= max_len {
        SequenceBoundary::Complete(len)
    } else {
        SequenceBoundary::Incomplete
    }
}

fn csi_boundary(buffer: &[u8], more: bool) -> SequenceBoundary {
    let len = buffer.len();
    if len == 2 {
        // `ESC [` on its own is Alt+[.
        return wait_if(more, 2);
    }

    match buffer[2] {
        // Linux console function keys: `ESC [ [ A`.
        ANSI_CSI_BRACKET => {
            return if len >= 4 {
                SequenceBoundary::Complete(4)
            } else {
                wait_if(more, len)
            };
        }
        // X10 mouse: `ESC [ M` followed by three raw bytes.
        MOUSE_X10_MARKER => {
            return if len >= MOUSE_X10_SEQUENCE_LEN {
                SequenceBoundary::Complete(MOUSE_X10_SEQUENCE_LEN)
            } else {
                wait_if(more, len)
            };
        }
        _ => {}
    }

    let mut idx = 2;
    while idx < len && CSI_PARAM_BYTE_RANGE.contains(&buffer[idx]) {
        idx += 1;
    }
    if idx == len {
        return wait_unless_longer_than(MAX_PENDING_CSI_LEN, len);
    }

    // urxvt terminates shifted keys with `$`, which is otherwise an intermediate byte.
    if buffer[idx] == URXVT_SHIFT_SUFFIX {
        match buffer.get(idx + 1) {
            None => return wait_if(more, idx + 1),
            Some(next) if !CSI_FINAL_BYTE_RANGE.contains(next) => {
                return SequenceBoundary::Complete(idx + 1);
            }
            Some(_) => {}
        }
    }

    while idx < len && CSI_INTERMEDIATE_BYTE_RANGE.contains(&buffer[idx]) {
        idx += 1;
    }
    if idx == len {
        return wait_unless_longer_than(MAX_PENDING_CSI_LEN, len);
    }

    if CSI_FINAL_BYTE_RANGE.contains(&buffer[idx]) {
        SequenceBoundary::Complete(idx + 1)
    } else {
        // Malformed. Cut before the offending byte so it gets decoded on its own.
        SequenceBoundary::Complete(idx)
    }
}

fn osc_boundary(buffer: &[u8], more: bool) -> SequenceBoundary {
    let len = buffer.len();
    if len == 2 {
        return wait_if(more, 2);
    }

    for idx in 2..len {
        match buffer[idx] {
            ANSI_BEL => return SequenceBoundary::Complete(idx + 1),
            ANSI_ESC => {
                return match buffer.get(idx + 1) {
                    None => wait_unless_longer_than(MAX_PENDING_OSC_LEN, len),
                    Some(&ANSI_ST_BACKSLASH) => SequenceBoundary::Complete(idx + 2),
                    // Aborted. The `ESC` starts the next sequence.
                    Some(_) => SequenceBoundary::Complete(idx),
                };
            }
            _ => {}
        }
    }

    wait_unless_longer_than(MAX_PENDING_OSC_LEN, len)
}

fn ss3_boundary(buffer: &[u8], more: bool) -> SequenceBoundary {
    let len = buffer.len();
    if len == 2 {
        // `ESC O` on its own is Alt+O.
        return wait_if(more, 2);
    }

    let mut idx = 2;
    while idx < len && buffer[idx].is_ascii_digit() {
        idx += 1;
    }
    if idx == len {
        return wait_unless_longer_than(MAX_PENDING_CSI_LEN, len);
    }

    if CSI_FINAL_BYTE_RANGE.contains(&buffer[idx]) {
        SequenceBoundary::Complete(idx + 1)
    } else {
        SequenceBoundary::Complete(idx)
    }
}

#[cfg(test)]
mod tests_sequence_boundary {
    use super::*;
    use test_case::test_case;

    use SequenceBoundary::{Complete, Incomplete};

    #[test_case(b"a", false, Complete(1) ; "ascii")]
    #[test_case("日本".as_bytes(), false, Complete(3) ; "first of two cjk chars")]
    #[test_case(&[0xE6, 0x97], false, Incomplete ; "split utf8")]
    #[test_case(&[0xFF, b'a'], false, Complete(1) ; "invalid utf8 byte")]
    #[test_case(b"\x1b", true, Incomplete ; "lone esc with more")]
    #[test_case(b"\x1b", false, Complete(1) ; "lone esc")]
    #[test_case(b"\x1b[", true, Incomplete ; "csi introducer with more")]
    #[test_case(b"\x1b[", false, Complete(2) ; "alt bracket")]
    #[test_case(b"\x1bO", false, Complete(2) ; "alt capital o")]
    #[test_case(b"\x1b]", false, Complete(2) ; "alt close bracket")]
    #[test_case(b"\x1b[A\x1b[B", false, Complete(3) ; "cursor key then another")]
    #[test_case(b"\x1b[1;5", false, Incomplete ; "unterminated params")]
    #[test_case(b"\x1b[1;5Ax", false, Complete(6) ; "modified cursor key")]
    #[test_case(b"\x1b[200~hello", false, Complete(6) ; "paste start marker")]
    #[test_case(b"\x1b[3$", false, Complete(4) ; "urxvt shift at end")]
    #[test_case(b"\x1b[3$", true, Incomplete ; "urxvt shift with more")]
    #[test_case(b"\x1b[3$\x1b", true, Complete(4) ; "urxvt shift then esc")]
    #[test_case(b"\x1b[?2026;2$y", false, Complete(11) ; "intermediate then final")]
    #[test_case(b"\x1b[[A", false, Complete(4) ; "linux console f1")]
    #[test_case(b"\x1b[M !!", false, Complete(6) ; "x10 mouse")]
    #[test_case(b"\x1b[M !", true, Incomplete ; "partial x10 mouse")]
    #[test_case(b"\x1b[<0;1;1M", false, Complete(9) ; "sgr mouse")]
    #[test_case(b"\x1b[1\x01", false, Complete(3) ; "malformed csi")]
    #[test_case(b"\x1b]11;rgb:0/0/0\x07", false, Complete(15) ; "osc bel")]
    #[test_case(b"\x1b]11;rgb:0/0/0\x1b\\", false, Complete(16) ; "osc st")]
    #[test_case(b"\x1b]11;rgb:0/0/0\x1b", false, Incomplete ; "osc split st")]
    #[test_case(b"\x1b]11;rgb\x1b[A", false, Complete(8) ; "aborted osc")]
    #[test_case(b"\x1bOA", false, Complete(3) ; "ss3 cursor key")]
    #[test_case(b"\x1bO5M", false, Complete(4) ; "ss3 keypad with modifier")]
    #[test_case(b"\x1b\x1b", true, Incomplete ; "esc esc with more")]
    #[test_case(b"\x1b\x1b", false, Complete(2) ; "alt esc")]
    #[test_case(b"\x1b\x1b[A", false, Complete(4) ; "alt cursor key")]
    #[test_case(b"\x1ba", false, Complete(2) ; "alt a")]
    #[test_case("\x1bé".as_bytes(), false, Complete(3) ; "alt multibyte char")]
    #[test_case(b"\x1b\xFF", false, Complete(1) ; "esc then invalid byte")]
    fn test_boundary(buffer: &[u8], more: bool, expected: SequenceBoundary) {
        assert_eq!(find_sequence_boundary(buffer, more), expected);
    }

    fn unterminated(prefix: &[u8], len: usize) -> Vec<u8> {
        let mut buffer = prefix.to_vec();
        buffer.resize(len, b'1');
        buffer
    }

    #[test]
    fn test_unterminated_csi_waits_up_to_cap() {
        let short = unterminated(b"\x1b[", MAX_PENDING_CSI_LEN - 1);
        assert_eq!(find_sequence_boundary(&short, false), Incomplete);

        let capped = unterminated(b"\x1b[", MAX_PENDING_CSI_LEN);
        assert_eq!(
            find_sequence_boundary(&capped, true),
            Complete(MAX_PENDING_CSI_LEN)
        );
    }

    #[test]
    fn test_unterminated_ss3_is_capped() {
        let capped = unterminated(b"\x1bO", MAX_PENDING_CSI_LEN);
        assert_eq!(
            find_sequence_boundary(&capped, false),
            Complete(MAX_PENDING_CSI_LEN)
        );
    }

    #[test]
    fn test_unterminated_osc_waits_up_to_cap() {
        let short = unterminated(b"\x1b]52;c;", MAX_PENDING_OSC_LEN - 1);
        assert_eq!(find_sequence_boundary(&short, false), Incomplete);

        let capped = unterminated(b"\x1b]52;c;", MAX_PENDING_OSC_LEN);
        assert_eq!(
            find_sequence_boundary(&capped, false),
            Complete(MAX_PENDING_OSC_LEN)
        );
    }
}
