// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! OSC 10 / 11 / 12 color query replies: `OSC selector ; color_str ST`.
//!
//! `color_str` is an X11 color string, `rgb:R/G/B` or `rgba:R/G/B/A`, where each part is
//! 1 to 4 hex digits. Only the low 8 bits of each part are kept, so `ffff` and `ff`
//! both read as 255, but `1234` reads as `0x34`.

use crate::{ANSI_BEL, ANSI_ESC, ANSI_OSC_BRACKET, ANSI_ST_BACKSLASH, ColorRole,
            InputEvent, Rgba, SequenceKind};

const RGB_PREFIX: &str = "rgb:";
const RGBA_PREFIX: &str = "rgba:";

/// Decodes a complete `OSC` sequence. Anything but a color reply is
/// [`InputEvent::Unknown`].
#[must_use]
pub fn decode_osc(seq: &[u8]) -> InputEvent {
    decode_color_reply(seq).unwrap_or_else(|| InputEvent::unknown(SequenceKind::Osc, seq))
}

fn decode_color_reply(seq: &[u8]) -> Option<InputEvent> {
    let payload = seq.strip_prefix(&[ANSI_ESC, ANSI_OSC_BRACKET])?;
    let payload = payload
        .strip_suffix(&[ANSI_ESC, ANSI_ST_BACKSLASH])
        .or_else(|| payload.strip_suffix(&[ANSI_BEL]))
        .unwrap_or(payload);
    let payload = std::str::from_utf8(payload).ok()?;

    let (selector, color_str) = payload.split_once(';')?;
    let role = ColorRole::from_osc_selector(selector.parse().ok()?)?;

    Some(InputEvent::Color {
        role,
        color: parse_x_color(color_str),
    })
}

/// Parses an X11 `rgb:` or `rgba:` color string. A part that isn't hex reads as 0. A
/// wrong number of parts, or any other format, reads as [`Rgba::BLACK`].
#[must_use]
pub fn parse_x_color(color_str: &str) -> Rgba {
    if let Some(rest) = color_str.strip_prefix(RGB_PREFIX) {
        match parse_hex_parts::<3>(rest) {
            Some([r, g, b]) => Rgba::new(r, g, b, 0xFF),
            None => Rgba::BLACK,
        }
    } else if let Some(rest) = color_str.strip_prefix(RGBA_PREFIX) {
        match parse_hex_parts::<4>(rest) {
            Some([r, g, b, a]) => Rgba::new(r, g, b, a),
            None => Rgba::BLACK,
        }
    } else {
        Rgba::BLACK
    }
}

/// Splits on `/` into exactly `N` parts.
fn parse_hex_parts<const N: usize>(text: &str) -> Option<[u8; N]> {
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() != N {
        return None;
    }
    let mut acc = [0_u8; N];
    for (slot, part) in acc.iter_mut().zip(parts) {
        // Truncation to the low byte is intended.
        #[allow(clippy::cast_possible_truncation)]
        let value = u32::from_str_radix(part, 16).unwrap_or(0) as u8;
        *slot = value;
    }
    Some(acc)
}

#[cfg(test)]
mod tests_osc_color {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("rgb:ff/80/00", Rgba::new(0xFF, 0x80, 0x00, 0xFF) ; "two digit parts")]
    #[test_case("rgb:ffff/8080/0000", Rgba::new(0xFF, 0x80, 0x00, 0xFF) ; "four digit parts")]
    #[test_case("rgb:1234/0/f", Rgba::new(0x34, 0x00, 0x0F, 0xFF) ; "low byte kept")]
    #[test_case("rgba:10/20/30/40", Rgba::new(0x10, 0x20, 0x30, 0x40) ; "with alpha")]
    #[test_case("rgb:zz/80/00", Rgba::new(0x00, 0x80, 0x00, 0xFF) ; "bad part reads as zero")]
    #[test_case("rgb:zz/zz/zz", Rgba::BLACK ; "all parts malformed")]
    #[test_case("rgb:zz", Rgba::BLACK ; "too few parts")]
    #[test_case("rgba:1/2/3", Rgba::BLACK ; "alpha part missing")]
    #[test_case("#ff8000", Rgba::BLACK ; "unsupported format")]
    fn test_parse_x_color(color_str: &str, expected: Rgba) {
        assert_eq!(parse_x_color(color_str), expected);
    }

    #[test_case(b"\x1b]11;rgb:0000/0000/0000\x1b\\", ColorRole::Background ; "background st")]
    #[test_case(b"\x1b]10;rgb:ffff/ffff/ffff\x07", ColorRole::Foreground ; "foreground bel")]
    #[test_case(b"\x1b]12;rgb:ffff/ffff/ffff\x07", ColorRole::Cursor ; "cursor bel")]
    fn test_decode_roles(seq: &[u8], role: ColorRole) {
        assert!(matches!(decode_osc(seq), InputEvent::Color { role: it, .. } if it == role));
    }

    #[test]
    fn test_other_osc_is_unknown() {
        let seq = b"\x1b]52;c;aGVsbG8=\x07";
        assert_eq!(decode_osc(seq), InputEvent::unknown(SequenceKind::Osc, seq));
    }
}
