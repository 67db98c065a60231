// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turns one complete sequence (as cut by [`find_sequence_boundary()`]) into an
//! [`InputEvent`].
//!
//! ```text
//! key table hit ───────────────────────────────────────────► Key
//! plain UTF-8 char ────────────────────────────────────────► Key / Unknown(InvalidUtf8)
//! ESC [ ... ─┬─ SGR / X10 / urxvt mouse ───────────────────► Mouse
//!            ├─ ? ... c ───────────────────────────────────► PrimaryDeviceAttributes
//!            ├─ ? ... u ───────────────────────────────────► KittyKeyboardFlags
//!            ├─ ... u ─────────────────────────────────────► Key (kitty)
//!            ├─ I / O ─────────────────────────────────────► Focus
//!            ├─ sub params (1;5:3A) ───────────────────────► Key (kitty legacy)
//!            ├─ 27 ; mods ; code ~ ────────────────────────► Key (modifyOtherKeys)
//!            └─ else ──────────────────────────────────────► Unknown(Csi)
//! ESC ] ... ─── 10 / 11 / 12 ──────────────────────────────► Color / Unknown(Osc)
//! ESC O ... ───────────────────────────────────────────────► Unknown(Ss3)
//! ESC ESC ... ─ decode the rest, add Alt to keys ─────────► Key / ... / Unknown(Esc)
//! ESC char ────────────────────────────────────────────────► Key + Alt
//! ```
//!
//! [`find_sequence_boundary()`]: super::find_sequence_boundary

use super::{CsiParams, decode_kitty_flags_report, decode_kitty_key, decode_kitty_legacy_key,
            decode_modify_other_keys, decode_osc, decode_primary_device_attributes,
            decode_sgr_mouse, decode_single_char, decode_urxvt_mouse, decode_x10_mouse};
use crate::{ANSI_CSI_BRACKET, ANSI_ESC, ANSI_FUNCTION_KEY_TERMINATOR, ANSI_OSC_BRACKET,
            ANSI_PRIVATE_PREFIX, ANSI_SS3_O, DEVICE_ATTRIBUTES_FINAL, FOCUS_GAINED_FINAL,
            FOCUS_LOST_FINAL, FocusState, InputEvent, KITTY_KEY_FINAL, KeyEvent, KeyMod,
            KeySym, KeyTable, MOUSE_SGR_PREFIX, MOUSE_SGR_PRESS, MOUSE_SGR_RELEASE,
            MOUSE_X10_MARKER, MOUSE_X10_SEQUENCE_LEN, SequenceKind};

/// Classifies one complete sequence. Never fails: anything unrecognized becomes
/// [`InputEvent::Unknown`] with the verbatim bytes.
#[must_use]
pub fn classify_sequence(seq: &[u8], table: &KeyTable) -> InputEvent {
    if let Some(key) = table.get(seq) {
        return InputEvent::Key(key.clone());
    }

    match seq {
        [] => InputEvent::unknown(SequenceKind::InvalidUtf8, seq),
        [ANSI_ESC] => InputEvent::Key(KeyEvent::from_sym(KeySym::Escape)),
        [ANSI_ESC, ANSI_CSI_BRACKET, _, ..] => classify_csi(seq, table),
        [ANSI_ESC, ANSI_OSC_BRACKET, _, ..] => decode_osc(seq),
        [ANSI_ESC, ANSI_SS3_O, _, ..] => InputEvent::unknown(SequenceKind::Ss3, seq),
        [ANSI_ESC, ANSI_ESC, ..] => match classify_sequence(&seq[1..], table) {
            InputEvent::Key(key) => InputEvent::Key(key.add_modifiers(KeyMod::ALT)),
            InputEvent::Unknown(_) => InputEvent::unknown(SequenceKind::Esc, seq),
            other => other,
        },
        [ANSI_ESC, rest @ ..] => decode_single_char(rest).map_or_else(
            || InputEvent::unknown(SequenceKind::Esc, seq),
            |ch| InputEvent::Key(KeyEvent::from_char(ch).with_modifiers(KeyMod::ALT)),
        ),
        _ => decode_single_char(seq).map_or_else(
            || InputEvent::unknown(SequenceKind::InvalidUtf8, seq),
            |ch| InputEvent::Key(KeyEvent::from_char(ch)),
        ),
    }
}

fn classify_csi(seq: &[u8], table: &KeyTable) -> InputEvent {
    let unknown = || InputEvent::unknown(SequenceKind::Csi, seq);

    if seq.len() == MOUSE_X10_SEQUENCE_LEN && seq[2] == MOUSE_X10_MARKER {
        return decode_x10_mouse(seq).map_or_else(unknown, InputEvent::Mouse);
    }

    let Some(params) = CsiParams::parse(seq) else {
        return unknown();
    };
    // Linux console `ESC [ [ x` keys that the table doesn't know.
    if params.final_byte == ANSI_CSI_BRACKET || seq[2] == ANSI_CSI_BRACKET {
        return unknown();
    }
    if !params.intermediates.is_empty() {
        return unknown();
    }

    match (params.private_marker, params.final_byte) {
        (Some(MOUSE_SGR_PREFIX), MOUSE_SGR_PRESS | MOUSE_SGR_RELEASE) => {
            decode_sgr_mouse(&params).map_or_else(unknown, InputEvent::Mouse)
        }
        (Some(ANSI_PRIVATE_PREFIX), DEVICE_ATTRIBUTES_FINAL) => {
            decode_primary_device_attributes(&params)
        }
        (Some(ANSI_PRIVATE_PREFIX), KITTY_KEY_FINAL) => {
            decode_kitty_flags_report(&params).unwrap_or_else(unknown)
        }
        (None, KITTY_KEY_FINAL) => {
            decode_kitty_key(&params).map_or_else(unknown, InputEvent::Key)
        }
        (None, FOCUS_GAINED_FINAL) if params.is_empty() => {
            InputEvent::Focus(FocusState::Gained)
        }
        (None, FOCUS_LOST_FINAL) if params.is_empty() => InputEvent::Focus(FocusState::Lost),
        (None, MOUSE_X10_MARKER) if params.len() == 3 => {
            decode_urxvt_mouse(&params).map_or_else(unknown, InputEvent::Mouse)
        }
        (None, _) if params.has_sub_params() => {
            decode_kitty_legacy_key(&params, table).map_or_else(unknown, InputEvent::Key)
        }
        (None, ANSI_FUNCTION_KEY_TERMINATOR) => decode_modify_other_keys(seq, &params),
        _ => unknown(),
    }
}

#[cfg(test)]
mod tests_sequence_classifier {
    use super::*;
    use crate::{ColorRole, DriverConfig, MouseAction, MouseButton, MouseEvent, Rgba};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn classify(seq: &[u8]) -> InputEvent {
        classify_sequence(seq, &KeyTable::from_config(&DriverConfig::default()))
    }

    fn key(key: KeyEvent) -> InputEvent { InputEvent::Key(key) }

    #[test_case(b"a", key(KeyEvent::from_char('a')) ; "plain char")]
    #[test_case("ж".as_bytes(), key(KeyEvent::from_char('ж')) ; "multibyte char")]
    #[test_case(b"\x1b", key(KeyEvent::from_sym(KeySym::Escape)) ; "escape")]
    #[test_case(b"\x1b[A", key(KeyEvent::from_sym(KeySym::Up)) ; "up")]
    #[test_case(b"\x1bx", key(KeyEvent::from_char('x').with_modifiers(KeyMod::ALT)) ; "alt x")]
    #[test_case("\x1bж".as_bytes(), key(KeyEvent::from_char('ж').with_modifiers(KeyMod::ALT)) ; "alt multibyte")]
    #[test_case(b"\x1b[27;5;98~", key(KeyEvent::from_char('b').with_modifiers(KeyMod::CTRL)) ; "modify other keys")]
    #[test_case(b"\x1b[I", InputEvent::Focus(FocusState::Gained) ; "focus gained")]
    #[test_case(b"\x1b[O", InputEvent::Focus(FocusState::Lost) ; "focus lost")]
    #[test_case(b"\x1b[?62;22c", InputEvent::PrimaryDeviceAttributes(vec![62, 22]) ; "da1")]
    #[test_case(b"\x1b[97;5u", key(KeyEvent::from_char('a').with_modifiers(KeyMod::CTRL)) ; "kitty key")]
    #[test_case(
        b"\x1b]11;rgb:ff/00/00\x07",
        InputEvent::Color { role: ColorRole::Background, color: Rgba::new(0xFF, 0, 0, 0xFF) }
        ; "background color"
    )]
    fn test_classify(seq: &[u8], expected: InputEvent) {
        assert_eq!(classify(seq), expected);
    }

    #[test]
    fn test_mouse_protocols_agree() {
        let expected = InputEvent::Mouse(MouseEvent {
            col: 4,
            row: 6,
            button: MouseButton::Left,
            action: MouseAction::Press,
            modifiers: KeyMod::empty(),
        });
        assert_eq!(classify(b"\x1b[<0;5;7M"), expected);
        assert_eq!(classify(b"\x1b[32;5;7M"), expected);
        assert_eq!(classify(b"\x1b[M %'"), expected);
    }

    #[test]
    fn test_esc_esc_adds_alt_to_decoded_keys() {
        assert_eq!(
            classify(b"\x1b\x1b[27;5;98~"),
            key(KeyEvent::from_char('b').with_modifiers(KeyMod::CTRL | KeyMod::ALT))
        );
    }

    #[test]
    fn test_esc_esc_keeps_non_key_events() {
        assert_eq!(classify(b"\x1b\x1b[I"), InputEvent::Focus(FocusState::Gained));
    }

    #[test_case(b"\x1b[99z", SequenceKind::Csi ; "unknown csi")]
    #[test_case(b"\x1b[27;5~", SequenceKind::Csi ; "malformed modify other keys")]
    #[test_case(b"\x1b[[Z", SequenceKind::Csi ; "unknown linux console key")]
    #[test_case(b"\x1b[?2026;2$y", SequenceKind::Csi ; "mode report")]
    #[test_case(b"\x1b]0;title\x07", SequenceKind::Osc ; "title osc")]
    #[test_case(b"\x1bO2P", SequenceKind::Ss3 ; "unknown ss3")]
    #[test_case(b"\x1b\x1b[99z", SequenceKind::Esc ; "esc esc unknown")]
    #[test_case(&[0xFF], SequenceKind::InvalidUtf8 ; "invalid byte")]
    fn test_unknown(seq: &[u8], kind: SequenceKind) {
        assert_eq!(classify(seq), InputEvent::unknown(kind, seq));
    }
}
