// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Kitty keyboard protocol.
//!
//! ```text
//! CSI code[:shifted[:base]] ; mods[:event] ; text u     key report
//! CSI ? flags u                                        flags query reply
//! CSI 1 ; mods:event A    CSI n ; mods:event ~         legacy keys with event type
//! ```
//!
//! `mods` is `bits + 1`, with shift 1, alt 2, ctrl 4, super 8, hyper 16, meta 32,
//! caps lock 64, and num lock 128. Both super and meta map to [`KeyMod::META`]. The
//! rest aren't represented. `event` is 1 for press, 2 for repeat, and 3 for release.
//!
//! Request strings for enabling the protocol live on [`KittyFlags`].

use super::{CsiParams, decode_single_char};
use crate::{ANSI_FUNCTION_KEY_TERMINATOR, CSI, InputEvent, KeyAction, KeyEvent, KeyMod,
            KeySym, KeyTable};

bitflags::bitflags! {
    /// Progressive enhancement flags of the kitty keyboard protocol.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KittyFlags: u8 {
        const DISAMBIGUATE_ESCAPE_CODES = 1;
        const REPORT_EVENT_TYPES = 2;
        const REPORT_ALTERNATE_KEYS = 4;
        const REPORT_ALL_KEYS = 8;
        const REPORT_ASSOCIATED_KEYS = 16;
    }
}

/// How `CSI = flags ; mode u` combines `flags` with the active set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum KittyFlagsMode {
    #[default]
    Replace = 1,
    Union = 2,
    Difference = 3,
}

impl KittyFlags {
    /// Pushes these flags on the terminal's stack: `CSI > flags u`.
    #[must_use]
    pub fn push_request(self) -> String { format!("{CSI}>{}u", self.bits()) }

    /// Pops `count` entries off the terminal's stack: `CSI < count u`.
    #[must_use]
    pub fn pop_request(count: u32) -> String { format!("{CSI}<{count}u") }

    /// `CSI = flags ; mode u`.
    #[must_use]
    pub fn set_request(self, mode: KittyFlagsMode) -> String {
        format!("{CSI}={};{}u", self.bits(), mode as u8)
    }

    /// Turns these flags on, leaving others alone.
    #[must_use]
    pub fn enable_request(self) -> String { self.set_request(KittyFlagsMode::Union) }

    /// Turns these flags off, leaving others alone.
    #[must_use]
    pub fn disable_request(self) -> String { self.set_request(KittyFlagsMode::Difference) }
}

const KITTY_SHIFT: u32 = 1;
const KITTY_ALT: u32 = 2;
const KITTY_CTRL: u32 = 4;
const KITTY_SUPER: u32 = 8;
const KITTY_META: u32 = 32;

const KITTY_F13: u32 = 57376;
const KITTY_F35: u32 = 57398;
const KITTY_KP_0: u32 = 57399;
const KITTY_KP_9: u32 = 57408;

/// Private use area code points. Kitty reports keys with no Unicode equivalent here.
const PRIVATE_USE_AREA: std::ops::RangeInclusive<u32> = 0xE000..=0xF8FF;

/// Kitty code points with a symbolic meaning, besides F13..=F35 and the keypad digits.
const KITTY_FUNCTIONAL_KEYS: [(u32, KeySym); 29] = [
    (9, KeySym::Tab),
    (13, KeySym::Enter),
    (27, KeySym::Escape),
    (127, KeySym::Backspace),
    (57358, KeySym::CapsLock),
    (57359, KeySym::ScrollLock),
    (57360, KeySym::NumLock),
    (57361, KeySym::PrintScreen),
    (57362, KeySym::Pause),
    (57363, KeySym::Menu),
    (57409, KeySym::KpPeriod),
    (57410, KeySym::KpDiv),
    (57411, KeySym::KpMul),
    (57412, KeySym::KpMinus),
    (57413, KeySym::KpPlus),
    (57414, KeySym::KpEnter),
    (57415, KeySym::KpEqual),
    (57416, KeySym::KpComma),
    (57417, KeySym::Left),
    (57418, KeySym::Right),
    (57419, KeySym::Up),
    (57420, KeySym::Down),
    (57421, KeySym::PgUp),
    (57422, KeySym::PgDown),
    (57423, KeySym::Home),
    (57424, KeySym::End),
    (57425, KeySym::Insert),
    (57426, KeySym::Delete),
    (57427, KeySym::Begin),
];

/// Maps a kitty key code with no printable meaning to its [`KeySym`].
#[must_use]
pub fn kitty_functional_key(code: u32) -> Option<KeySym> {
    match code {
        KITTY_F13..=KITTY_F35 => u8::try_from(code - KITTY_F13 + 13)
            .ok()
            .map(KeySym::Function),
        KITTY_KP_0..=KITTY_KP_9 => KeySym::keypad_digit(code - KITTY_KP_0),
        _ => KITTY_FUNCTIONAL_KEYS
            .iter()
            .find(|(it, _)| *it == code)
            .map(|(_, sym)| *sym),
    }
}

/// Decodes the `mods` parameter (`bits + 1`).
#[must_use]
pub fn kitty_modifiers(param: u32) -> KeyMod {
    let bits = param.saturating_sub(1);
    let mut modifiers = KeyMod::empty();
    modifiers.set(KeyMod::SHIFT, bits & KITTY_SHIFT != 0);
    modifiers.set(KeyMod::ALT, bits & KITTY_ALT != 0);
    modifiers.set(KeyMod::CTRL, bits & KITTY_CTRL != 0);
    modifiers.set(KeyMod::META, bits & (KITTY_SUPER | KITTY_META) != 0);
    modifiers
}

/// Decodes the `event` sub parameter. Unknown values are treated as a press.
#[must_use]
pub fn kitty_key_action(event: Option<u32>) -> KeyAction {
    match event {
        Some(2) => KeyAction::Repeat,
        Some(3) => KeyAction::Release,
        _ => KeyAction::Press,
    }
}

/// `CSI code[:shifted[:base]] ; mods[:event] ; text u`.
#[must_use]
pub fn decode_kitty_key(params: &CsiParams) -> Option<KeyEvent> {
    let code = params.value(0)?;
    let modifiers = kitty_modifiers(params.value(1).unwrap_or(1));
    let action = kitty_key_action(params.sub_value(1, 1));

    let key = match kitty_functional_key(code) {
        Some(sym) => KeyEvent::from_sym(sym),
        None if code == u32::from(b' ') => KeyEvent::from_sym_and_char(KeySym::Space, ' '),
        None if PRIVATE_USE_AREA.contains(&code) => return None,
        None => KeyEvent::from_char(char::from_u32(code)?),
    };

    let text: String = params
        .param(2)
        .iter()
        .filter_map(|&it| char::from_u32(it))
        .collect();

    let key = key.with_modifiers(modifiers).with_action(action);
    Some(if text.is_empty() { key } else { key.with_text(&text) })
}

/// `CSI ? flags u`.
#[must_use]
pub fn decode_kitty_flags_report(params: &CsiParams) -> Option<InputEvent> {
    let bits = u8::try_from(params.value(0).unwrap_or(0)).ok()?;
    Some(InputEvent::KittyKeyboardFlags(KittyFlags::from_bits_truncate(
        bits,
    )))
}

/// Legacy cursor and tilde keys carrying a kitty event type, eg: `CSI 1 ; 5:3 A`.
/// The unmodified form is looked up in `table`, then the modifiers and action are
/// applied.
#[must_use]
pub fn decode_kitty_legacy_key(params: &CsiParams, table: &KeyTable) -> Option<KeyEvent> {
    if params.private_marker.is_some() || !params.intermediates.is_empty() {
        return None;
    }
    let final_byte = char::from(params.final_byte);
    let base_seq = if params.final_byte == ANSI_FUNCTION_KEY_TERMINATOR {
        format!("{CSI}{}~", params.value(0)?)
    } else {
        format!("{CSI}{final_byte}")
    };

    let modifiers = kitty_modifiers(params.value(1).unwrap_or(1));
    let action = kitty_key_action(params.sub_value(1, 1));

    table
        .get(base_seq.as_bytes())
        .map(|key| key.clone().add_modifiers(modifiers).with_action(action))
}

#[cfg(test)]
mod tests_kitty {
    use super::*;
    use crate::DriverConfig;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn key(seq: &[u8]) -> Option<KeyEvent> { decode_kitty_key(&CsiParams::parse(seq)?) }

    #[test]
    fn test_request_strings() {
        let flags = KittyFlags::DISAMBIGUATE_ESCAPE_CODES | KittyFlags::REPORT_EVENT_TYPES;
        assert_eq!(flags.push_request(), "\x1b[>3u");
        assert_eq!(KittyFlags::pop_request(1), "\x1b[<1u");
        assert_eq!(flags.set_request(KittyFlagsMode::Replace), "\x1b[=3;1u");
        assert_eq!(flags.enable_request(), "\x1b[=3;2u");
        assert_eq!(flags.disable_request(), "\x1b[=3;3u");
    }

    #[test]
    fn test_plain_char() {
        assert_eq!(key(b"\x1b[97u"), Some(KeyEvent::from_char('a')));
    }

    #[test]
    fn test_ctrl_shift_with_text_and_release() {
        assert_eq!(
            key(b"\x1b[97;6:3;65u"),
            Some(
                KeyEvent::from_char('A')
                    .with_modifiers(KeyMod::CTRL | KeyMod::SHIFT)
                    .with_action(KeyAction::Release)
            )
        );
    }

    #[test_case(b"\x1b[13u", KeySym::Enter ; "enter")]
    #[test_case(b"\x1b[57358u", KeySym::CapsLock ; "caps lock")]
    #[test_case(b"\x1b[57376u", KeySym::Function(13) ; "f13")]
    #[test_case(b"\x1b[57398u", KeySym::Function(35) ; "f35")]
    #[test_case(b"\x1b[57399u", KeySym::Kp0 ; "keypad zero")]
    #[test_case(b"\x1b[57414u", KeySym::KpEnter ; "keypad enter")]
    #[test_case(b"\x1b[57427u", KeySym::Begin ; "keypad begin")]
    fn test_functional_keys(seq: &[u8], sym: KeySym) {
        assert_eq!(key(seq).and_then(|it| it.sym), Some(sym));
    }

    #[test]
    fn test_unmapped_private_use_code() {
        assert_eq!(key(b"\x1b[57441u"), None);
    }

    #[test_case(9, KeyMod::META ; "super")]
    #[test_case(33, KeyMod::META ; "meta")]
    #[test_case(41, KeyMod::META ; "super and meta")]
    #[test_case(8, KeyMod::ALT | KeyMod::CTRL | KeyMod::SHIFT ; "alt ctrl shift")]
    #[test_case(65, KeyMod::empty() ; "caps lock ignored")]
    fn test_modifiers(param: u32, expected: KeyMod) {
        assert_eq!(kitty_modifiers(param), expected);
    }

    #[test]
    fn test_flags_report() {
        let params = CsiParams::parse(b"\x1b[?5u").unwrap();
        assert_eq!(
            decode_kitty_flags_report(&params),
            Some(InputEvent::KittyKeyboardFlags(
                KittyFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KittyFlags::REPORT_ALTERNATE_KEYS
            ))
        );
    }

    #[test]
    fn test_legacy_key_with_event_type() {
        let table = KeyTable::from_config(&DriverConfig::default());

        let params = CsiParams::parse(b"\x1b[1;5:3A").unwrap();
        assert_eq!(
            decode_kitty_legacy_key(&params, &table),
            Some(
                KeyEvent::from_sym(KeySym::Up)
                    .with_modifiers(KeyMod::CTRL)
                    .with_action(KeyAction::Release)
            )
        );

        let params = CsiParams::parse(b"\x1b[3;1:2~").unwrap();
        assert_eq!(
            decode_kitty_legacy_key(&params, &table),
            Some(KeyEvent::from_sym(KeySym::Delete).with_action(KeyAction::Repeat))
        );
    }
}
