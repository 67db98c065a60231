// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use smallstr::SmallString;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Inline capacity of [`KeyText`]. One key rarely decodes to more than a couple of
/// code points, so this avoids heap allocation in practice.
pub const KEY_TEXT_INLINE_SIZE: usize = 8;

/// Characters carried by a [`KeyEvent`].
pub type KeyText = SmallString<[u8; KEY_TEXT_INLINE_SIZE]>;

bitflags::bitflags! {
    /// Modifier bitset. The bit values match the xterm encoding, which sends
    /// `bits + 1` as the modifier parameter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
    pub struct KeyMod: u8 {
        const SHIFT = 1;
        const ALT = 2;
        const CTRL = 4;
        const META = 8;
    }
}

impl KeyMod {
    /// Decodes an xterm modifier parameter (`bits + 1`). Returns [`None`] for `0` and
    /// for values that carry bits outside of [`KeyMod::all()`].
    #[must_use]
    pub fn from_xterm_param(param: u32) -> Option<Self> {
        let bits = u8::try_from(param.checked_sub(1)?).ok()?;
        Self::from_bits(bits)
    }

    /// Encodes this bitset as an xterm modifier parameter (`bits + 1`).
    #[must_use]
    pub fn to_xterm_param(self) -> u32 { u32::from(self.bits()) + 1 }

    /// All 15 non-empty modifier combinations, in ascending bit order.
    pub fn non_empty_combinations() -> impl Iterator<Item = Self> {
        (1..=Self::all().bits()).map(Self::from_bits_truncate)
    }
}

/// Whether a key went down, is auto repeating, or went up. Only the kitty keyboard
/// protocol (POSIX) and console records (Windows) can report anything but
/// [`KeyAction::Press`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum_macros::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum KeyAction {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Symbolic (non text) key identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySym {
    Up,
    Down,
    Right,
    Left,
    Begin,
    Find,
    Insert,
    Delete,
    Select,
    PgUp,
    PgDown,
    Home,
    End,
    KpEnter,
    KpEqual,
    KpMul,
    KpPlus,
    KpComma,
    KpMinus,
    KpPeriod,
    KpDiv,
    Kp0,
    Kp1,
    Kp2,
    Kp3,
    Kp4,
    Kp5,
    Kp6,
    Kp7,
    Kp8,
    Kp9,
    /// `F1` through `F35`.
    Function(u8),
    Tab,
    Enter,
    Escape,
    Backspace,
    Space,
    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,
    Menu,
}

impl KeySym {
    /// Keypad digit for `0..=9`.
    #[must_use]
    pub fn keypad_digit(digit: u32) -> Option<Self> {
        Some(match digit {
            0 => Self::Kp0,
            1 => Self::Kp1,
            2 => Self::Kp2,
            3 => Self::Kp3,
            4 => Self::Kp4,
            5 => Self::Kp5,
            6 => Self::Kp6,
            7 => Self::Kp7,
            8 => Self::Kp8,
            9 => Self::Kp9,
            _ => return None,
        })
    }
}

impl Display for KeySym {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            Self::Function(n) => return write!(f, "f{n}"),
            Self::Up => "up",
            Self::Down => "down",
            Self::Right => "right",
            Self::Left => "left",
            Self::Begin => "begin",
            Self::Find => "find",
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Select => "select",
            Self::PgUp => "pgup",
            Self::PgDown => "pgdown",
            Self::Home => "home",
            Self::End => "end",
            Self::KpEnter => "kpenter",
            Self::KpEqual => "kpequal",
            Self::KpMul => "kpmul",
            Self::KpPlus => "kpplus",
            Self::KpComma => "kpcomma",
            Self::KpMinus => "kpminus",
            Self::KpPeriod => "kpperiod",
            Self::KpDiv => "kpdiv",
            Self::Kp0 => "kp0",
            Self::Kp1 => "kp1",
            Self::Kp2 => "kp2",
            Self::Kp3 => "kp3",
            Self::Kp4 => "kp4",
            Self::Kp5 => "kp5",
            Self::Kp6 => "kp6",
            Self::Kp7 => "kp7",
            Self::Kp8 => "kp8",
            Self::Kp9 => "kp9",
            Self::Tab => "tab",
            Self::Enter => "enter",
            Self::Escape => "esc",
            Self::Backspace => "backspace",
            Self::Space => "space",
            Self::CapsLock => "capslock",
            Self::ScrollLock => "scrolllock",
            Self::NumLock => "numlock",
            Self::PrintScreen => "printscreen",
            Self::Pause => "pause",
            Self::Menu => "menu",
        };
        f.write_str(name)
    }
}

/// A single key press, repeat, or release.
///
/// Either `sym` is set, or `text` is non-empty, or both (eg: [`KeySym::Space`] with
/// text `" "`). The constructors uphold this; there is no way to build an event with
/// neither.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub sym: Option<KeySym>,
    pub text: KeyText,
    pub modifiers: KeyMod,
    pub action: KeyAction,
}

impl KeyEvent {
    #[must_use]
    pub fn from_sym(sym: KeySym) -> Self {
        Self {
            sym: Some(sym),
            text: KeyText::new(),
            modifiers: KeyMod::empty(),
            action: KeyAction::Press,
        }
    }

    #[must_use]
    pub fn from_char(ch: char) -> Self {
        let mut text = KeyText::new();
        text.push(ch);
        Self {
            sym: None,
            text,
            modifiers: KeyMod::empty(),
            action: KeyAction::Press,
        }
    }

    /// A symbolic key that also produces text, eg: space.
    #[must_use]
    pub fn from_sym_and_char(sym: KeySym, ch: char) -> Self {
        Self {
            sym: Some(sym),
            ..Self::from_char(ch)
        }
    }

    /// Replaces the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: KeyMod) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Adds `modifiers` to the ones already set.
    #[must_use]
    pub fn add_modifiers(mut self, modifiers: KeyMod) -> Self {
        self.modifiers |= modifiers;
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: KeyAction) -> Self {
        self.action = action;
        self
    }

    /// Replaces the text. Empty text is ignored when there is no symbol, to keep the
    /// event non-empty.
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        if !text.is_empty() || self.sym.is_some() {
            self.text = KeyText::from_str(text);
        }
        self
    }

    #[must_use]
    pub fn first_char(&self) -> Option<char> { self.text.chars().next() }
}

/// Renders like `ctrl+alt+shift+meta+up`, `ctrl+c`, or `space`.
impl Display for KeyEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (flag, name) in [
            (KeyMod::CTRL, "ctrl+"),
            (KeyMod::ALT, "alt+"),
            (KeyMod::SHIFT, "shift+"),
            (KeyMod::META, "meta+"),
        ] {
            if self.modifiers.contains(flag) {
                f.write_str(name)?;
            }
        }
        match self.sym {
            Some(sym) => write!(f, "{sym}"),
            None => f.write_str(self.text.as_str()),
        }
    }
}

#[cfg(test)]
mod tests_key_event {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(2, KeyMod::SHIFT)]
    #[test_case(5, KeyMod::CTRL)]
    #[test_case(8, KeyMod::SHIFT | KeyMod::ALT | KeyMod::CTRL)]
    #[test_case(16, KeyMod::all())]
    fn test_xterm_param_round_trip(param: u32, expected: KeyMod) {
        assert_eq!(KeyMod::from_xterm_param(param), Some(expected));
        assert_eq!(expected.to_xterm_param(), param);
    }

    #[test_case(0)]
    #[test_case(17)]
    #[test_case(300)]
    fn test_xterm_param_out_of_range(param: u32) {
        assert_eq!(KeyMod::from_xterm_param(param), None);
    }

    #[test]
    fn test_fifteen_distinct_combinations() {
        let combos: Vec<KeyMod> = KeyMod::non_empty_combinations().collect();
        assert_eq!(combos.len(), 15);
        assert!(combos.iter().all(|it| !it.is_empty()));
    }

    #[test]
    fn test_display() {
        let key = KeyEvent::from_sym(KeySym::Up).with_modifiers(KeyMod::CTRL | KeyMod::ALT);
        assert_eq!(key.to_string(), "ctrl+alt+up");

        let key = KeyEvent::from_char('c').with_modifiers(KeyMod::CTRL);
        assert_eq!(key.to_string(), "ctrl+c");

        assert_eq!(KeyEvent::from_sym(KeySym::Function(12)).to_string(), "f12");
    }

    #[test]
    fn test_with_text_never_empties_a_text_only_event() {
        let key = KeyEvent::from_char('x').with_text("");
        assert_eq!(key.first_char(), Some('x'));
    }
}
