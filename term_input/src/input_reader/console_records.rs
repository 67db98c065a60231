// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words HWHEELED

//! Windows console input records, modeled without any FFI so the translation can be
//! tested on every platform.
//!
//! | Record             | Translation                                             |
//! | :----------------- | :------------------------------------------------------ |
//! | key (down)         | char map, then virtual key map, then the raw character  |
//! | key (up)           | dropped                                                 |
//! | mouse              | button state delta, see [`button_from_state_delta()`]   |
//! | window buffer size | [`InputEvent::Resize`]                                  |
//! | focus, menu, other | dropped                                                 |

use crate::{InputEvent, KeyAction, KeyEvent, KeyMod, KeySym, MouseAction, MouseButton,
            MouseEvent, button_from_state_delta};

/// Virtual key codes with a fixed meaning.
pub const VK_BACK: u16 = 0x08;
pub const VK_TAB: u16 = 0x09;
pub const VK_RETURN: u16 = 0x0D;
pub const VK_SHIFT: u16 = 0x10;
pub const VK_ESCAPE: u16 = 0x1B;
pub const VK_SPACE: u16 = 0x20;
pub const VK_PRIOR: u16 = 0x21;
pub const VK_NEXT: u16 = 0x22;
pub const VK_END: u16 = 0x23;
pub const VK_HOME: u16 = 0x24;
pub const VK_LEFT: u16 = 0x25;
pub const VK_UP: u16 = 0x26;
pub const VK_RIGHT: u16 = 0x27;
pub const VK_DOWN: u16 = 0x28;
pub const VK_INSERT: u16 = 0x2D;
pub const VK_DELETE: u16 = 0x2E;
pub const VK_F1: u16 = 0x70;
pub const VK_F24: u16 = 0x87;
pub const VK_OEM_4: u16 = 0xDB;

/// Control key state bits.
pub const RIGHT_ALT_PRESSED: u32 = 0x0001;
pub const LEFT_ALT_PRESSED: u32 = 0x0002;
pub const RIGHT_CTRL_PRESSED: u32 = 0x0004;
pub const LEFT_CTRL_PRESSED: u32 = 0x0008;
pub const SHIFT_PRESSED: u32 = 0x0010;

/// Mouse event flags.
pub const MOUSE_CLICK: u32 = 0x0000;
pub const MOUSE_MOVED: u32 = 0x0001;
pub const DOUBLE_CLICK: u32 = 0x0002;
pub const MOUSE_WHEELED: u32 = 0x0004;
pub const MOUSE_HWHEELED: u32 = 0x0008;

/// Button state bits live in the low word. The high word holds the wheel delta.
const BUTTON_STATE_MASK: u32 = 0x0000_FFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRecord {
    pub key_down: bool,
    pub repeat_count: u16,
    pub virtual_key_code: u16,
    /// One UTF-16 code unit. Characters outside the BMP arrive as two records.
    pub unicode_char: u16,
    pub control_key_state: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseRecord {
    /// Zero based console cell.
    pub col: i16,
    pub row: i16,
    pub button_state: u32,
    pub control_key_state: u32,
    pub event_flags: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleRecord {
    Key(KeyRecord),
    Mouse(MouseRecord),
    WindowBufferSize { cols: i16, rows: i16 },
    Focus { is_gained: bool },
    Menu,
    /// An event type this crate doesn't know about.
    Other(u16),
}

/// Characters that the console reports for ctrl combinations, checked before the
/// virtual key code.
fn char_map(ch: u16) -> Option<KeyEvent> {
    let ctrl = |c: char| Some(KeyEvent::from_char(c).with_modifiers(KeyMod::CTRL));
    match ch {
        0x40 => ctrl('@'),
        // SOH..SUB are ctrl+a..ctrl+z. Tab, enter, and backspace land here too.
        0x01..=0x1A => ctrl(char::from(b'a' + u8::try_from(ch - 1).ok()?)),
        0x1B => ctrl('['),
        0x1C => ctrl('\\'),
        0x1D => ctrl(']'),
        0x1E => ctrl('^'),
        0x1F => ctrl('_'),
        _ => None,
    }
}

fn virtual_key_map(virtual_key_code: u16) -> Option<KeyEvent> {
    let sym = match virtual_key_code {
        VK_RETURN => KeySym::Enter,
        VK_BACK => KeySym::Backspace,
        VK_TAB => KeySym::Tab,
        VK_SPACE => return Some(KeyEvent::from_sym_and_char(KeySym::Space, ' ')),
        VK_ESCAPE => KeySym::Escape,
        VK_UP => KeySym::Up,
        VK_DOWN => KeySym::Down,
        VK_RIGHT => KeySym::Right,
        VK_LEFT => KeySym::Left,
        VK_HOME => KeySym::Home,
        VK_END => KeySym::End,
        VK_PRIOR => KeySym::PgUp,
        VK_NEXT => KeySym::PgDown,
        VK_INSERT => KeySym::Insert,
        VK_DELETE => KeySym::Delete,
        VK_F1..=VK_F24 => {
            KeySym::Function(u8::try_from(virtual_key_code - VK_F1 + 1).ok()?)
        }
        VK_OEM_4 => return Some(KeyEvent::from_char('[').with_modifiers(KeyMod::CTRL)),
        _ => return None,
    };
    Some(KeyEvent::from_sym(sym))
}

/// Turns console records into [`InputEvent`]s. Keeps the previous mouse button state
/// and any pending UTF-16 high surrogate between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleRecordTranslator {
    previous_buttons: u32,
    pending_high_surrogate: Option<u16>,
}

impl ConsoleRecordTranslator {
    pub fn translate(&mut self, record: &ConsoleRecord, out: &mut Vec<InputEvent>) {
        match record {
            ConsoleRecord::Key(key) => self.translate_key(key, out),
            ConsoleRecord::Mouse(mouse) => {
                if let Some(event) = self.translate_mouse(mouse) {
                    out.push(InputEvent::Mouse(event));
                }
            }
            ConsoleRecord::WindowBufferSize { cols, rows } => out.push(InputEvent::Resize {
                cols: clamp_to_u16(*cols),
                rows: clamp_to_u16(*rows),
            }),
            ConsoleRecord::Focus { .. }
            | ConsoleRecord::Menu
            | ConsoleRecord::Other(_) => {}
        }
    }

    fn translate_key(&mut self, record: &KeyRecord, out: &mut Vec<InputEvent>) {
        if !record.key_down || record.virtual_key_code == VK_SHIFT {
            return;
        }
        let Some(key) = self.key_for_record(record) else {
            return;
        };

        let mut modifiers = KeyMod::empty();
        if record.control_key_state & (LEFT_ALT_PRESSED | RIGHT_ALT_PRESSED) != 0 {
            modifiers |= KeyMod::ALT;
        }
        let key = key.add_modifiers(modifiers);

        for idx in 0..record.repeat_count {
            let action = if idx == 0 {
                KeyAction::Press
            } else {
                KeyAction::Repeat
            };
            out.push(InputEvent::Key(key.clone().with_action(action)));
        }
    }

    /// Char map first, then the virtual key map, then the raw character.
    fn key_for_record(&mut self, record: &KeyRecord) -> Option<KeyEvent> {
        let unit = record.unicode_char;
        if let Some(key) = char_map(unit) {
            return Some(key);
        }
        if let Some(key) = virtual_key_map(record.virtual_key_code) {
            self.pending_high_surrogate = None;
            return Some(key);
        }

        match unit {
            // Modifier keys and other keys that produce nothing.
            0 => None,
            0xD800..=0xDBFF => {
                self.pending_high_surrogate = Some(unit);
                None
            }
            0xDC00..=0xDFFF => {
                let high = self.pending_high_surrogate.take()?;
                let ch = char::decode_utf16([high, unit]).next()?.ok()?;
                Some(KeyEvent::from_char(ch))
            }
            _ => {
                self.pending_high_surrogate = None;
                char::from_u32(u32::from(unit)).map(KeyEvent::from_char)
            }
        }
    }

    fn translate_mouse(&mut self, record: &MouseRecord) -> Option<MouseEvent> {
        let mut modifiers = KeyMod::empty();
        modifiers.set(
            KeyMod::ALT,
            record.control_key_state & (LEFT_ALT_PRESSED | RIGHT_ALT_PRESSED) != 0,
        );
        modifiers.set(
            KeyMod::CTRL,
            record.control_key_state & (LEFT_CTRL_PRESSED | RIGHT_CTRL_PRESSED) != 0,
        );
        modifiers.set(KeyMod::SHIFT, record.control_key_state & SHIFT_PRESSED != 0);

        let buttons = record.button_state & BUTTON_STATE_MASK;
        let (button, action) = match record.event_flags {
            MOUSE_CLICK | DOUBLE_CLICK => button_from_state_delta(self.previous_buttons, buttons),
            MOUSE_MOVED => (
                button_from_state_delta(self.previous_buttons, buttons).0,
                MouseAction::Motion,
            ),
            MOUSE_WHEELED if wheel_delta(record.button_state) > 0 => {
                (MouseButton::WheelUp, MouseAction::Press)
            }
            MOUSE_WHEELED => (MouseButton::WheelDown, MouseAction::Press),
            MOUSE_HWHEELED if wheel_delta(record.button_state) > 0 => {
                (MouseButton::WheelRight, MouseAction::Press)
            }
            MOUSE_HWHEELED => (MouseButton::WheelLeft, MouseAction::Press),
            _ => return None,
        };
        self.previous_buttons = buttons;

        Some(MouseEvent {
            col: clamp_to_u16(record.col),
            row: clamp_to_u16(record.row),
            button,
            action,
            modifiers,
        })
    }
}

/// Signed wheel delta from the high word of the button state.
fn wheel_delta(button_state: u32) -> i16 {
    i16::from_ne_bytes(u16::try_from(button_state >> 16).unwrap_or(0).to_ne_bytes())
}

fn clamp_to_u16(value: i16) -> u16 { u16::try_from(value).unwrap_or(0) }
