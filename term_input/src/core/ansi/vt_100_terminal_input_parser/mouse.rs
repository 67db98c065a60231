// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Mouse decoding.
//!
//! POSIX terminals report mouse activity with an X11 style button byte (`cb`) in one
//! of three encodings:
//!
//! | Protocol | Format                    | Notes                                 |
//! | :------- | :------------------------ | :------------------------------------ |
//! | SGR      | `CSI < cb ; x ; y M` / `m` | `m` means release                     |
//! | urxvt    | `CSI cb ; x ; y M`         | `cb` is offset by 32                  |
//! | X10      | `CSI M cb x y`             | raw bytes, each offset by 32          |
//!
//! The button byte packs these bits:
//!
//! ```text
//! bit 0-1   button (0 left, 1 middle, 2 right, 3 none / release)
//! bit 2     shift          (4)
//! bit 3     alt            (8)
//! bit 4     ctrl          (16)
//! bit 5     motion        (32)
//! bit 6     wheel         (64)  buttons 4..=7
//! bit 7     extended     (128)  buttons 8..=11
//! ```
//!
//! Windows console records only report which buttons are down right now, so the
//! button that changed is inferred from the previous state with
//! [`button_from_state_delta()`].

use super::CsiParams;
use crate::{KeyMod, MOUSE_SGR_RELEASE, MOUSE_X10_OFFSET, MOUSE_X10_SEQUENCE_LEN,
            MouseAction, MouseButton, MouseEvent};

const MOUSE_BUTTON_BITS: u32 = 0b11;
const MOUSE_SHIFT_BIT: u32 = 4;
const MOUSE_ALT_BIT: u32 = 8;
const MOUSE_CTRL_BIT: u32 = 16;
const MOUSE_MOTION_BIT: u32 = 32;
const MOUSE_WHEEL_BIT: u32 = 64;
const MOUSE_EXTENDED_BIT: u32 = 128;

/// Windows console button state bits.
pub const FROM_LEFT_1ST_BUTTON_PRESSED: u32 = 0x0001;
pub const RIGHTMOST_BUTTON_PRESSED: u32 = 0x0002;
pub const FROM_LEFT_2ND_BUTTON_PRESSED: u32 = 0x0004;
pub const FROM_LEFT_3RD_BUTTON_PRESSED: u32 = 0x0008;
pub const FROM_LEFT_4TH_BUTTON_PRESSED: u32 = 0x0010;

/// When several buttons are down and none changed, the first one listed here wins.
const BUTTON_STATE_PRIORITY: [(u32, MouseButton); 5] = [
    (FROM_LEFT_1ST_BUTTON_PRESSED, MouseButton::Left),
    (FROM_LEFT_2ND_BUTTON_PRESSED, MouseButton::Middle),
    (RIGHTMOST_BUTTON_PRESSED, MouseButton::Right),
    (FROM_LEFT_3RD_BUTTON_PRESSED, MouseButton::Backward),
    (FROM_LEFT_4TH_BUTTON_PRESSED, MouseButton::Forward),
];

/// Builds a [`MouseEvent`] from an X11 button byte and one based coordinates.
#[must_use]
pub fn mouse_event_from_x11(cb: u32, x: u32, y: u32, is_release: bool) -> MouseEvent {
    let mut modifiers = KeyMod::empty();
    modifiers.set(KeyMod::SHIFT, cb & MOUSE_SHIFT_BIT != 0);
    modifiers.set(KeyMod::ALT, cb & MOUSE_ALT_BIT != 0);
    modifiers.set(KeyMod::CTRL, cb & MOUSE_CTRL_BIT != 0);

    let low_bits = cb & MOUSE_BUTTON_BITS;
    let button = if cb & MOUSE_WHEEL_BIT != 0 {
        [
            MouseButton::WheelUp,
            MouseButton::WheelDown,
            MouseButton::WheelLeft,
            MouseButton::WheelRight,
        ][low_bits as usize]
    } else if cb & MOUSE_EXTENDED_BIT != 0 {
        [
            MouseButton::Backward,
            MouseButton::Forward,
            MouseButton::Button10,
            MouseButton::Button11,
        ][low_bits as usize]
    } else {
        [
            MouseButton::Left,
            MouseButton::Middle,
            MouseButton::Right,
            MouseButton::None,
        ][low_bits as usize]
    };

    let action = if is_release {
        MouseAction::Release
    } else if cb & MOUSE_MOTION_BIT != 0 {
        MouseAction::Motion
    } else if button == MouseButton::None {
        // Legacy encodings report every release as "button 3".
        MouseAction::Release
    } else {
        MouseAction::Press
    };

    MouseEvent {
        col: to_zero_based(x),
        row: to_zero_based(y),
        button,
        action,
        modifiers,
    }
}

fn to_zero_based(coordinate: u32) -> u16 {
    u16::try_from(coordinate.saturating_sub(1)).unwrap_or(u16::MAX)
}

/// `CSI < cb ; x ; y M` (press / motion) or `... m` (release).
#[must_use]
pub fn decode_sgr_mouse(params: &CsiParams) -> Option<MouseEvent> {
    if params.len() != 3 || params.has_sub_params() {
        return None;
    }
    let cb = params.value(0)?;
    let x = params.value(1)?;
    let y = params.value(2)?;
    Some(mouse_event_from_x11(
        cb,
        x,
        y,
        params.final_byte == MOUSE_SGR_RELEASE,
    ))
}

/// `CSI cb ; x ; y M` where `cb` is offset by 32.
#[must_use]
pub fn decode_urxvt_mouse(params: &CsiParams) -> Option<MouseEvent> {
    if params.len() != 3 || params.has_sub_params() {
        return None;
    }
    let cb = params.value(0)?.checked_sub(MOUSE_X10_OFFSET)?;
    let x = params.value(1)?;
    let y = params.value(2)?;
    Some(mouse_event_from_x11(cb, x, y, false))
}

/// `CSI M cb x y` with three raw bytes, each offset by 32.
#[must_use]
pub fn decode_x10_mouse(seq: &[u8]) -> Option<MouseEvent> {
    if seq.len() != MOUSE_X10_SEQUENCE_LEN {
        return None;
    }
    let raw = |idx: usize| u32::from(seq[idx]).checked_sub(MOUSE_X10_OFFSET);
    Some(mouse_event_from_x11(raw(3)?, raw(4)?, raw(5)?, false))
}

/// Infers which button changed between two Windows console button states.
///
/// - Exactly one bit changed: that button, [`MouseAction::Press`] if it is now down,
///   else [`MouseAction::Release`].
/// - Nothing changed: the highest priority button that is still down (left, middle,
///   right, backward, forward), reported as [`MouseAction::Release`].
/// - Several bits changed: [`MouseButton::None`].
#[must_use]
pub fn button_from_state_delta(previous: u32, current: u32) -> (MouseButton, MouseAction) {
    let changed = previous ^ current;
    let action = if changed & current == 0 {
        MouseAction::Release
    } else {
        MouseAction::Press
    };

    let button = if changed == 0 {
        BUTTON_STATE_PRIORITY
            .iter()
            .find(|(bit, _)| current & bit != 0)
            .map_or(MouseButton::None, |(_, button)| *button)
    } else {
        BUTTON_STATE_PRIORITY
            .iter()
            .find(|(bit, _)| changed == *bit)
            .map_or(MouseButton::None, |(_, button)| *button)
    };

    (button, action)
}

#[cfg(test)]
mod tests_mouse {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn sgr(seq: &[u8]) -> MouseEvent {
        decode_sgr_mouse(&CsiParams::parse(seq).unwrap()).unwrap()
    }

    #[test]
    fn test_sgr_left_press_is_zero_based() {
        assert_eq!(
            sgr(b"\x1b[<0;10;5M"),
            MouseEvent {
                col: 9,
                row: 4,
                button: MouseButton::Left,
                action: MouseAction::Press,
                modifiers: KeyMod::empty(),
            }
        );
    }

    #[test]
    fn test_sgr_release() {
        let event = sgr(b"\x1b[<2;1;1m");
        assert_eq!(event.button, MouseButton::Right);
        assert_eq!(event.action, MouseAction::Release);
    }

    #[test_case(b"\x1b[<64;1;1M", MouseButton::WheelUp ; "wheel up")]
    #[test_case(b"\x1b[<65;1;1M", MouseButton::WheelDown ; "wheel down")]
    #[test_case(b"\x1b[<66;1;1M", MouseButton::WheelLeft ; "wheel left")]
    #[test_case(b"\x1b[<67;1;1M", MouseButton::WheelRight ; "wheel right")]
    #[test_case(b"\x1b[<128;1;1M", MouseButton::Backward ; "backward")]
    #[test_case(b"\x1b[<129;1;1M", MouseButton::Forward ; "forward")]
    fn test_sgr_buttons(seq: &[u8], expected: MouseButton) {
        assert_eq!(sgr(seq).button, expected);
    }

    #[test]
    fn test_sgr_drag_with_modifiers() {
        // 32 motion + 16 ctrl + 4 shift + 0 left.
        let event = sgr(b"\x1b[<52;3;4M");
        assert_eq!(event.action, MouseAction::Motion);
        assert_eq!(event.button, MouseButton::Left);
        assert_eq!(event.modifiers, KeyMod::CTRL | KeyMod::SHIFT);
    }

    #[test]
    fn test_sgr_motion_without_button() {
        let event = sgr(b"\x1b[<35;3;4M");
        assert_eq!(event.action, MouseAction::Motion);
        assert_eq!(event.button, MouseButton::None);
    }

    #[test]
    fn test_zero_coordinates_saturate() {
        let event = sgr(b"\x1b[<0;0;0M");
        assert_eq!((event.col, event.row), (0, 0));
    }

    #[test]
    fn test_urxvt() {
        let params = CsiParams::parse(b"\x1b[32;20;10M").unwrap();
        let event = decode_urxvt_mouse(&params).unwrap();
        assert_eq!((event.col, event.row), (19, 9));
        assert_eq!(event.button, MouseButton::Left);
        assert_eq!(event.action, MouseAction::Press);

        let params = CsiParams::parse(b"\x1b[35;20;10M").unwrap();
        assert_eq!(
            decode_urxvt_mouse(&params).unwrap().action,
            MouseAction::Release
        );
    }

    #[test]
    fn test_x10() {
        // cb = 32 + 1 (middle), x = 32 + 5, y = 32 + 7.
        let event = decode_x10_mouse(b"\x1b[M!%'").unwrap();
        assert_eq!(event.button, MouseButton::Middle);
        assert_eq!((event.col, event.row), (4, 6));
        assert_eq!(decode_x10_mouse(b"\x1b[M\x10%'"), None);
    }

    #[test_case(0, FROM_LEFT_1ST_BUTTON_PRESSED, MouseButton::Left, MouseAction::Press ; "left down")]
    #[test_case(FROM_LEFT_1ST_BUTTON_PRESSED, 0, MouseButton::Left, MouseAction::Release ; "left up")]
    #[test_case(0, RIGHTMOST_BUTTON_PRESSED, MouseButton::Right, MouseAction::Press ; "right down")]
    #[test_case(0, FROM_LEFT_2ND_BUTTON_PRESSED, MouseButton::Middle, MouseAction::Press ; "middle down")]
    #[test_case(0, FROM_LEFT_3RD_BUTTON_PRESSED, MouseButton::Backward, MouseAction::Press ; "backward down")]
    #[test_case(0, FROM_LEFT_4TH_BUTTON_PRESSED, MouseButton::Forward, MouseAction::Press ; "forward down")]
    #[test_case(0b11, 0b11, MouseButton::Left, MouseAction::Release ; "unchanged picks left first")]
    #[test_case(0b110, 0b110, MouseButton::Middle, MouseAction::Release ; "unchanged picks middle over right")]
    #[test_case(0, 0b11, MouseButton::None, MouseAction::Press ; "two buttons at once")]
    #[test_case(0, 0, MouseButton::None, MouseAction::Release ; "nothing")]
    fn test_button_from_state_delta(
        previous: u32,
        current: u32,
        button: MouseButton,
        action: MouseAction,
    ) {
        assert_eq!(button_from_state_delta(previous, current), (button, action));
    }
}
