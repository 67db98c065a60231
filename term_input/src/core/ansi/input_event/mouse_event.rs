// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::KeyMod;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// X11 style mouse buttons.
///
/// ```text
/// 1 = left          5 = wheel down     9 = forward (5th button)
/// 2 = middle        6 = wheel left    10 = button 10
/// 3 = right         7 = wheel right   11 = button 11
/// 4 = wheel up      8 = backward (4th button)
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum_macros::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum MouseButton {
    #[default]
    None,
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
    WheelLeft,
    WheelRight,
    Backward,
    Forward,
    Button10,
    Button11,
}

impl MouseButton {
    #[must_use]
    pub fn is_wheel(self) -> bool {
        matches!(
            self,
            Self::WheelUp | Self::WheelDown | Self::WheelLeft | Self::WheelRight
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum MouseAction {
    Press,
    Release,
    /// Pointer moved. `button` holds the last known button, not a transition.
    Motion,
}

/// Mouse activity. `col` and `row` are zero based on every platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub col: u16,
    pub row: u16,
    pub button: MouseButton,
    pub action: MouseAction,
    pub modifiers: KeyMod,
}

impl Display for MouseEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "mouse {} {} at ({}, {})",
            self.button, self.action, self.col, self.row
        )?;
        if !self.modifiers.is_empty() {
            write!(f, " {:?}", self.modifiers)?;
        }
        Ok(())
    }
}
