// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{OSC_BACKGROUND_COLOR, OSC_CURSOR_COLOR, OSC_FOREGROUND_COLOR};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Which color an OSC 10 / 11 / 12 reply describes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum ColorRole {
    Foreground,
    Background,
    Cursor,
}

impl ColorRole {
    #[must_use]
    pub fn from_osc_selector(selector: u32) -> Option<Self> {
        match selector {
            OSC_FOREGROUND_COLOR => Some(Self::Foreground),
            OSC_BACKGROUND_COLOR => Some(Self::Background),
            OSC_CURSOR_COLOR => Some(Self::Cursor),
            _ => None,
        }
    }

    #[must_use]
    pub fn osc_selector(self) -> u32 {
        match self {
            Self::Foreground => OSC_FOREGROUND_COLOR,
            Self::Background => OSC_BACKGROUND_COLOR,
            Self::Cursor => OSC_CURSOR_COLOR,
        }
    }
}

/// Opaque 8 bit per channel color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fallback for malformed color payloads.
    pub const BLACK: Self = Self::new(0, 0, 0, 0xFF);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self { Self { r, g, b, a } }
}

impl Default for Rgba {
    fn default() -> Self { Self::BLACK }
}

/// Renders like `[ff]#1a2b3c` (alpha first).
impl Display for Rgba {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[{:02x}]#{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests_color {
    use super::*;
    use strum::IntoEnumIterator as _;

    #[test]
    fn test_osc_selector_round_trip() {
        for role in ColorRole::iter() {
            assert_eq!(ColorRole::from_osc_selector(role.osc_selector()), Some(role));
        }
        assert_eq!(ColorRole::from_osc_selector(4), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rgba::new(0x1a, 0x2b, 0x3c, 0xff).to_string(), "[ff]#1a2b3c");
        assert_eq!(Rgba::default(), Rgba::BLACK);
    }
}
