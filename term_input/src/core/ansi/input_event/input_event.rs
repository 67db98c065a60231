// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{ColorRole, KeyEvent, MouseEvent, Rgba};
use crate::KittyFlags;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Everything the decoder can hand to the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Complete bracketed paste. Never partial.
    Paste(String),
    Focus(FocusState),
    /// Console buffer size change (Windows console records only).
    Resize { cols: u16, rows: u16 },
    /// Reply to an OSC 10 / 11 / 12 color query.
    Color { role: ColorRole, color: Rgba },
    /// Reply to a primary device attributes query (`CSI ? 62 ; 22 c`).
    PrimaryDeviceAttributes(Vec<u32>),
    /// Reply to a kitty keyboard flags query (`CSI ? flags u`).
    KittyKeyboardFlags(KittyFlags),
    /// Well formed but unrecognized sequence, kept verbatim for diagnostics.
    Unknown(UnknownSequence),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FocusState {
    Gained,
    Lost,
}

/// Which family an unrecognized sequence belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum SequenceKind {
    #[strum(to_string = "CSI")]
    Csi,
    #[strum(to_string = "OSC")]
    Osc,
    #[strum(to_string = "SS3")]
    Ss3,
    #[strum(to_string = "ESC")]
    Esc,
    #[strum(to_string = "invalid UTF-8")]
    InvalidUtf8,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownSequence {
    pub kind: SequenceKind,
    pub bytes: Vec<u8>,
}

impl UnknownSequence {
    #[must_use]
    pub fn new(kind: SequenceKind, bytes: &[u8]) -> Self {
        Self {
            kind,
            bytes: bytes.to_vec(),
        }
    }
}

/// Renders like `unknown CSI sequence: "\x1b[99z"`.
impl Display for UnknownSequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "unknown {} sequence: \"{}\"",
            self.kind,
            self.bytes.escape_ascii()
        )
    }
}

impl InputEvent {
    /// Shorthand for [`InputEvent::Unknown`] with a copy of `bytes`.
    #[must_use]
    pub fn unknown(kind: SequenceKind, bytes: &[u8]) -> Self {
        Self::Unknown(UnknownSequence::new(kind, bytes))
    }
}

impl Display for InputEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Key(key) => write!(f, "key {key} ({})", key.action),
            Self::Mouse(mouse) => write!(f, "{mouse}"),
            Self::Paste(text) => write!(f, "paste: {text:?}"),
            Self::Focus(state) => write!(f, "focus {state}"),
            Self::Resize { cols, rows } => write!(f, "resize {cols}x{rows}"),
            Self::Color { role, color } => write!(f, "{role} color: {color}"),
            Self::PrimaryDeviceAttributes(attrs) => write!(f, "DA1: {attrs:?}"),
            Self::KittyKeyboardFlags(flags) => write!(f, "kitty flags: {flags:?}"),
            Self::Unknown(unknown) => write!(f, "{unknown}"),
        }
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(key: KeyEvent) -> Self { Self::Key(key) }
}

impl From<MouseEvent> for InputEvent {
    fn from(mouse: MouseEvent) -> Self { Self::Mouse(mouse) }
}

impl From<UnknownSequence> for InputEvent {
    fn from(unknown: UnknownSequence) -> Self { Self::Unknown(unknown) }
}
