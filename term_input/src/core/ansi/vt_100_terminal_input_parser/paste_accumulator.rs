// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Bracketed paste collection.
//!
//! Once the start marker (`ESC [ 200 ~`) is seen, every byte is collected verbatim,
//! without any sequence decoding, until the end marker (`ESC [ 201 ~`) shows up. The
//! end marker may be split across reads. The collected bytes become a single
//! [`InputEvent::Paste`], decoded as lossy UTF-8.
//!
//! [`InputEvent::Paste`]: crate::InputEvent::Paste

use crate::PASTE_END;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PasteCollectionState {
    #[default]
    Inactive,
    Accumulating(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteAction {
    /// The end marker arrived. Holds the pasted text, without markers.
    Emit(String),
    /// Still collecting (or not collecting at all).
    Continue,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PasteAccumulator {
    state: PasteCollectionState,
}

impl PasteAccumulator {
    /// Starts collecting. Anything collected so far is dropped.
    pub fn start(&mut self) { self.state = PasteCollectionState::Accumulating(Vec::new()); }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, PasteCollectionState::Accumulating(_))
    }

    /// Number of bytes collected so far, including any partial end marker.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        match &self.state {
            PasteCollectionState::Inactive => 0,
            PasteCollectionState::Accumulating(buffer) => buffer.len(),
        }
    }

    /// Feeds one byte. Does nothing while inactive.
    pub fn push_byte(&mut self, byte: u8) -> PasteAction {
        let PasteCollectionState::Accumulating(buffer) = &mut self.state else {
            return PasteAction::Continue;
        };
        buffer.push(byte);
        if !buffer.ends_with(PASTE_END) {
            return PasteAction::Continue;
        }

        let mut buffer = std::mem::take(buffer);
        self.state = PasteCollectionState::Inactive;
        buffer.truncate(buffer.len() - PASTE_END.len());
        PasteAction::Emit(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Abandons an unfinished paste, returning how many bytes were dropped.
    pub fn abandon(&mut self) -> usize {
        let dropped = self.pending_len();
        self.state = PasteCollectionState::Inactive;
        dropped
    }
}
