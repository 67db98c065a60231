// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Stateful decoder for terminal input bytes. See [`InputDecoder`] docs.

use super::{PasteAccumulator, PasteAction, SequenceBoundary, classify_sequence,
            find_sequence_boundary};
use crate::{ANSI_CSI_BRACKET, ANSI_ESC, ANSI_OSC_BRACKET, ANSI_SS3_O, DriverConfig,
            InputEvent, KeyTable, PASTE_END, PASTE_START, SequenceKind};
use std::collections::VecDeque;

/// Set to `true` to log every decoded sequence.
pub const DEBUG_TERM_INPUT_SHOW_DECODER: bool = false;

/// Stateful decoder for terminal input bytes.
///
/// Accumulates bytes and decodes them into [`InputEvent`]s using the `more` flag to
/// tell a lone `ESC` key apart from the start of a sequence:
///
/// - `more = true`: more bytes might be coming, wait before deciding.
/// - `more = false`: no more bytes available, a lone `ESC` is the `ESC` key.
///
/// This works because if [`read()`] fills the entire buffer, more data is likely
/// waiting; if it returns fewer bytes, all available input has been drained.
///
/// Bytes between the bracketed paste markers skip sequence decoding and are handed to
/// a [`PasteAccumulator`] instead.
///
/// [`read()`]: std::io::Read::read
#[derive(Debug)]
pub struct InputDecoder {
    key_table: KeyTable,
    /// Bytes of the sequence currently being decoded.
    buffer: Vec<u8>,
    paste: PasteAccumulator,
    /// Decoded events ready to be consumed.
    events: VecDeque<InputEvent>,
}

impl InputDecoder {
    #[must_use]
    pub fn new(key_table: KeyTable) -> Self {
        Self {
            key_table,
            buffer: Vec::with_capacity(256),
            paste: PasteAccumulator::default(),
            events: VecDeque::with_capacity(128),
        }
    }

    #[must_use]
    pub fn from_config(config: &DriverConfig) -> Self {
        Self::new(KeyTable::from_config(config))
    }

    #[must_use]
    pub fn key_table(&self) -> &KeyTable { &self.key_table }

    /// `true` if bytes are buffered that haven't become an event yet (a partial
    /// sequence, or a paste still waiting for its end marker).
    #[must_use]
    pub fn has_pending_bytes(&self) -> bool {
        !self.buffer.is_empty() || self.paste.is_active()
    }

    /// Process incoming bytes and decode them into events.
    /// - `bytes`: raw bytes read from the terminal.
    /// - `more`: whether more data is likely available (the read filled its buffer).
    pub fn advance(&mut self, bytes: &[u8], more: bool) {
        for (idx, &byte) in bytes.iter().enumerate() {
            // True if more bytes remain in this chunk, or if the read filled its
            // buffer.
            let more = idx + 1 < bytes.len() || more;

            if self.paste.is_active() {
                self.push_paste_byte(byte);
                continue;
            }

            self.buffer.push(byte);
            self.drain_complete_sequences(more);
        }
    }

    /// Decodes whatever is still buffered, as if no more bytes will ever arrive. Call
    /// this at end of input. Leftover bytes that don't form a sequence become
    /// [`InputEvent::Unknown`]. An unfinished paste is dropped.
    pub fn flush(&mut self) {
        self.drain_complete_sequences(false);

        if !self.buffer.is_empty() {
            let leftover = std::mem::take(&mut self.buffer);
            self.push_event(InputEvent::unknown(sequence_kind_of(&leftover), &leftover));
        }

        if self.paste.is_active() {
            let dropped = self.paste.abandon();
            tracing::debug!(
                message = "InputDecoder::flush: dropping unfinished paste",
                dropped_bytes = dropped
            );
        }
    }

    fn drain_complete_sequences(&mut self, more: bool) {
        while !self.buffer.is_empty() {
            // A start marker followed by more bytes in the same sequence cut.
            if self.paste.is_active() {
                let pending = std::mem::take(&mut self.buffer);
                let mut rest = pending.iter();
                for &byte in rest.by_ref() {
                    if self.push_paste_byte(byte) {
                        break;
                    }
                }
                self.buffer = rest.copied().collect();
                continue;
            }

            match find_sequence_boundary(&self.buffer, more) {
                SequenceBoundary::Incomplete => return,
                SequenceBoundary::Complete(len) => {
                    let seq: Vec<u8> = self.buffer.drain(..len).collect();
                    self.dispatch(&seq);
                }
            }
        }
    }

    fn dispatch(&mut self, seq: &[u8]) {
        if seq == PASTE_START {
            self.paste.start();
            return;
        }
        if seq == PASTE_END {
            // End marker without a start.
            self.push_event(InputEvent::Paste(String::new()));
            return;
        }
        let event = classify_sequence(seq, &self.key_table);
        DEBUG_TERM_INPUT_SHOW_DECODER.then(|| {
            tracing::debug!(
                message = "InputDecoder::dispatch",
                seq = %seq.escape_ascii(),
                event = %event
            );
        });
        self.push_event(event);
    }

    /// Returns `true` when this byte completed the paste.
    fn push_paste_byte(&mut self, byte: u8) -> bool {
        match self.paste.push_byte(byte) {
            PasteAction::Emit(text) => {
                self.push_event(InputEvent::Paste(text));
                true
            }
            PasteAction::Continue => false,
        }
    }

    fn push_event(&mut self, event: InputEvent) { self.events.push_back(event); }
}

fn sequence_kind_of(bytes: &[u8]) -> SequenceKind {
    match bytes {
        [ANSI_ESC, ANSI_CSI_BRACKET, ..] => SequenceKind::Csi,
        [ANSI_ESC, ANSI_OSC_BRACKET, ..] => SequenceKind::Osc,
        [ANSI_ESC, ANSI_SS3_O, ..] => SequenceKind::Ss3,
        [ANSI_ESC, ..] => SequenceKind::Esc,
        _ => SequenceKind::InvalidUtf8,
    }
}

impl Iterator for InputDecoder {
    type Item = InputEvent;

    fn next(&mut self) -> Option<Self::Item> { self.events.pop_front() }
}

/// Shared test helpers for [`InputDecoder`] tests.
#[cfg(test)]
mod test_fixtures {
    pub use super::InputDecoder;
    pub use crate::{DriverConfig, DriverFlags, FocusState, InputEvent, KeyAction,
                    KeyEvent, KeyMod, KeySym, KeyTable, SequenceKind};

    pub fn decoder() -> InputDecoder { InputDecoder::from_config(&DriverConfig::default()) }

    pub fn decode_all(bytes: &[u8]) -> Vec<InputEvent> {
        let mut decoder = decoder();
        decoder.advance(bytes, false);
        decoder.collect()
    }

    pub fn key(key: KeyEvent) -> InputEvent { InputEvent::Key(key) }

    pub fn ch(c: char) -> InputEvent { key(KeyEvent::from_char(c)) }
}



#[cfg(test)]
mod tests_key_table_properties {
    use super::test_fixtures::*;
    use pretty_assertions::assert_eq;

    fn assert_every_entry_decodes(config: &DriverConfig) {
        let table = KeyTable::from_config(config);
        for (seq, expected) in table.iter() {
            let mut decoder = InputDecoder::new(table.clone());
            decoder.advance(seq, false);
            assert_eq!(
                decoder.collect::<Vec<_>>(),
                vec![key(expected.clone())],
                "sequence {}",
                seq.escape_ascii()
            );
        }
    }

    fn assert_every_entry_decodes_with_alt(config: &DriverConfig) {
        let table = KeyTable::from_config(config);
        for (seq, expected) in table.iter() {
            let mut prefixed = vec![b'\x1b'];
            prefixed.extend_from_slice(seq);

            let mut decoder = InputDecoder::new(table.clone());
            decoder.advance(&prefixed, false);
            assert_eq!(
                decoder.collect::<Vec<_>>(),
                vec![key(expected.clone().add_modifiers(KeyMod::ALT))],
                "sequence {}",
                prefixed.escape_ascii()
            );
        }
    }

    #[test]
    fn test_default_table_entries_decode() {
        assert_every_entry_decodes(&DriverConfig::default());
    }

    #[test]
    fn test_default_table_entries_decode_with_alt() {
        assert_every_entry_decodes_with_alt(&DriverConfig::default());
    }

    #[test]
    fn test_linux_console_table_entries_decode() {
        let config = DriverConfig::new(DriverFlags::empty(), Some("linux".to_string()));
        assert_every_entry_decodes(&config);
        assert_every_entry_decodes_with_alt(&config);
    }

    #[test]
    fn test_all_flags_table_entries_decode() {
        let config = DriverConfig::new(DriverFlags::all(), None);
        assert_every_entry_decodes(&config);
        assert_every_entry_decodes_with_alt(&config);
    }

    #[test]
    fn test_every_modifier_combination() {
        let mut decoder = decoder();
        for modifiers in KeyMod::non_empty_combinations() {
            let param = modifiers.to_xterm_param();
            let cases = [
                (format!("\x1b[1;{param}A"), KeyEvent::from_sym(KeySym::Up)),
                (format!("\x1b[3;{param}~"), KeyEvent::from_sym(KeySym::Delete)),
                (format!("\x1b[15;{param}~"), KeyEvent::from_sym(KeySym::Function(5))),
                (format!("\x1b[27;{param};13~"), KeyEvent::from_sym(KeySym::Enter)),
                (format!("\x1b[27;{param};120~"), KeyEvent::from_char('x')),
            ];
            for (seq, base) in cases {
                decoder.advance(seq.as_bytes(), false);
                assert_eq!(
                    decoder.next(),
                    Some(key(base.with_modifiers(modifiers))),
                    "sequence {}",
                    seq.escape_default()
                );
            }
        }
    }

    #[test]
    fn test_kitty_release_passes_through_table() {
        assert_eq!(
            decode_all(b"\x1b[1;5:3A"),
            vec![key(
                KeyEvent::from_sym(KeySym::Up)
                    .with_modifiers(KeyMod::CTRL)
                    .with_action(KeyAction::Release)
            )]
        );
    }
}
