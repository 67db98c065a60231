// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! xterm `modifyOtherKeys`: `CSI 27 ; mods ; code ~`.
//!
//! `code` is a Unicode code point. A few control codes mean a symbolic key instead
//! ([`MODIFY_OTHER_KEYS_SYMBOLS`]). Everything else is a character.

use super::CsiParams;
use crate::{InputEvent, KeyEvent, KeyMod, KeySym, MODIFY_OTHER_KEYS_PARAM, SequenceKind};

/// Code points that `modifyOtherKeys` reports for symbolic keys.
pub const MODIFY_OTHER_KEYS_SYMBOLS: [(u32, KeySym); 5] = [
    (8, KeySym::Backspace),
    (9, KeySym::Tab),
    (13, KeySym::Enter),
    (27, KeySym::Escape),
    (127, KeySym::Backspace),
];

#[must_use]
pub fn modify_other_keys_symbol(code: u32) -> Option<KeySym> {
    MODIFY_OTHER_KEYS_SYMBOLS
        .iter()
        .find(|(it, _)| *it == code)
        .map(|(_, sym)| *sym)
}

/// Decodes `seq`, a `CSI ... ~` sequence that wasn't in the key table. Anything that
/// isn't a well formed `modifyOtherKeys` report comes back as
/// [`InputEvent::Unknown`].
#[must_use]
pub fn decode_modify_other_keys(seq: &[u8], params: &CsiParams) -> InputEvent {
    decode_key(params).map_or_else(
        || InputEvent::unknown(SequenceKind::Csi, seq),
        InputEvent::Key,
    )
}

fn decode_key(params: &CsiParams) -> Option<KeyEvent> {
    if params.len() != 3
        || params.has_sub_params()
        || params.private_marker.is_some()
        || params.value(0)? != MODIFY_OTHER_KEYS_PARAM
    {
        return None;
    }
    let modifiers = KeyMod::from_xterm_param(params.value(1)?)?;
    let code = params.value(2)?;

    let key = match modify_other_keys_symbol(code) {
        Some(sym) => KeyEvent::from_sym(sym),
        None => KeyEvent::from_char(char::from_u32(code)?),
    };
    Some(key.with_modifiers(modifiers))
}
