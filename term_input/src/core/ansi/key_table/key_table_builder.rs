// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words urxvt terminfo DECCKM DECKPAM

//! The individual construction steps used by [`KeyTable::build()`].

use super::{KeyTable, TerminfoKeySource};
use crate::{ANSI_DEL, ANSI_ESC, DriverFlags, KeyEvent, KeyMod, KeySym,
            MODIFY_OTHER_KEYS_SYMBOLS, URXVT_CTRL_SUFFIX, URXVT_SHIFT_CTRL_SUFFIX,
            URXVT_SHIFT_SUFFIX};

/// `CSI <letter>` / `SS3 <letter>` cursor and function keys.
pub const CURSOR_KEY_FINALS: [(u8, KeySym); 11] = [
    (b'A', KeySym::Up),
    (b'B', KeySym::Down),
    (b'C', KeySym::Right),
    (b'D', KeySym::Left),
    (b'E', KeySym::Begin),
    (b'F', KeySym::End),
    (b'H', KeySym::Home),
    (b'P', KeySym::Function(1)),
    (b'Q', KeySym::Function(2)),
    (b'R', KeySym::Function(3)),
    (b'S', KeySym::Function(4)),
];

/// `SS3 <letter>` keypad keys in keypad application mode (DECKPAM).
pub const KEYPAD_KEY_FINALS: [(u8, KeySym); 18] = [
    (b'M', KeySym::KpEnter),
    (b'X', KeySym::KpEqual),
    (b'j', KeySym::KpMul),
    (b'k', KeySym::KpPlus),
    (b'l', KeySym::KpComma),
    (b'm', KeySym::KpMinus),
    (b'n', KeySym::KpPeriod),
    (b'o', KeySym::KpDiv),
    (b'p', KeySym::Kp0),
    (b'q', KeySym::Kp1),
    (b'r', KeySym::Kp2),
    (b's', KeySym::Kp3),
    (b't', KeySym::Kp4),
    (b'u', KeySym::Kp5),
    (b'v', KeySym::Kp6),
    (b'w', KeySym::Kp7),
    (b'x', KeySym::Kp8),
    (b'y', KeySym::Kp9),
];

/// `CSI <n> ~` codes for F1..F20. There are no codes 16, 22, 27, or 30.
pub const FUNCTION_KEY_CODES: [(u32, u8); 20] = [
    (11, 1),
    (12, 2),
    (13, 3),
    (14, 4),
    (15, 5),
    (17, 6),
    (18, 7),
    (19, 8),
    (20, 9),
    (21, 10),
    (23, 11),
    (24, 12),
    (25, 13),
    (26, 14),
    (28, 15),
    (29, 16),
    (31, 17),
    (32, 18),
    (33, 19),
    (34, 20),
];

/// Every `CSI <n> ~` key: editing keys 1..=8 followed by F1..F20.
///
/// `1` is Home (or Find with [`DriverFlags::FIND`]) and `4` is End (or Select with
/// [`DriverFlags::SELECT`]).
#[must_use]
pub fn numbered_keys(flags: DriverFlags) -> Vec<(u32, KeySym)> {
    let find = if flags.contains(DriverFlags::FIND) {
        KeySym::Find
    } else {
        KeySym::Home
    };
    let select = if flags.contains(DriverFlags::SELECT) {
        KeySym::Select
    } else {
        KeySym::End
    };

    let mut keys = vec![
        (1, find),
        (2, KeySym::Insert),
        (3, KeySym::Delete),
        (4, select),
        (5, KeySym::PgUp),
        (6, KeySym::PgDown),
        (7, KeySym::Home),
        (8, KeySym::End),
    ];
    keys.extend(
        FUNCTION_KEY_CODES
            .iter()
            .map(|&(code, n)| (code, KeySym::Function(n))),
    );
    keys
}

fn ctrl_char(ch: char) -> KeyEvent { KeyEvent::from_char(ch).with_modifiers(KeyMod::CTRL) }

/// Step 1: C0 controls, space, and delete.
pub fn register_c0_controls(table: &mut KeyTable, flags: DriverFlags) {
    let nul = if flags.contains(DriverFlags::CTRL_AT) {
        ctrl_char('@')
    } else if flags.contains(DriverFlags::SPACE) {
        ctrl_char(' ')
    } else {
        KeyEvent::from_sym(KeySym::Space).with_modifiers(KeyMod::CTRL)
    };
    let tab = if flags.contains(DriverFlags::CTRL_I) {
        ctrl_char('i')
    } else {
        KeyEvent::from_sym(KeySym::Tab)
    };
    let enter = if flags.contains(DriverFlags::CTRL_M) {
        ctrl_char('m')
    } else {
        KeyEvent::from_sym(KeySym::Enter)
    };
    let esc = if flags.contains(DriverFlags::CTRL_OPEN_BRACKET) {
        ctrl_char('[')
    } else {
        KeyEvent::from_sym(KeySym::Escape)
    };
    let space = if flags.contains(DriverFlags::SPACE) {
        KeyEvent::from_char(' ')
    } else {
        KeyEvent::from_sym_and_char(KeySym::Space, ' ')
    };
    let del = if flags.contains(DriverFlags::BACKSPACE) {
        KeyEvent::from_sym(KeySym::Delete)
    } else {
        KeyEvent::from_sym(KeySym::Backspace)
    };

    for byte in 0x00_u8..=0x1F {
        let key = match byte {
            0x00 => nul.clone(),
            0x09 => tab.clone(),
            0x0D => enter.clone(),
            0x1B => esc.clone(),
            // SOH..SUB are ctrl+a..ctrl+z.
            0x01..=0x1A => ctrl_char(char::from(b'a' + byte - 1)),
            // FS, GS, RS, US.
            _ => ctrl_char(char::from(b'\\' + byte - 0x1C)),
        };
        table.insert_if_absent([byte], key);
    }

    table.insert_if_absent([b' '], space);
    table.insert_if_absent([ANSI_DEL], del);
}

/// Step 2: fixed VT100 / VT220 sequences in normal, DECCKM, and DECKPAM modes.
pub fn register_fixed_sequences(table: &mut KeyTable, flags: DriverFlags) {
    table.insert_if_absent(
        *b"\x1b[Z",
        KeyEvent::from_sym(KeySym::Tab).with_modifiers(KeyMod::SHIFT),
    );

    for (code, sym) in numbered_keys(flags).into_iter().take(8) {
        table.insert_if_absent(format!("\x1b[{code}~"), KeyEvent::from_sym(sym));
    }

    for (final_byte, sym) in CURSOR_KEY_FINALS {
        table.insert_if_absent([ANSI_ESC, b'[', final_byte], KeyEvent::from_sym(sym));
        table.insert_if_absent([ANSI_ESC, b'O', final_byte], KeyEvent::from_sym(sym));
    }

    for (final_byte, sym) in KEYPAD_KEY_FINALS {
        table.insert_if_absent([ANSI_ESC, b'O', final_byte], KeyEvent::from_sym(sym));
    }
}

/// Step 3: `CSI <n> ~` for every numbered key.
pub fn register_numbered_keys(table: &mut KeyTable, flags: DriverFlags) {
    for (code, sym) in numbered_keys(flags) {
        table.insert_if_absent(format!("\x1b[{code}~"), KeyEvent::from_sym(sym));
    }
}

/// Step 4: xterm style modifier variants for all 15 non-empty modifier combinations.
pub fn register_xterm_modifier_keys(table: &mut KeyTable, flags: DriverFlags) {
    let numbered = numbered_keys(flags);

    for modifiers in KeyMod::non_empty_combinations() {
        let param = modifiers.to_xterm_param();

        // CSI 1 ; <modifier> <letter>
        for (final_byte, sym) in CURSOR_KEY_FINALS {
            let final_char = char::from(final_byte);
            table.insert_if_absent(
                format!("\x1b[1;{param}{final_char}"),
                KeyEvent::from_sym(sym).with_modifiers(modifiers),
            );
        }

        // SS3 <modifier> <letter>
        for (final_byte, sym) in KEYPAD_KEY_FINALS {
            let final_char = char::from(final_byte);
            table.insert_if_absent(
                format!("\x1bO{param}{final_char}"),
                KeyEvent::from_sym(sym).with_modifiers(modifiers),
            );
        }

        // CSI <number> ; <modifier> ~
        for &(code, sym) in &numbered {
            table.insert_if_absent(
                format!("\x1b[{code};{param}~"),
                KeyEvent::from_sym(sym).with_modifiers(modifiers),
            );
        }

        // CSI 27 ; <modifier> ; <code> ~
        for (code, sym) in MODIFY_OTHER_KEYS_SYMBOLS {
            table.insert_if_absent(
                format!("\x1b[27;{param};{code}~"),
                KeyEvent::from_sym(sym).with_modifiers(modifiers),
            );
        }
    }
}

/// Step 5: urxvt arrows and `$` / `^` / `@` suffixed numbered keys.
pub fn register_urxvt_keys(table: &mut KeyTable, flags: DriverFlags) {
    let arrows = [
        (b'a', KeySym::Up),
        (b'b', KeySym::Down),
        (b'c', KeySym::Right),
        (b'd', KeySym::Left),
    ];
    for (final_byte, sym) in arrows {
        table.insert_if_absent(
            [ANSI_ESC, b'[', final_byte],
            KeyEvent::from_sym(sym).with_modifiers(KeyMod::SHIFT),
        );
        table.insert_if_absent(
            [ANSI_ESC, b'O', final_byte],
            KeyEvent::from_sym(sym).with_modifiers(KeyMod::CTRL),
        );
    }

    let suffixes = [
        (URXVT_SHIFT_SUFFIX, KeyMod::SHIFT),
        (URXVT_CTRL_SUFFIX, KeyMod::CTRL),
        (URXVT_SHIFT_CTRL_SUFFIX, KeyMod::SHIFT | KeyMod::CTRL),
    ];
    for (code, sym) in numbered_keys(flags) {
        for (suffix, modifiers) in suffixes {
            let mut seq = format!("\x1b[{code}").into_bytes();
            seq.push(suffix);
            table.insert_if_absent(seq, KeyEvent::from_sym(sym).with_modifiers(modifiers));
        }
    }
}

/// Step 6: `ESC` + every existing entry, with [`KeyMod::ALT`] added.
///
/// Iterates over a snapshot, so entries added here are never duplicated again.
pub fn register_alt_prefixed_keys(table: &mut KeyTable) {
    for (seq, key) in table.snapshot() {
        let mut alt_seq = Vec::with_capacity(seq.len() + 1);
        alt_seq.push(ANSI_ESC);
        alt_seq.extend_from_slice(&seq);
        table.insert_if_absent(alt_seq, key.add_modifiers(KeyMod::ALT));
    }
}

/// Step 7: terminfo supplements. Only fills gaps.
pub fn register_terminfo_keys(
    table: &mut KeyTable,
    term: &str,
    terminfo: &dyn TerminfoKeySource,
) {
    for (seq, key) in terminfo.key_entries(term) {
        table.insert_if_absent(seq, key);
    }
}

#[cfg(test)]
mod tests_key_table_builder {
    use super::*;
    use crate::{BuiltinTerminfo, DriverConfig};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn default_table() -> KeyTable { KeyTable::build(DriverFlags::empty(), None, &BuiltinTerminfo) }

    fn lookup(table: &KeyTable, seq: &[u8]) -> KeyEvent { table.get(seq).unwrap().clone() }

    fn sym(sym: KeySym, modifiers: KeyMod) -> KeyEvent {
        KeyEvent::from_sym(sym).with_modifiers(modifiers)
    }

    #[test]
    fn test_build_is_idempotent() {
        for flags in [
            DriverFlags::empty(),
            DriverFlags::all(),
            DriverFlags::CTRL_I | DriverFlags::FIND,
        ] {
            let config = DriverConfig::new(flags, Some("linux".into()));
            assert_eq!(KeyTable::from_config(&config), KeyTable::from_config(&config));
        }
    }

    #[test_case(DriverFlags::empty(), sym(KeySym::Space, KeyMod::CTRL) ; "ctrl space")]
    #[test_case(DriverFlags::SPACE, ctrl_char(' ') ; "ctrl space text")]
    #[test_case(DriverFlags::CTRL_AT, ctrl_char('@') ; "ctrl at")]
    #[test_case(DriverFlags::CTRL_AT | DriverFlags::SPACE, ctrl_char('@') ; "ctrl at wins")]
    fn test_nul_variance(flags: DriverFlags, expected: KeyEvent) {
        let table = KeyTable::build(flags, None, &BuiltinTerminfo);
        assert_eq!(lookup(&table, b"\x00"), expected);
    }

    #[test_case(
        b"\t",
        DriverFlags::CTRL_I,
        KeyEvent::from_sym(KeySym::Tab),
        ctrl_char('i') ;
        "tab or ctrl i"
    )]
    #[test_case(
        b"\r",
        DriverFlags::CTRL_M,
        KeyEvent::from_sym(KeySym::Enter),
        ctrl_char('m') ;
        "enter or ctrl m"
    )]
    #[test_case(
        b"\x1b",
        DriverFlags::CTRL_OPEN_BRACKET,
        KeyEvent::from_sym(KeySym::Escape),
        ctrl_char('[') ;
        "escape or ctrl open bracket"
    )]
    #[test_case(
        b"\x7f",
        DriverFlags::BACKSPACE,
        KeyEvent::from_sym(KeySym::Backspace),
        KeyEvent::from_sym(KeySym::Delete) ;
        "backspace or delete"
    )]
    #[test_case(
        b"\x1b[1~",
        DriverFlags::FIND,
        KeyEvent::from_sym(KeySym::Home),
        KeyEvent::from_sym(KeySym::Find) ;
        "home or find"
    )]
    #[test_case(
        b"\x1b[4~",
        DriverFlags::SELECT,
        KeyEvent::from_sym(KeySym::End),
        KeyEvent::from_sym(KeySym::Select) ;
        "end or select"
    )]
    fn test_flag_variance(
        seq: &[u8],
        flag: DriverFlags,
        default_key: KeyEvent,
        flagged_key: KeyEvent,
    ) {
        assert_eq!(lookup(&default_table(), seq), default_key);
        let flagged = KeyTable::build(flag, None, &BuiltinTerminfo);
        assert_eq!(lookup(&flagged, seq), flagged_key);
    }

    #[test]
    fn test_c0_letters_and_punctuation() {
        let table = default_table();
        assert_eq!(lookup(&table, b"\x01"), ctrl_char('a'));
        assert_eq!(lookup(&table, b"\x08"), ctrl_char('h'));
        assert_eq!(lookup(&table, b"\x1a"), ctrl_char('z'));
        assert_eq!(lookup(&table, b"\x1c"), ctrl_char('\\'));
        assert_eq!(lookup(&table, b"\x1d"), ctrl_char(']'));
        assert_eq!(lookup(&table, b"\x1e"), ctrl_char('^'));
        assert_eq!(lookup(&table, b"\x1f"), ctrl_char('_'));
        assert_eq!(
            lookup(&table, b" "),
            KeyEvent::from_sym_and_char(KeySym::Space, ' ')
        );
    }

    #[test]
    fn test_every_modifier_combination_is_registered() {
        let table = default_table();
        for modifiers in KeyMod::non_empty_combinations() {
            let param = modifiers.to_xterm_param();
            assert_eq!(
                lookup(&table, format!("\x1b[1;{param}A").as_bytes()),
                sym(KeySym::Up, modifiers)
            );
            assert_eq!(
                lookup(&table, format!("\x1bO{param}M").as_bytes()),
                sym(KeySym::KpEnter, modifiers)
            );
            assert_eq!(
                lookup(&table, format!("\x1b[15;{param}~").as_bytes()),
                sym(KeySym::Function(5), modifiers)
            );
            assert_eq!(
                lookup(&table, format!("\x1b[27;{param};13~").as_bytes()),
                sym(KeySym::Enter, modifiers)
            );
        }
    }

    #[test]
    fn test_no_xterm_skips_modifier_keys() {
        let table = KeyTable::build(DriverFlags::NO_XTERM, None, &BuiltinTerminfo);
        assert!(!table.contains(b"\x1b[1;5A"));
        assert!(table.contains(b"\x1b[A"));
    }

    #[test]
    fn test_urxvt_keys() {
        let table = default_table();
        assert_eq!(lookup(&table, b"\x1b[a"), sym(KeySym::Up, KeyMod::SHIFT));
        assert_eq!(lookup(&table, b"\x1bOd"), sym(KeySym::Left, KeyMod::CTRL));
        assert_eq!(lookup(&table, b"\x1b[3$"), sym(KeySym::Delete, KeyMod::SHIFT));
        assert_eq!(lookup(&table, b"\x1b[5^"), sym(KeySym::PgUp, KeyMod::CTRL));
        assert_eq!(
            lookup(&table, b"\x1b[24@"),
            sym(KeySym::Function(12), KeyMod::SHIFT | KeyMod::CTRL)
        );
    }

    /// urxvt sends `CSI 23 ~` for Shift+F1, which is also plain F11.
    #[test]
    fn test_urxvt_shift_f1_collides_with_f11() {
        let table = default_table();
        assert_eq!(
            lookup(&table, b"\x1b[23~"),
            KeyEvent::from_sym(KeySym::Function(11))
        );
        assert_eq!(
            lookup(&table, b"\x1b[23$"),
            sym(KeySym::Function(11), KeyMod::SHIFT)
        );
    }

    #[test]
    fn test_alt_prefixed_duplicates() {
        let table = default_table();
        assert_eq!(lookup(&table, b"\x1b\x1b[A"), sym(KeySym::Up, KeyMod::ALT));
        assert_eq!(
            lookup(&table, b"\x1b\x1b[1;5A"),
            sym(KeySym::Up, KeyMod::CTRL | KeyMod::ALT)
        );
        assert_eq!(lookup(&table, b"\x1b\x1b"), sym(KeySym::Escape, KeyMod::ALT));
        assert_eq!(
            lookup(&table, b"\x1b\x01"),
            ctrl_char('a').add_modifiers(KeyMod::ALT)
        );
        // Only one level of duplication.
        assert!(!table.contains(b"\x1b\x1b\x1b[A"));
    }

    #[test]
    fn test_terminfo_fills_gaps_only() {
        let linux = KeyTable::build(DriverFlags::empty(), Some("linux"), &BuiltinTerminfo);
        assert_eq!(
            lookup(&linux, b"\x1b[[A"),
            KeyEvent::from_sym(KeySym::Function(1))
        );
        // Already mapped by the VT220 table, not overridden.
        assert_eq!(lookup(&linux, b"\x1b[1~"), KeyEvent::from_sym(KeySym::Home));

        let skipped =
            KeyTable::build(DriverFlags::NO_TERMINFO, Some("linux"), &BuiltinTerminfo);
        assert!(!skipped.contains(b"\x1b[[A"));
    }
}
