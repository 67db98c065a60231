// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words terminfo cygwin putty

use crate::{KeyEvent, KeySym};

/// Supplementary key entries for a terminal type, merged last into the [`KeyTable`]
/// and only where no entry exists yet.
///
/// Plug in a real terminfo database reader here if you need one. The crate ships
/// [`BuiltinTerminfo`], which knows the handful of sequences that the VT220 / xterm /
/// urxvt tables don't cover.
///
/// [`KeyTable`]: super::KeyTable
pub trait TerminfoKeySource {
    /// Entries for the terminal type hint `term` (eg: the value of `$TERM`).
    fn key_entries(&self, term: &str) -> Vec<(Vec<u8>, KeyEvent)>;
}

/// Built in supplements for a few common terminal families.
///
/// | Family                      | Extra sequences                        |
/// |-----------------------------|----------------------------------------|
/// | `linux`, `cygwin`, `putty`  | `CSI [ A..E` = F1..F5, `CSI G` = begin |
/// | `st`                        | `CSI 4 h` = insert                     |
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinTerminfo;

/// Terminal families that [`BuiltinTerminfo`] knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermFamily {
    LinuxConsole,
    St,
    Other,
}

impl TermFamily {
    /// `xterm-256color` is `xterm`, `linux-16color` is `linux`, and so on.
    #[must_use]
    pub fn from_term(term: &str) -> Self {
        let base = term.split('-').next().unwrap_or_default();
        match base {
            "linux" | "cygwin" | "putty" => Self::LinuxConsole,
            "st" => Self::St,
            _ => Self::Other,
        }
    }
}

impl TerminfoKeySource for BuiltinTerminfo {
    fn key_entries(&self, term: &str) -> Vec<(Vec<u8>, KeyEvent)> {
        match TermFamily::from_term(term) {
            TermFamily::LinuxConsole => {
                let mut entries: Vec<(Vec<u8>, KeyEvent)> = (b'A'..=b'E')
                    .zip(1_u8..)
                    .map(|(final_byte, n)| {
                        (
                            vec![0x1B, b'[', b'[', final_byte],
                            KeyEvent::from_sym(KeySym::Function(n)),
                        )
                    })
                    .collect();
                entries.push((b"\x1b[G".to_vec(), KeyEvent::from_sym(KeySym::Begin)));
                entries
            }
            TermFamily::St => {
                vec![(b"\x1b[4h".to_vec(), KeyEvent::from_sym(KeySym::Insert))]
            }
            TermFamily::Other => vec![],
        }
    }
}
