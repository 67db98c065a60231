// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words urxvt terminfo DECCKM DECKPAM

//! Literal escape sequence to [`KeyEvent`] lookup table.
//!
//! [`KeyTable::build()`] runs these steps in order. Later steps only ever add entries,
//! they never overwrite one that an earlier step produced:
//!
//! ```text
//! ┌───┬─────────────────────────────────────────────────────────────────────┐
//! │ 1 │ C0 controls 0x00..=0x1F, SP, DEL (DriverFlags variance points)      │
//! │ 2 │ Fixed sequences: CSI Z, CSI 1..8 ~, normal mode CSI A..S,           │
//! │   │ DECCKM SS3 A..S, DECKPAM SS3 M X j..y                               │
//! │ 3 │ CSI n ~ for F1..F20 and the editing keys                            │
//! │ 4 │ xterm: 15 modifier combos x (CSI 1;m X, SS3 m X, CSI n;m ~,         │
//! │   │ CSI 27;m;code ~)                      (skipped with NO_XTERM)       │
//! │ 5 │ urxvt: CSI a..d, SS3 a..d, CSI n $ / ^ / @                          │
//! │ 6 │ ESC + every entry above, with ALT added (over a snapshot)           │
//! │ 7 │ Terminfo supplements, gaps only       (skipped with NO_TERMINFO)    │
//! └───┴─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # urxvt Function Keys
//!
//! urxvt reports Shift+F1..F10 with the codes of F11..F20 (`CSI 23 ~` and so on). So
//! Shift+F1 decodes as F11, exactly like a real urxvt. This is intentional.
//!
//! [`KeyEvent`]: crate::KeyEvent

// Attach sources.
pub mod key_table_builder;
pub mod key_table_impl;
pub mod terminfo;

// Re-export.
pub use key_table_builder::*;
pub use key_table_impl::*;
pub use terminfo::*;
