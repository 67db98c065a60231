// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words urxvt DECCKM DECKPAM

//! Byte values that show up in terminal input sequences.
//!
//! # Sequence Families
//!
//! - `CSI` = `ESC [` (0x1B 0x5B): cursor keys, function keys, mouse reports, kitty
//!   keyboard reports, device attribute replies.
//! - `SS3` = `ESC O` (0x1B 0x4F): cursor keys in application mode (DECCKM), keypad
//!   keys in keypad application mode (DECKPAM).
//! - `OSC` = `ESC ]` (0x1B 0x5D): color query replies, terminated by `BEL` or
//!   `ST` (`ESC \`).
//!
//! # Modifier Encoding
//!
//! xterm sends `bits + 1` where `Shift=1`, `Alt=2`, `Ctrl=4`, `Meta=8`. So `CSI 1;5A`
//! is `ctrl+up` (5 - 1 = 4) and `CSI 1;16A` is all four modifiers.

// ==================== ANSI Sequence Components ====================

/// ESC byte (27 in decimal, 0x1B in hex)
pub const ANSI_ESC: u8 = 0x1B;

/// BEL byte (0x07), one of the two OSC terminators.
pub const ANSI_BEL: u8 = 0x07;

/// DEL byte (0x7F).
pub const ANSI_DEL: u8 = 0x7F;

/// CSI bracket byte: `[` (91 in decimal, 0x5B in hex)
pub const ANSI_CSI_BRACKET: u8 = b'[';

/// OSC bracket byte: `]` (93 in decimal, 0x5D in hex)
pub const ANSI_OSC_BRACKET: u8 = b']';

/// SS3 'O' byte: Second byte of SS3 sequences (0x4F)
pub const ANSI_SS3_O: u8 = b'O';

/// Second byte of `ST` (`ESC \`), the other OSC terminator.
pub const ANSI_ST_BACKSLASH: u8 = b'\\';

/// Parameter separator byte: `;` (59 in decimal, 0x3B in hex)
pub const ANSI_PARAM_SEPARATOR: u8 = b';';

/// Sub-parameter separator byte: `:` (kitty keyboard protocol, event types).
pub const ANSI_SUB_PARAM_SEPARATOR: u8 = b':';

/// Function key terminator: `~` (126 in decimal, 0x7E in hex)
pub const ANSI_FUNCTION_KEY_TERMINATOR: u8 = b'~';

/// Private parameter prefix `?` used by device attribute and kitty flag replies.
pub const ANSI_PRIVATE_PREFIX: u8 = b'?';

// ==================== CSI Byte Classes ====================

/// Parameter bytes are `0x30..=0x3F` (`0-9 : ; < = > ?`).
pub const CSI_PARAM_BYTE_RANGE: std::ops::RangeInclusive<u8> = 0x30..=0x3F;

/// Intermediate bytes are `0x20..=0x2F` (space and `!"#$%&'()*+,-./`).
pub const CSI_INTERMEDIATE_BYTE_RANGE: std::ops::RangeInclusive<u8> = 0x20..=0x2F;

/// Final bytes are `0x40..=0x7E` (`@`, `A-Z`, `[`, `^`, `a-z`, `~` and friends).
pub const CSI_FINAL_BYTE_RANGE: std::ops::RangeInclusive<u8> = 0x40..=0x7E;

// ==================== urxvt Modifier Suffixes ====================

/// urxvt `CSI n $`: Shift + numbered key.
pub const URXVT_SHIFT_SUFFIX: u8 = b'$';

/// urxvt `CSI n ^`: Ctrl + numbered key.
pub const URXVT_CTRL_SUFFIX: u8 = b'^';

/// urxvt `CSI n @`: Shift + Ctrl + numbered key.
pub const URXVT_SHIFT_CTRL_SUFFIX: u8 = b'@';

// ==================== Bracketed Paste ====================

/// `ESC [ 200 ~`: start of a bracketed paste.
pub const PASTE_START: &[u8] = b"\x1b[200~";

/// `ESC [ 201 ~`: end of a bracketed paste.
pub const PASTE_END: &[u8] = b"\x1b[201~";

// ==================== Mouse ====================

/// SGR mouse reports start with `CSI <`.
pub const MOUSE_SGR_PREFIX: u8 = b'<';

/// X10 mouse reports are `CSI M` followed by three raw bytes.
pub const MOUSE_X10_MARKER: u8 = b'M';

/// Total length of an X10 mouse report: `ESC [ M Cb Cx Cy`.
pub const MOUSE_X10_SEQUENCE_LEN: usize = 6;

/// X10 and urxvt encode button and coordinates with this offset.
pub const MOUSE_X10_OFFSET: u32 = 32;

/// SGR final byte for a press (or motion).
pub const MOUSE_SGR_PRESS: u8 = b'M';

/// SGR final byte for a release.
pub const MOUSE_SGR_RELEASE: u8 = b'm';

// ==================== Misc Reports ====================

/// `CSI I`: terminal gained focus.
pub const FOCUS_GAINED_FINAL: u8 = b'I';

/// `CSI O`: terminal lost focus.
pub const FOCUS_LOST_FINAL: u8 = b'O';

/// `CSI ? ... c`: primary device attributes reply.
pub const DEVICE_ATTRIBUTES_FINAL: u8 = b'c';

/// `CSI ... u`: kitty keyboard protocol key report (or `CSI ? flags u` flag report).
pub const KITTY_KEY_FINAL: u8 = b'u';

/// xterm `modifyOtherKeys` sequences start with this parameter: `CSI 27 ; m ; code ~`.
pub const MODIFY_OTHER_KEYS_PARAM: u32 = 27;

// ==================== OSC Color Selectors ====================

/// `OSC 10`: foreground color.
pub const OSC_FOREGROUND_COLOR: u32 = 10;

/// `OSC 11`: background color.
pub const OSC_BACKGROUND_COLOR: u32 = 11;

/// `OSC 12`: cursor color.
pub const OSC_CURSOR_COLOR: u32 = 12;
