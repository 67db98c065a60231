// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

bitflags::bitflags! {
    /// Selects between the documented variance points when the [`KeyTable`] is built.
    ///
    /// Terminals disagree on what a handful of bytes mean. The defaults follow xterm;
    /// each flag switches one entry (or one family of entries) to the alternative
    /// reading.
    ///
    /// | Flag                | Default reading      | Flagged reading            |
    /// |---------------------|----------------------|----------------------------|
    /// | `CTRL_AT`           | `NUL` = `ctrl+space` | `NUL` = `ctrl+@`           |
    /// | `CTRL_I`            | `HT` = `tab`         | `HT` = `ctrl+i`            |
    /// | `CTRL_M`            | `CR` = `enter`       | `CR` = `ctrl+m`            |
    /// | `CTRL_OPEN_BRACKET` | `ESC` = `escape`     | `ESC` = `ctrl+[`           |
    /// | `SPACE`             | `SP` = `space` key   | `SP` = `' '` text only     |
    /// | `BACKSPACE`         | `DEL` = `backspace`  | `DEL` = `delete`           |
    /// | `FIND`              | `CSI 1 ~` = `home`   | `CSI 1 ~` = `find`         |
    /// | `SELECT`            | `CSI 4 ~` = `end`    | `CSI 4 ~` = `select`       |
    /// | `NO_XTERM`          | xterm modifiers on   | xterm modifier keys off    |
    /// | `NO_TERMINFO`       | terminfo merged      | terminfo skipped           |
    ///
    /// `SPACE` also turns `NUL` into `ctrl+' '`; `CTRL_AT` wins if both are set.
    ///
    /// [`KeyTable`]: crate::KeyTable
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DriverFlags: u16 {
        const CTRL_AT = 1 << 0;
        const CTRL_I = 1 << 1;
        const CTRL_M = 1 << 2;
        const CTRL_OPEN_BRACKET = 1 << 3;
        const BACKSPACE = 1 << 4;
        const FIND = 1 << 5;
        const SELECT = 1 << 6;
        const NO_TERMINFO = 1 << 7;
        const NO_XTERM = 1 << 8;
        const SPACE = 1 << 9;
    }
}
