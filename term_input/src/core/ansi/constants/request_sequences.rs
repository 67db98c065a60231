// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Query sequences an app writes to the terminal to get the replies this crate
//! decodes. Kitty keyboard flag requests live in [`KittyFlags`] since they need a
//! value.
//!
//! [`KittyFlags`]: crate::KittyFlags

use const_format::concatcp;

/// `ESC [`
pub const CSI: &str = "\x1b[";

/// `ESC ]`
pub const OSC: &str = "\x1b]";

/// `ESC \`
pub const ST: &str = "\x1b\\";

/// Primary device attributes query. Reply: [`InputEvent::PrimaryDeviceAttributes`].
///
/// [`InputEvent::PrimaryDeviceAttributes`]: crate::InputEvent::PrimaryDeviceAttributes
pub const REQUEST_PRIMARY_DEVICE_ATTRIBUTES: &str = concatcp!(CSI, "c");

/// Foreground color query. Reply: [`InputEvent::Color`] with
/// [`ColorRole::Foreground`].
///
/// [`ColorRole::Foreground`]: crate::ColorRole::Foreground
/// [`InputEvent::Color`]: crate::InputEvent::Color
pub const REQUEST_FOREGROUND_COLOR: &str = concatcp!(OSC, "10;?", ST);

/// Background color query.
pub const REQUEST_BACKGROUND_COLOR: &str = concatcp!(OSC, "11;?", ST);

/// Cursor color query.
pub const REQUEST_CURSOR_COLOR: &str = concatcp!(OSC, "12;?", ST);

/// Kitty keyboard flags query. Reply: [`InputEvent::KittyKeyboardFlags`].
///
/// [`InputEvent::KittyKeyboardFlags`]: crate::InputEvent::KittyKeyboardFlags
pub const REQUEST_KITTY_KEYBOARD_FLAGS: &str = concatcp!(CSI, "?u");

#[cfg(test)]
mod tests_request_sequences {
    use super::*;

    #[test]
    fn test_request_strings() {
        assert_eq!(REQUEST_PRIMARY_DEVICE_ATTRIBUTES, "\x1b[c");
        assert_eq!(REQUEST_BACKGROUND_COLOR, "\x1b]11;?\x1b\\");
        assert_eq!(REQUEST_KITTY_KEYBOARD_FLAGS, "\x1b[?u");
    }
}
