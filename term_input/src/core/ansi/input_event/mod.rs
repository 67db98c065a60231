// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Canonical input event types. Both the POSIX byte decoder and the Windows console
//! record translator produce exactly these.

// Attach sources.
pub mod color;
pub mod input_event;
pub mod key_event;
pub mod mouse_event;

// Re-export.
pub use color::*;
pub use input_event::*;
pub use key_event::*;
pub use mouse_event::*;
