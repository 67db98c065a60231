// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod constants;
pub mod input_event;
pub mod key_table;
pub mod vt_100_terminal_input_parser;

// Re-export.
pub use constants::*;
pub use input_event::*;
pub use key_table::*;
pub use vt_100_terminal_input_parser::*;
