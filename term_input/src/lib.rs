// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words urxvt kitty coninput SGR

//! # r3bl_term_input
//!
//! Terminal input decoding layer for async TUI apps. Raw bytes from a terminal (POSIX)
//! or console input records (Windows) go in, an ordered stream of typed
//! [`InputEvent`]s comes out.
//!
//! ```text
//! ┌──────────────────────────┐       ┌──────────────────────────────────────┐
//! │ run_read_loop() (tokio)  │◄──────┤ "term-input-reader" std::thread      │
//! │  select! { cancel, recv }│ batch │  RawEventReader::read_events()       │
//! │  select! { cancel, send }│──────►│   ├─ MioStdinReader (POSIX)          │
//! └────────────┬─────────────┘demand │   │   └─ InputDecoder (bytes)        │
//!              │                     │   └─ WindowsConsoleReader (Windows)  │
//!              ▼                     │       └─ ConsoleRecordTranslator     │
//!    mpsc::Sender<InputEvent>        └──────────────────────────────────────┘
//! ```
//!
//! # POSIX path
//!
//! [`InputDecoder`] splits the byte stream into complete sequences, then classifies
//! each one, in this order:
//!
//! 1. Bracketed paste markers (`ESC [ 200 ~` and `ESC [ 201 ~`). Everything between
//!    them is collected into a single [`InputEvent::Paste`].
//! 2. Exact match in the [`KeyTable`] (VT100 / VT220 / xterm / urxvt / Alt prefixed /
//!    terminfo supplements).
//! 3. CSI decoders: xterm `modifyOtherKeys`, primary device attributes, kitty keyboard
//!    protocol, SGR / urxvt / X10 mouse, focus reports.
//! 4. OSC color query responses.
//! 5. Anything else becomes [`InputEvent::Unknown`] carrying the verbatim bytes.
//!
//! # Windows path
//!
//! Console input records bypass the byte decoder entirely. The
//! [`ConsoleRecordTranslator`] maps virtual key codes, characters, and mouse button
//! state deltas straight to the same [`InputEvent`] types.
//!
//! # Cancellation
//!
//! [`run_read_loop()`] honors its [`CancelToken`] while waiting for a read and while
//! waiting on a full event channel. OS level reads are unblocked on a best effort basis
//! (a [`mio::Waker`] on POSIX, a cancel event on Windows) and the loop never waits
//! longer than its grace period for the reader thread to exit.
//!
//! [`mio::Waker`]: https://docs.rs/mio/latest/mio/struct.Waker.html

// Production code must not call .unwrap() in functions that return Result. Test code is
// allowed to use .unwrap() (workspace `Cargo.toml` config allows it). The cfg_attr
// ensures this lint is only enforced when not compiling tests.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod core;
pub mod input_reader;

// Re-export.
pub use core::*;
pub use input_reader::*;
