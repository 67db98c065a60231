// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The contract every platform reader implements, and its errors.

use crate::InputEvent;
use miette::Diagnostic;
use std::{fmt::Debug,
          sync::{Arc,
                 atomic::{AtomicBool, Ordering}}};

/// Read buffer size for byte oriented readers (`1_024` bytes).
///
/// When a read fills the whole buffer, more data is likely waiting in the kernel
/// buffer. That is the `more` flag used to tell a lone `ESC` from the start of a
/// sequence.
pub const READ_BUFFER_SIZE: usize = 1_024;

/// Source of decoded input events on one platform.
///
/// Implementations block in [`read_events()`] and are driven from a dedicated thread
/// (see [`ReaderThread`]), never from an async task.
///
/// [`ReaderThread`]: crate::ReaderThread
/// [`read_events()`]: Self::read_events
pub trait RawEventReader: Send {
    /// Blocks until at least one event has been decoded, then appends every event
    /// available without blocking again to `out`.
    ///
    /// # Errors
    ///
    /// - [`ReadError::Eof`] once the source is exhausted and nothing is left to decode.
    /// - [`ReadError::Canceled`] after the [`canceler()`] fired.
    /// - [`ReadError::Io`] when the OS read fails.
    ///
    /// [`canceler()`]: Self::canceler
    fn read_events(&mut self, out: &mut Vec<InputEvent>) -> Result<(), ReadError>;

    /// Handle that unblocks an in flight [`read_events()`] from another thread, on a
    /// best effort basis.
    ///
    /// [`read_events()`]: Self::read_events
    fn canceler(&self) -> Arc<dyn ReadCanceler>;
}

/// Unblocks a reader that is stuck in [`RawEventReader::read_events()`]. Once canceled,
/// every later read fails with [`ReadError::Canceled`].
pub trait ReadCanceler: Send + Sync + Debug {
    fn cancel(&self);

    fn is_canceled(&self) -> bool;
}

/// Canceler for readers that can only check a flag between reads.
#[derive(Debug, Default)]
pub struct FlagCanceler {
    is_canceled: AtomicBool,
}

impl ReadCanceler for FlagCanceler {
    fn cancel(&self) { self.is_canceled.store(true, Ordering::Release); }

    fn is_canceled(&self) -> bool { self.is_canceled.load(Ordering::Acquire) }
}

/// Why [`RawEventReader::read_events()`] returned without events.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ReadError {
    #[error("End of terminal input")]
    #[diagnostic(code(r3bl_term_input::read::eof))]
    Eof,

    #[error("Terminal input read was canceled")]
    #[diagnostic(code(r3bl_term_input::read::canceled))]
    Canceled,

    #[error("Failed to read terminal input")]
    #[diagnostic(
        code(r3bl_term_input::read::io),
        help("The input source returned an OS error; the read is not retried")
    )]
    Io(#[from] std::io::Error),
}

/// Failed to set up a platform reader or its thread.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ReaderSetupError {
    /// epoll / kqueue creation failed.
    #[error("Failed to create mio::Poll")]
    #[diagnostic(
        code(r3bl_term_input::setup::poll_creation),
        help("This usually means the system ran out of file descriptors")
    )]
    PollCreation(#[source] std::io::Error),

    /// eventfd / pipe creation failed.
    #[error("Failed to create mio::Waker")]
    #[diagnostic(
        code(r3bl_term_input::setup::waker_creation),
        help("This usually means the system ran out of file descriptors")
    )]
    WakerCreation(#[source] std::io::Error),

    #[error("Failed to register terminal input with mio")]
    #[diagnostic(
        code(r3bl_term_input::setup::input_registration),
        help("The input must be pollable (a tty or a pipe, not a regular file)")
    )]
    InputRegistration(#[source] std::io::Error),

    #[error("Failed to get the terminal input handle")]
    #[diagnostic(
        code(r3bl_term_input::setup::input_handle),
        help("Ensure stdin is attached to a terminal or console")
    )]
    InputHandle(#[source] std::io::Error),

    #[error("Failed to create the cancel event")]
    #[diagnostic(code(r3bl_term_input::setup::cancel_event))]
    CancelEventCreation(#[source] std::io::Error),

    #[error("Failed to spawn the reader thread")]
    #[diagnostic(code(r3bl_term_input::setup::thread_spawn))]
    ThreadSpawn(#[source] std::io::Error),
}

#[cfg(test)]
mod tests_reader_types {
    use super::*;

    #[test]
    fn test_flag_canceler_is_sticky() {
        let canceler = FlagCanceler::default();
        assert!(!canceler.is_canceled());
        canceler.cancel();
        canceler.cancel();
        assert!(canceler.is_canceled());
    }

    #[test]
    fn test_read_error_from_io() {
        let err: ReadError = std::io::Error::other("boom").into();
        assert!(matches!(err, ReadError::Io(_)));
        assert_eq!(err.to_string(), "Failed to read terminal input");
    }
}
