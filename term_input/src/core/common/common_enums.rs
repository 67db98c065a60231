// Copyright (c) 2023-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Control flow signal for loops and threads.
///
/// Used by the [`ReaderThread`] body to decide whether to wait for the next read demand
/// or exit after delivering a terminal outcome ([`ReadError::Eof`],
/// [`ReadError::Canceled`], or an I/O failure).
///
/// [`ReadError::Canceled`]: crate::ReadError::Canceled
/// [`ReadError::Eof`]: crate::ReadError::Eof
/// [`ReaderThread`]: crate::ReaderThread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Continuation {
    /// Continue to the next iteration.
    #[default]
    Continue,

    /// Stop processing and exit the loop/thread.
    Stop,
}
