// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Platform readers and the cancellable read loop that drives them.

// Attach sources.
pub mod byte_stream_reader;
pub mod cancel_token;
pub mod console_records;
pub mod input_tracer;
pub mod platform_reader;
pub mod read_loop;
pub mod reader_thread;
pub mod reader_types;

#[cfg(unix)]
pub mod mio_stdin_reader;
#[cfg(windows)]
pub mod windows_console_reader;

#[cfg(test)]
pub mod test_fixtures;

// Re-export.
pub use byte_stream_reader::*;
pub use cancel_token::*;
pub use console_records::*;
pub use input_tracer::*;
pub use platform_reader::*;
pub use read_loop::*;
pub use reader_thread::*;
pub use reader_types::*;

#[cfg(unix)]
pub use mio_stdin_reader::*;
#[cfg(windows)]
pub use windows_console_reader::*;
