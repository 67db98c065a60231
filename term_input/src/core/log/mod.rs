// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Opt-in [`tracing`] setup for apps that embed this crate.
//!
//! The decoder and read loop only ever emit [`tracing`] events; they never install a
//! subscriber. Call [`try_initialize_logging_global()`] once at startup if you want
//! those events to go somewhere.

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use rolling_file_appender_impl::*;
pub use tracing_config::*;
pub use tracing_init::*;
