// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod config_error;
pub mod driver_config;
pub mod driver_flags;

// Re-export.
pub use config_error::*;
pub use driver_config::*;
pub use driver_flags::*;
