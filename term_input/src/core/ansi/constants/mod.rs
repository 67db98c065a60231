// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod input_sequences;
pub mod request_sequences;

// Re-export.
pub use input_sequences::*;
pub use request_sequences::*;
