// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! VT100 compatible terminal input decoding.
//!
//! Bytes flow through three stages:
//!
//! ```text
//! raw bytes ─► find_sequence_boundary() ─► classify_sequence() ─► InputEvent
//!                 │                            │
//!                 │                            ├─ KeyTable lookup
//!                 │                            └─ CSI / OSC decoders
//!                 └─ paste markers ─► PasteAccumulator ─► InputEvent::Paste
//! ```
//!
//! [`InputDecoder`] drives all of them and keeps state between reads.

// Attach sources.
pub mod csi_params;
pub mod device_attributes;
pub mod input_decoder;
pub mod kitty;
pub mod mouse;
pub mod osc_color;
pub mod paste_accumulator;
pub mod sequence_boundary;
pub mod sequence_classifier;
pub mod utf8;
pub mod xterm_modify_other_keys;

// Re-export.
pub use csi_params::*;
pub use device_attributes::*;
pub use input_decoder::*;
pub use kitty::*;
pub use mouse::*;
pub use osc_color::*;
pub use paste_accumulator::*;
pub use sequence_boundary::*;
pub use sequence_classifier::*;
pub use utf8::*;
pub use xterm_modify_other_keys::*;
