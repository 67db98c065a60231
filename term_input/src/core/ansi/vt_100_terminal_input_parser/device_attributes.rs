// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::CsiParams;
use crate::InputEvent;

/// Primary device attributes reply: `CSI ? 62 ; 22 c`. Omitted parameters are
/// skipped.
#[must_use]
pub fn decode_primary_device_attributes(params: &CsiParams) -> InputEvent {
    InputEvent::PrimaryDeviceAttributes(
        (0..params.len())
            .filter_map(|idx| params.value(idx))
            .collect(),
    )
}
