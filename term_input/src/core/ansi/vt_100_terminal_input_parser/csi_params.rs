// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ANSI_CSI_BRACKET, ANSI_ESC, ANSI_PARAM_SEPARATOR, ANSI_SUB_PARAM_SEPARATOR,
            CSI_FINAL_BYTE_RANGE, CSI_INTERMEDIATE_BYTE_RANGE};
use smallvec::SmallVec;

/// One `;` separated parameter: its value followed by any `:` separated sub
/// parameters. Empty when the parameter was omitted (eg: the first one in `CSI ;5A`).
pub type CsiParam = SmallVec<[u32; 3]>;

/// Parsed form of a complete `CSI` sequence.
///
/// ```text
/// ESC [  ?   1 ; 5 : 3   $   A
///        │   └───┬───┘   │   └─ final_byte
///        │     params    └───── intermediates
///        └──────────────────── private_marker (one of < = > ?)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsiParams {
    pub private_marker: Option<u8>,
    pub params: SmallVec<[CsiParam; 4]>,
    pub intermediates: SmallVec<[u8; 2]>,
    pub final_byte: u8,
}

impl CsiParams {
    /// Parses `seq`, which must be a whole `ESC [ ... final` sequence. Returns
    /// [`None`] for anything that doesn't follow the `CSI` grammar.
    #[must_use]
    pub fn parse(seq: &[u8]) -> Option<Self> {
        let [ANSI_ESC, ANSI_CSI_BRACKET, body @ .., final_byte] = seq else {
            return None;
        };
        if !CSI_FINAL_BYTE_RANGE.contains(final_byte) {
            return None;
        }

        let mut it = Self {
            final_byte: *final_byte,
            ..Self::default()
        };

        let mut body = body;
        if let [marker @ b'<'..=b'?', rest @ ..] = body {
            it.private_marker = Some(*marker);
            body = rest;
        }

        let param_len = body
            .iter()
            .position(|byte| CSI_INTERMEDIATE_BYTE_RANGE.contains(byte))
            .unwrap_or(body.len());
        let (param_bytes, intermediate_bytes) = body.split_at(param_len);

        if !intermediate_bytes
            .iter()
            .all(|byte| CSI_INTERMEDIATE_BYTE_RANGE.contains(byte))
        {
            return None;
        }
        it.intermediates.extend_from_slice(intermediate_bytes);

        if param_bytes.is_empty() {
            return Some(it);
        }

        let mut current = CsiParam::new();
        let mut number: Option<u32> = None;
        for &byte in param_bytes {
            match byte {
                b'0'..=b'9' => {
                    let digit = u32::from(byte - b'0');
                    number = Some(
                        number
                            .unwrap_or(0)
                            .saturating_mul(10)
                            .saturating_add(digit),
                    );
                }
                ANSI_SUB_PARAM_SEPARATOR => {
                    current.push(number.take().unwrap_or(0));
                }
                ANSI_PARAM_SEPARATOR => {
                    if let Some(value) = number.take() {
                        current.push(value);
                    }
                    it.params.push(std::mem::take(&mut current));
                }
                _ => return None,
            }
        }
        if let Some(value) = number {
            current.push(value);
        }
        it.params.push(current);

        Some(it)
    }

    #[must_use]
    pub fn len(&self) -> usize { self.params.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.params.is_empty() }

    /// Main value of the parameter at `index`. [`None`] if missing or omitted.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<u32> {
        self.params.get(index).and_then(|param| param.first().copied())
    }

    /// Sub parameter `sub_index` of the parameter at `index` (`0` is the main value).
    #[must_use]
    pub fn sub_value(&self, index: usize, sub_index: usize) -> Option<u32> {
        self.params
            .get(index)
            .and_then(|param| param.get(sub_index).copied())
    }

    /// All values (main and sub) of the parameter at `index`.
    #[must_use]
    pub fn param(&self, index: usize) -> &[u32] {
        self.params.get(index).map_or(&[], |param| param.as_slice())
    }

    #[must_use]
    pub fn has_sub_params(&self) -> bool { self.params.iter().any(|param| param.len() > 1) }
}
