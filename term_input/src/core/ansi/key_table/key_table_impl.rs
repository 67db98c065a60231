// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{BuiltinTerminfo, TerminfoKeySource, key_table_builder};
use crate::{DriverConfig, DriverFlags, KeyEvent};
use rustc_hash::FxHashMap;

/// Immutable map from a complete literal byte sequence to its [`KeyEvent`].
///
/// Built once per [`InputDecoder`]. Lookup is exact match only, so the decoder must
/// find the sequence boundary first.
///
/// [`InputDecoder`]: crate::InputDecoder
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyTable {
    entries: FxHashMap<Vec<u8>, KeyEvent>,
}

impl KeyTable {
    /// Builds the table using the [`BuiltinTerminfo`] supplements.
    #[must_use]
    pub fn from_config(config: &DriverConfig) -> Self {
        Self::build(config.flags, config.term.as_deref(), &BuiltinTerminfo)
    }

    /// Runs every construction step. See the [module docs](super) for the order.
    #[must_use]
    pub fn build(
        flags: DriverFlags,
        term: Option<&str>,
        terminfo: &dyn TerminfoKeySource,
    ) -> Self {
        let mut table = Self::default();
        key_table_builder::register_c0_controls(&mut table, flags);
        key_table_builder::register_fixed_sequences(&mut table, flags);
        key_table_builder::register_numbered_keys(&mut table, flags);
        if !flags.contains(DriverFlags::NO_XTERM) {
            key_table_builder::register_xterm_modifier_keys(&mut table, flags);
        }
        key_table_builder::register_urxvt_keys(&mut table, flags);
        key_table_builder::register_alt_prefixed_keys(&mut table);
        if let Some(term) = term
            && !flags.contains(DriverFlags::NO_TERMINFO)
        {
            key_table_builder::register_terminfo_keys(&mut table, term, terminfo);
        }
        table
    }

    #[must_use]
    pub fn get(&self, seq: &[u8]) -> Option<&KeyEvent> { self.entries.get(seq) }

    #[must_use]
    pub fn contains(&self, seq: &[u8]) -> bool { self.entries.contains_key(seq) }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &KeyEvent)> {
        self.entries.iter().map(|(seq, key)| (seq.as_slice(), key))
    }

    /// Adds an entry unless `seq` is already mapped. Returns whether it was added.
    pub(super) fn insert_if_absent(&mut self, seq: impl Into<Vec<u8>>, key: KeyEvent) -> bool {
        match self.entries.entry(seq.into()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(key);
                true
            }
        }
    }

    /// Copies every entry out, so the table can be extended from the copy.
    pub(super) fn snapshot(&self) -> Vec<(Vec<u8>, KeyEvent)> {
        self.entries
            .iter()
            .map(|(seq, key)| (seq.clone(), key.clone()))
            .collect()
    }
}
