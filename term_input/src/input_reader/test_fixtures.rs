// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Scripted [`RawEventReader`]s for reader thread and read loop tests.

use super::{FlagCanceler, RawEventReader, ReadCanceler, ReadError};
use crate::InputEvent;
use std::{collections::VecDeque, sync::Arc, time::Duration};

/// Blocks until canceled and never produces an event.
#[derive(Debug, Default)]
pub struct SilentReader {
    canceler: Arc<FlagCanceler>,
}

impl RawEventReader for SilentReader {
    fn read_events(&mut self, _out: &mut Vec<InputEvent>) -> Result<(), ReadError> {
        while !self.canceler.is_canceled() {
            std::thread::sleep(Duration::from_millis(5));
        }
        Err(ReadError::Canceled)
    }

    fn canceler(&self) -> Arc<dyn ReadCanceler> { self.canceler.clone() }
}

/// Ignores cancellation for `stuck_for`, like an OS read that can't be interrupted.
#[derive(Debug)]
pub struct StuckReader {
    stuck_for: Duration,
    canceler: Arc<FlagCanceler>,
}

impl StuckReader {
    pub fn new(stuck_for: Duration) -> Self {
        Self {
            stuck_for,
            canceler: Arc::default(),
        }
    }
}

impl RawEventReader for StuckReader {
    fn read_events(&mut self, _out: &mut Vec<InputEvent>) -> Result<(), ReadError> {
        std::thread::sleep(self.stuck_for);
        Err(ReadError::Canceled)
    }

    fn canceler(&self) -> Arc<dyn ReadCanceler> { self.canceler.clone() }
}

/// Hands out one scripted batch per read, then ends with `last`.
#[derive(Debug)]
pub struct ScriptedReader {
    batches: VecDeque<Vec<InputEvent>>,
    last: fn() -> ReadError,
    canceler: Arc<FlagCanceler>,
}

impl ScriptedReader {
    pub fn new(batches: Vec<Vec<InputEvent>>, last: fn() -> ReadError) -> Self {
        Self {
            batches: batches.into(),
            last,
            canceler: Arc::default(),
        }
    }
}

impl RawEventReader for ScriptedReader {
    fn read_events(&mut self, out: &mut Vec<InputEvent>) -> Result<(), ReadError> {
        if self.canceler.is_canceled() {
            return Err(ReadError::Canceled);
        }
        match self.batches.pop_front() {
            Some(batch) => {
                out.extend(batch);
                Ok(())
            }
            None => Err((self.last)()),
        }
    }

    fn canceler(&self) -> Arc<dyn ReadCanceler> { self.canceler.clone() }
}
