// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{FlagCanceler, READ_BUFFER_SIZE, RawEventReader, ReadCanceler, ReadError};
use crate::{DriverConfig, InputDecoder, InputEvent};
use std::{io::{ErrorKind, Read},
          sync::Arc};

/// Decodes terminal input from any [`Read`] source (a file, a socket, a test
/// fixture, or a terminal that is already non blocking).
///
/// Cancellation is only checked between reads, so a read that blocks forever can't be
/// interrupted. Use [`MioStdinReader`] for a real terminal on POSIX.
///
/// [`MioStdinReader`]: crate::MioStdinReader
#[derive(Debug)]
pub struct ByteStreamReader<R> {
    source: R,
    decoder: InputDecoder,
    buffer: Vec<u8>,
    canceler: Arc<FlagCanceler>,
    reached_eof: bool,
}

impl<R: Read + Send> ByteStreamReader<R> {
    #[must_use]
    pub fn new(source: R, decoder: InputDecoder) -> Self {
        Self {
            source,
            decoder,
            buffer: vec![0; READ_BUFFER_SIZE],
            canceler: Arc::new(FlagCanceler::default()),
            reached_eof: false,
        }
    }

    #[must_use]
    pub fn from_config(source: R, config: &DriverConfig) -> Self {
        Self::new(source, InputDecoder::from_config(config))
    }
}

impl<R: Read + Send> RawEventReader for ByteStreamReader<R> {
    fn read_events(&mut self, out: &mut Vec<InputEvent>) -> Result<(), ReadError> {
        loop {
            if self.canceler.is_canceled() {
                return Err(ReadError::Canceled);
            }

            let count_before = out.len();
            out.extend(self.decoder.by_ref());
            if out.len() > count_before {
                return Ok(());
            }

            if self.reached_eof {
                return Err(ReadError::Eof);
            }

            match self.source.read(&mut self.buffer) {
                Ok(0) => {
                    self.decoder.flush();
                    self.reached_eof = true;
                }
                Ok(n) => {
                    let more = n == self.buffer.len();
                    self.decoder.advance(&self.buffer[..n], more);
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(ReadError::Io(err)),
            }
        }
    }

    fn canceler(&self) -> Arc<dyn ReadCanceler> { self.canceler.clone() }
}
