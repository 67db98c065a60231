// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words EINTR epoll kqueue eventfd

//! POSIX terminal reader built on [`mio`].
//!
//! ```text
//! ┌─────────────── mio::Poll ───────────────┐
//! │ Token(0): input fd (READABLE)           │──► read(2) ──► InputDecoder
//! │ Token(1): mio::Waker                    │──► ReadError::Canceled
//! └─────────────────────────────────────────┘
//! ```
//!
//! mio registrations are edge triggered, so after every read a zero timeout
//! [`poll(2)`] tells whether more bytes are already waiting. The input fd itself stays
//! in blocking mode (it is usually shared with the rest of the process).
//!
//! [`poll(2)`]: rustix::event::poll

use super::{RawEventReader, READ_BUFFER_SIZE, ReadCanceler, ReadError, ReaderSetupError};
use crate::{DriverConfig, InputDecoder, InputEvent};
use mio::{Events, Interest, Poll, Token, Waker, unix::SourceFd};
use rustix::{event::{PollFd, PollFlags, Timespec},
             io::Errno};
use std::{io::ErrorKind,
          os::fd::{AsFd as _, AsRawFd as _, OwnedFd},
          sync::{Arc,
                 atomic::{AtomicBool, Ordering}}};

/// Set to `true` to log reads and wake ups of [`MioStdinReader`].
pub const DEBUG_TERM_INPUT_SHOW_MIO_READER: bool = false;

const INPUT_TOKEN: Token = Token(0);
const WAKER_TOKEN: Token = Token(1);

/// Capacity for the [`mio::Events`] buffer.
const EVENTS_CAPACITY: usize = 8;

/// Newtype wrapping [`mio::Waker`]. Waking triggers an event on the paired
/// [`mio::Poll`], causing its blocking [`poll()`] call to return.
///
/// [`poll()`]: mio::Poll::poll
#[derive(Debug)]
pub struct MioPollWaker(pub Waker);

/// [`ReadCanceler`] for [`MioStdinReader`]. Sets a sticky flag, then wakes the poll.
#[derive(Debug)]
pub struct MioReadCanceler {
    waker: MioPollWaker,
    is_canceled: AtomicBool,
}

impl ReadCanceler for MioReadCanceler {
    fn cancel(&self) {
        self.is_canceled.store(true, Ordering::Release);
        // If the poll has already been dropped (thread exited), the wake is a no-op.
        let _unused = self.waker.0.wake();
    }

    fn is_canceled(&self) -> bool { self.is_canceled.load(Ordering::Acquire) }
}

/// Reads and decodes terminal input from a pollable fd (a tty or a pipe).
#[allow(missing_debug_implementations)]
pub struct MioStdinReader {
    poll_handle: Poll,
    ready_events_buffer: Events,
    input_fd: OwnedFd,
    input_buffer: [u8; READ_BUFFER_SIZE],
    decoder: InputDecoder,
    canceler: Arc<MioReadCanceler>,
    /// Bytes were still waiting after the last read, so skip the next poll.
    is_input_pending: bool,
    reached_eof: bool,
}

impl MioStdinReader {
    /// Creates the poll, the waker, and registers `input_fd` for reading.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderSetupError`] if any OS resource creation or registration fails.
    pub fn new(input_fd: OwnedFd, decoder: InputDecoder) -> Result<Self, ReaderSetupError> {
        let poll_handle = Poll::new().map_err(ReaderSetupError::PollCreation)?;

        // The waker must be created from the same registry as the input source.
        let waker = Waker::new(poll_handle.registry(), WAKER_TOKEN)
            .map_err(ReaderSetupError::WakerCreation)?;

        poll_handle
            .registry()
            .register(
                &mut SourceFd(&input_fd.as_raw_fd()),
                INPUT_TOKEN,
                Interest::READABLE,
            )
            .map_err(ReaderSetupError::InputRegistration)?;

        Ok(Self {
            poll_handle,
            ready_events_buffer: Events::with_capacity(EVENTS_CAPACITY),
            input_fd,
            input_buffer: [0; READ_BUFFER_SIZE],
            decoder,
            canceler: Arc::new(MioReadCanceler {
                waker: MioPollWaker(waker),
                is_canceled: AtomicBool::new(false),
            }),
            is_input_pending: false,
            reached_eof: false,
        })
    }

    /// Reads from a duplicate of the process' stdin.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderSetupError`] if stdin can't be duplicated or polled.
    pub fn from_stdin(config: &DriverConfig) -> Result<Self, ReaderSetupError> {
        let input_fd = std::io::stdin()
            .as_fd()
            .try_clone_to_owned()
            .map_err(ReaderSetupError::InputHandle)?;
        Self::new(input_fd, InputDecoder::from_config(config))
    }

    /// Blocks until the input fd is readable. Returns `false` on a spurious wake up.
    fn wait_until_readable(&mut self) -> Result<bool, ReadError> {
        if let Err(err) = self.poll_handle.poll(&mut self.ready_events_buffer, None) {
            // EINTR - retry.
            if err.kind() == ErrorKind::Interrupted {
                return Ok(false);
            }
            return Err(ReadError::Io(err));
        }

        let mut is_readable = false;
        for event in &self.ready_events_buffer {
            match event.token() {
                INPUT_TOKEN => is_readable = true,
                WAKER_TOKEN => {
                    DEBUG_TERM_INPUT_SHOW_MIO_READER.then(|| {
                        tracing::debug!(message = "MioStdinReader: woken by canceler");
                    });
                }
                _ => {}
            }
        }

        if self.canceler.is_canceled() {
            return Err(ReadError::Canceled);
        }
        Ok(is_readable)
    }

    fn read_input(&mut self) -> Result<(), ReadError> {
        match rustix::io::read(&self.input_fd, &mut self.input_buffer[..]) {
            Ok(0) => {
                DEBUG_TERM_INPUT_SHOW_MIO_READER.then(|| {
                    tracing::debug!(message = "MioStdinReader: EOF (0 bytes)");
                });
                self.decoder.flush();
                self.reached_eof = true;
                self.is_input_pending = false;
            }
            Ok(n) => {
                DEBUG_TERM_INPUT_SHOW_MIO_READER.then(|| {
                    tracing::debug!(message = "MioStdinReader: read bytes", bytes_read = n);
                });
                self.is_input_pending = has_pending_input(&self.input_fd);
                let more = n == READ_BUFFER_SIZE || self.is_input_pending;
                self.decoder.advance(&self.input_buffer[..n], more);
            }
            Err(Errno::INTR) => {}
            Err(Errno::AGAIN) => self.is_input_pending = false,
            Err(errno) => return Err(ReadError::Io(errno.into())),
        }
        Ok(())
    }
}

/// Zero timeout readiness check for `fd`.
fn has_pending_input(fd: &OwnedFd) -> bool {
    let mut poll_fds = [PollFd::new(fd, PollFlags::IN)];
    let no_wait = Timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    matches!(rustix::event::poll(&mut poll_fds, Some(&no_wait)), Ok(n) if n > 0)
}

impl RawEventReader for MioStdinReader {
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

            if !self.is_input_pending && !self.wait_until_readable()? {
                continue;
            }
            self.read_input()?;
        }
    }

    fn canceler(&self) -> Arc<dyn ReadCanceler> { self.canceler.clone() }
}
