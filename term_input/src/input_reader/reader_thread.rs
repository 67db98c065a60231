// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words demux

//! Dedicated OS thread that performs blocking reads on demand.
//!
//! ```text
//! async read loop                    "term-input-reader" thread
//! ───────────────                    ──────────────────────────
//! request_read() ──── demand ──────► read_events() (blocks)
//! next_batch().await ◄─── batch ──── Ok(events) / Err(ReadError)
//! ```
//!
//! Exactly one read is in flight per demand, so a batch is fully delivered before the
//! next read starts. The thread exits when the demand sender is dropped, when the
//! batch receiver is dropped, or after it delivers a terminal [`ReadError`].

use super::{RawEventReader, ReadCanceler, ReadError, ReaderSetupError};
use crate::{Continuation, InputEvent};
use std::{sync::{Arc, mpsc as std_mpsc},
          time::Duration};
use tokio::sync::{mpsc, oneshot};

/// Name given to the reader thread, visible in debuggers and `top -H`.
pub const READER_THREAD_NAME: &str = "term-input-reader";

pub const DEBUG_TERM_INPUT_SHOW_READER_THREAD: bool = false;

/// One answer to one read demand.
pub type ReadBatch = Result<Vec<InputEvent>, ReadError>;

/// Async side handle for the reader thread.
#[derive(Debug)]
pub struct ReaderThread {
    /// Dropping this makes the thread exit after its current read.
    demand_tx: Option<std_mpsc::Sender<()>>,
    batch_rx: mpsc::UnboundedReceiver<ReadBatch>,
    canceler: Arc<dyn ReadCanceler>,
    /// Fires (by being dropped on the other end) when the thread exits.
    exit_rx: Option<oneshot::Receiver<()>>,
}

impl ReaderThread {
    /// Moves `reader` onto a new thread. The thread idles until [`request_read()`].
    ///
    /// # Errors
    ///
    /// Returns [`ReaderSetupError::ThreadSpawn`] if the OS refuses to create a thread.
    ///
    /// [`request_read()`]: Self::request_read
    pub fn spawn(reader: Box<dyn RawEventReader>) -> Result<Self, ReaderSetupError> {
        let canceler = reader.canceler();
        let (demand_tx, demand_rx) = std_mpsc::channel::<()>();
        let (batch_tx, batch_rx) = mpsc::unbounded_channel::<ReadBatch>();
        let (exit_tx, exit_rx) = oneshot::channel::<()>();

        std::thread::Builder::new()
            .name(READER_THREAD_NAME.into())
            .spawn(move || {
                reader_thread_body(reader, &demand_rx, &batch_tx);
                drop(exit_tx.send(()));
            })
            .map_err(ReaderSetupError::ThreadSpawn)?;

        DEBUG_TERM_INPUT_SHOW_READER_THREAD.then(|| {
            tracing::debug!(message = "reader-thread: spawned", name = READER_THREAD_NAME);
        });

        Ok(Self {
            demand_tx: Some(demand_tx),
            batch_rx,
            canceler,
            exit_rx: Some(exit_rx),
        })
    }

    /// Asks the thread for one more batch. Returns `false` if the thread is gone.
    pub fn request_read(&self) -> bool {
        self.demand_tx
            .as_ref()
            .is_some_and(|demand_tx| demand_tx.send(()).is_ok())
    }

    /// Waits for the answer to the last [`request_read()`]. Returns `None` if the
    /// thread exited without answering.
    ///
    /// Cancel safe: a batch that arrives after this future is dropped stays queued.
    ///
    /// [`request_read()`]: Self::request_read
    pub async fn next_batch(&mut self) -> Option<ReadBatch> { self.batch_rx.recv().await }

    /// Unblocks an in flight read (best effort) and stops further reads.
    pub fn cancel(&mut self) {
        self.canceler.cancel();
        self.shut_down();
    }

    /// Stops issuing demands. The thread exits once its current read (if any) returns.
    pub fn shut_down(&mut self) { self.demand_tx.take(); }

    #[must_use]
    pub fn canceler(&self) -> Arc<dyn ReadCanceler> { self.canceler.clone() }

    /// Hands out the exit signal so it can be awaited after `self` is consumed. Only
    /// the first call returns `Some`.
    pub fn take_exit_signal(&mut self) -> Option<oneshot::Receiver<()>> {
        self.exit_rx.take()
    }

    /// Waits up to `grace` for the thread to exit. Returns `true` if it did.
    pub async fn wait_for_exit(&mut self, grace: Duration) -> bool {
        match self.take_exit_signal() {
            Some(exit_rx) => wait_for_exit_signal(exit_rx, grace).await,
            None => false,
        }
    }
}

/// Waits up to `grace` for a signal from [`ReaderThread::take_exit_signal()`].
/// Returns `true` if the thread exited in time.
pub async fn wait_for_exit_signal(exit_rx: oneshot::Receiver<()>, grace: Duration) -> bool {
    // Either a send or a drop of the sender means the thread body is done.
    tokio::time::timeout(grace, exit_rx).await.is_ok()
}

fn reader_thread_body(
    mut reader: Box<dyn RawEventReader>,
    demand_rx: &std_mpsc::Receiver<()>,
    batch_tx: &mpsc::UnboundedSender<ReadBatch>,
) {
    while demand_rx.recv().is_ok() {
        if serve_one_demand(reader.as_mut(), batch_tx) == Continuation::Stop {
            break;
        }
    }

    DEBUG_TERM_INPUT_SHOW_READER_THREAD.then(|| {
        tracing::debug!(message = "reader-thread: exiting");
    });
}

fn serve_one_demand(
    reader: &mut dyn RawEventReader,
    batch_tx: &mpsc::UnboundedSender<ReadBatch>,
) -> Continuation {
    let mut events = Vec::new();
    let batch = reader.read_events(&mut events).map(|()| events);

    DEBUG_TERM_INPUT_SHOW_READER_THREAD.then(|| match &batch {
        Ok(events) => {
            tracing::debug!(message = "reader-thread: batch", count = events.len());
        }
        Err(err) => {
            tracing::debug!(message = "reader-thread: read ended", error = ?err);
        }
    });

    let continuation = if batch.is_ok() {
        Continuation::Continue
    } else {
        Continuation::Stop
    };

    match batch_tx.send(batch) {
        Ok(()) => continuation,
        // Nobody is listening any more.
        Err(_) => Continuation::Stop,
    }
}
