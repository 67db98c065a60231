// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The cancellable async read loop.
//!
//! ```text
//! loop {
//!     request one read ───► reader thread
//!     select! (biased) { cancel ─► Canceled, batch ─► events }
//!     for event in batch {
//!         select! (biased) { cancel ─► Canceled, send(event) }
//!     }
//! }
//! ```
//!
//! Every await races the [`CancelToken`], so a consumer that stops draining the event
//! channel can't keep the loop alive past cancellation.

use super::{CancelToken, InputTracer, RawEventReader, ReadError, ReaderSetupError,
            ReaderThread, open_platform_reader, wait_for_exit_signal};
use crate::{DriverConfig, InputEvent};
use miette::Diagnostic;
use std::{sync::Arc, time::Duration};
use tokio::{sync::{mpsc, oneshot},
            task::{JoinError, JoinHandle}};

pub const DEBUG_TERM_INPUT_SHOW_READ_LOOP: bool = false;

/// How long [`ReadLoopHandle::shutdown()`] waits for the reader thread to exit.
pub const DEFAULT_CANCEL_GRACE_PERIOD: Duration = Duration::from_millis(500);

/// How the read loop ended, when it didn't fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadLoopExit {
    /// The input source is exhausted and every event was delivered.
    EndOfInput,
    /// The [`CancelToken`] fired, or the event receiver was dropped.
    Canceled,
}

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ReadLoopError {
    #[error("Reading terminal input failed")]
    #[diagnostic(
        code(r3bl_term_input::read_loop::read),
        help("The read loop does not retry; restart it once the input source recovers")
    )]
    Read(#[source] std::io::Error),

    #[error("The reader thread exited without answering a read request")]
    #[diagnostic(
        code(r3bl_term_input::read_loop::reader_thread_gone),
        help("The reader thread panicked; check the log for the panic message")
    )]
    ReaderThreadGone,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Setup(#[from] ReaderSetupError),

    #[error("The read loop task failed to join")]
    #[diagnostic(code(r3bl_term_input::read_loop::task_join))]
    TaskJoin(#[source] JoinError),
}

#[derive(Debug, Clone)]
pub struct ReadLoopOptions {
    /// Upper bound on waiting for the reader thread after cancellation.
    pub grace_period: Duration,
    pub tracer: Option<Arc<dyn InputTracer>>,
}

impl Default for ReadLoopOptions {
    fn default() -> Self {
        Self {
            grace_period: DEFAULT_CANCEL_GRACE_PERIOD,
            tracer: None,
        }
    }
}

impl ReadLoopOptions {
    #[must_use]
    pub fn with_tracer(mut self, tracer: Arc<dyn InputTracer>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    #[must_use]
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }
}

/// Reads events from `reader` on a dedicated thread and forwards them, in order, to
/// `event_tx` until the input ends, `cancel` fires, or a read fails.
///
/// On cancellation the reader's canceler is called and this returns right away. The
/// reader thread may still be blocked in an OS read; use [`spawn_read_loop()`] and
/// [`ReadLoopHandle::cancel_and_wait()`] to wait (bounded) for it.
///
/// # Errors
///
/// - [`ReadLoopError::Setup`] if the reader thread can't be spawned.
/// - [`ReadLoopError::Read`] when the reader reports an I/O failure.
/// - [`ReadLoopError::ReaderThreadGone`] if the reader thread died.
pub async fn run_read_loop(
    reader: Box<dyn RawEventReader>,
    event_tx: mpsc::Sender<InputEvent>,
    cancel: CancelToken,
    options: ReadLoopOptions,
) -> Result<ReadLoopExit, ReadLoopError> {
    let reader_thread = ReaderThread::spawn(reader)?;
    drive_reader_thread(reader_thread, event_tx, cancel, options).await
}

async fn drive_reader_thread(
    mut reader_thread: ReaderThread,
    event_tx: mpsc::Sender<InputEvent>,
    cancel: CancelToken,
    options: ReadLoopOptions,
) -> Result<ReadLoopExit, ReadLoopError> {
    let tracer = options.tracer;
    if let Some(tracer) = &tracer {
        tracer.start();
    }

    let result =
        forward_batches(&mut reader_thread, &event_tx, &cancel, tracer.as_deref()).await;

    match &result {
        Ok(ReadLoopExit::Canceled) => reader_thread.cancel(),
        _ => reader_thread.shut_down(),
    }

    if let Some(tracer) = &tracer {
        tracer.stop();
    }

    DEBUG_TERM_INPUT_SHOW_READ_LOOP.then(|| {
        tracing::debug!(message = "read-loop: exit", result = ?result);
    });

    result
}

async fn forward_batches(
    reader_thread: &mut ReaderThread,
    event_tx: &mpsc::Sender<InputEvent>,
    cancel: &CancelToken,
    tracer: Option<&dyn InputTracer>,
) -> Result<ReadLoopExit, ReadLoopError> {
    loop {
        if cancel.is_cancelled() {
            return Ok(ReadLoopExit::Canceled);
        }

        if !reader_thread.request_read() {
            return Err(ReadLoopError::ReaderThreadGone);
        }

        let maybe_batch = tokio::select! {
            biased;
            () = cancel.cancelled() => return Ok(ReadLoopExit::Canceled),
            maybe_batch = reader_thread.next_batch() => maybe_batch,
        };

        let events = match maybe_batch {
            Some(Ok(events)) => events,
            Some(Err(ReadError::Eof)) => return Ok(ReadLoopExit::EndOfInput),
            Some(Err(ReadError::Canceled)) => return Ok(ReadLoopExit::Canceled),
            Some(Err(ReadError::Io(err))) => return Err(ReadLoopError::Read(err)),
            None => return Err(ReadLoopError::ReaderThreadGone),
        };

        DEBUG_TERM_INPUT_SHOW_READ_LOOP.then(|| {
            tracing::debug!(message = "read-loop: batch", count = events.len());
        });

        for event in events {
            // Only the tracer needs a copy, and only once the send went through.
            let traced_event = tracer.map(|_| event.clone());

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Ok(ReadLoopExit::Canceled),
                send_result = event_tx.send(event) => {
                    if send_result.is_err() {
                        tracing::debug!(
                            message = "read-loop: event receiver dropped, stopping"
                        );
                        return Ok(ReadLoopExit::Canceled);
                    }
                }
            }

            if let (Some(tracer), Some(event)) = (tracer, &traced_event) {
                tracer.on_event(event);
            }
        }
    }
}

/// A read loop running on its own tokio task.
#[derive(Debug)]
pub struct ReadLoopHandle {
    cancel: CancelToken,
    task: JoinHandle<Result<ReadLoopExit, ReadLoopError>>,
    thread_exit: Option<oneshot::Receiver<()>>,
    grace_period: Duration,
}

/// Spawns [`run_read_loop()`] on the current tokio runtime.
///
/// # Errors
///
/// Returns [`ReaderSetupError::ThreadSpawn`] if the reader thread can't be spawned.
pub fn spawn_read_loop(
    reader: Box<dyn RawEventReader>,
    event_tx: mpsc::Sender<InputEvent>,
    cancel: CancelToken,
    options: ReadLoopOptions,
) -> Result<ReadLoopHandle, ReaderSetupError> {
    let mut reader_thread = ReaderThread::spawn(reader)?;
    let thread_exit = reader_thread.take_exit_signal();
    let grace_period = options.grace_period;
    let task = tokio::spawn(drive_reader_thread(
        reader_thread,
        event_tx,
        cancel.clone(),
        options,
    ));

    Ok(ReadLoopHandle {
        cancel,
        task,
        thread_exit,
        grace_period,
    })
}

/// Opens the platform reader (see [`open_platform_reader()`]) and spawns a read loop
/// over it.
///
/// # Errors
///
/// Returns [`ReaderSetupError`] if the reader or its thread can't be created.
pub fn spawn_platform_read_loop(
    config: &DriverConfig,
    event_tx: mpsc::Sender<InputEvent>,
    cancel: CancelToken,
    options: ReadLoopOptions,
) -> Result<ReadLoopHandle, ReaderSetupError> {
    let reader = open_platform_reader(config)?;
    spawn_read_loop(reader, event_tx, cancel, options)
}

impl ReadLoopHandle {
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken { self.cancel.clone() }

    #[must_use]
    pub fn is_finished(&self) -> bool { self.task.is_finished() }

    /// Cancels the loop, waits for it to return, then waits up to `grace` for the
    /// reader thread. A reader thread stuck in an OS read is logged and left behind.
    ///
    /// # Errors
    ///
    /// Whatever the loop returned, or [`ReadLoopError::TaskJoin`] if its task panicked.
    pub async fn cancel_and_wait(
        mut self,
        grace: Duration,
    ) -> Result<ReadLoopExit, ReadLoopError> {
        self.cancel.cancel();
        let result = (&mut self.task).await.map_err(ReadLoopError::TaskJoin)?;

        if let Some(thread_exit) = self.thread_exit.take()
            && !wait_for_exit_signal(thread_exit, grace).await
        {
            tracing::warn!(
                message = "read-loop: reader thread did not exit within grace period",
                grace = ?grace
            );
        }

        result
    }

    /// [`cancel_and_wait()`] with the grace period from [`ReadLoopOptions`].
    ///
    /// # Errors
    ///
    /// See [`cancel_and_wait()`].
    ///
    /// [`cancel_and_wait()`]: Self::cancel_and_wait
    pub async fn shutdown(self) -> Result<ReadLoopExit, ReadLoopError> {
        let grace = self.grace_period;
        self.cancel_and_wait(grace).await
    }

    /// Waits for the loop to end on its own (end of input or a failure).
    ///
    /// # Errors
    ///
    /// Whatever the loop returned, or [`ReadLoopError::TaskJoin`] if its task panicked.
    pub async fn join(self) -> Result<ReadLoopExit, ReadLoopError> {
        self.task.await.map_err(ReadLoopError::TaskJoin)?
    }
}
