// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::InputEvent;
use std::{fmt::Debug,
          sync::atomic::{AtomicBool, AtomicU64, Ordering}};

/// Optional observer for the read loop. Decoding and delivery behave the same with or
/// without one.
///
/// Calls happen on the read loop task, in this order: [`start()`] once, then
/// [`on_event()`] for every event right after it was delivered, then [`stop()`] once
/// when the loop returns (for any reason). Events discarded on cancellation are never
/// passed to [`on_event()`].
///
/// [`on_event()`]: Self::on_event
/// [`start()`]: Self::start
/// [`stop()`]: Self::stop
pub trait InputTracer: Send + Sync + Debug {
    fn start(&self);

    fn on_event(&self, event: &InputEvent);

    fn stop(&self);
}

/// [`InputTracer`] that writes each event to the `tracing` subscriber at debug level.
/// Start and stop bracket the output with a summary.
#[derive(Debug, Default)]
pub struct TracingObserver {
    is_running: AtomicBool,
    event_count: AtomicU64,
}

impl TracingObserver {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn is_running(&self) -> bool { self.is_running.load(Ordering::Acquire) }

    /// Events seen since the last [`InputTracer::start()`].
    #[must_use]
    pub fn event_count(&self) -> u64 { self.event_count.load(Ordering::Acquire) }
}

impl InputTracer for TracingObserver {
    fn start(&self) {
        self.event_count.store(0, Ordering::Release);
        self.is_running.store(true, Ordering::Release);
        tracing::debug!(message = "input-tracer: start");
    }

    fn on_event(&self, event: &InputEvent) {
        if !self.is_running() {
            return;
        }
        let seq_no = self.event_count.fetch_add(1, Ordering::AcqRel);
        tracing::debug!(message = "input-tracer: event", seq_no, event = %event);
    }

    fn stop(&self) {
        self.is_running.store(false, Ordering::Release);
        tracing::debug!(
            message = "input-tracer: stop",
            event_count = self.event_count()
        );
    }
}

#[cfg(test)]
mod tests_input_tracer {
    use super::*;
    use crate::KeyEvent;

    #[test]
    fn test_counts_only_while_running() {
        let observer = TracingObserver::new();
        let event = InputEvent::Key(KeyEvent::from_char('x'));

        observer.on_event(&event);
        assert_eq!(observer.event_count(), 0);

        observer.start();
        observer.on_event(&event);
        observer.on_event(&event);
        assert!(observer.is_running());
        assert_eq!(observer.event_count(), 2);

        observer.stop();
        observer.on_event(&event);
        assert!(!observer.is_running());
        assert_eq!(observer.event_count(), 2);
    }
}
