// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;
use tokio::sync::watch;

/// Cloneable, one way cancellation signal for the read loop.
///
/// Cancelling is idempotent and visible to every clone, including ones that start
/// waiting in [`cancelled()`] after the fact.
///
/// [`cancelled()`]: Self::cancelled
#[derive(Debug, Clone)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
}

impl Default for CancelToken {
    fn default() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn cancel(&self) { self.sender.send_replace(true); }

    #[must_use]
    pub fn is_cancelled(&self) -> bool { *self.sender.borrow() }

    /// Resolves once [`cancel()`] has been called on any clone.
    ///
    /// [`cancel()`]: Self::cancel
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives in `self`, so this can't fail with a closed channel.
        drop(receiver.wait_for(|is_cancelled| *is_cancelled).await);
    }
}

#[cfg(test)]
mod tests_cancel_token {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancel_wakes_waiter() {
        let token = CancelToken::new();
        let waiter = tokio::spawn({
            let token = token.clone();
            async move { token.cancelled().await }
        });
        assert!(!token.is_cancelled());

        token.cancel();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_already_cancelled_resolves_immediately() {
        let token = CancelToken::new();
        token.cancel();
        token.cancel();
        tokio::time::timeout(Duration::from_millis(100), token.cancelled())
            .await
            .unwrap();
    }
}
