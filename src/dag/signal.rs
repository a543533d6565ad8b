// src/dag/signal.rs

//! One-shot, multi-observer completion signal.
//!
//! Each task owns one [`CompletionPublisher`]. Every dependent holds a
//! [`CompletionWaiter`] subscribed to that publisher. The publisher resolves
//! exactly once (`publish` consumes it) and every waiter observes the same
//! boolean. Publishing never blocks, however many dependents subscribed.
//!
//! Built on `tokio::sync::watch`: the slot starts as `None` and flips to
//! `Some(success)`. If the publisher is dropped without publishing (its
//! worker panicked), waiters observe `false`.

use tokio::sync::watch;

/// Write side of a task's completion signal.
#[derive(Debug)]
pub struct CompletionPublisher {
    tx: watch::Sender<Option<bool>>,
}

/// Read side of a prerequisite's completion signal.
#[derive(Debug)]
pub struct CompletionWaiter {
    rx: watch::Receiver<Option<bool>>,
}

impl CompletionPublisher {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Register one more observer of this task's outcome.
    pub fn subscribe(&self) -> CompletionWaiter {
        CompletionWaiter {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of waiters currently subscribed.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Resolve the signal. Never blocks, even with no subscribers left.
    pub fn publish(self, success: bool) {
        self.tx.send_replace(Some(success));
    }
}

impl Default for CompletionPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionWaiter {
    /// Wait until the prerequisite has published and return its outcome.
    pub async fn wait(mut self) -> bool {
        self.rx
            .wait_for(Option::is_some)
            .await
            .map(|value| (*value).unwrap_or(false))
            .unwrap_or(false)
    }
}
