use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

/// Cooperative cancellation handle for a single evaluation call.
///
/// A token combines an optional deadline with an explicitly triggerable
/// cancellation flag. Clones share the flag, so a clone handed to another
/// thread can abort an evaluation in progress; the evaluator polls the token
/// from its progress hook and terminates promptly once it fires.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token with no deadline.
    ///
    /// The evaluation runs to completion unless [`cancel`](Self::cancel) is
    /// called on this token or one of its clones.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a token that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(timeout),
            cancelled: Arc::default(),
        }
    }

    /// Create a token that expires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancelled: Arc::default(),
        }
    }

    /// Trigger cancellation.
    ///
    /// Takes effect at the evaluator's next progress check; an evaluation
    /// that has not started yet fails immediately.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether [`cancel`](Self::cancel) has been called on this token or any
    /// clone of it.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// The instant at which this token expires, if it carries a deadline.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether this token's deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}
