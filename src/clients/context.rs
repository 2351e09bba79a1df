//! Caller-supplied cancellation and deadlines.

use std::future::{pending, Future};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::clients::errors::ClientError;

/// Carries the caller's cancellation signal and deadline into a call.
///
/// A call suspends at two points: waiting for a rate-limit permit and
/// waiting on the transport. Both race against the context, and the
/// context is checked before any work starts, so a call made with an
/// already-cancelled context issues no request at all.
///
/// Contexts are cheap to clone; clones share the same cancellation signal.
///
/// # Example
///
/// ```rust
/// use notion_api::RequestContext;
/// use std::time::Duration;
///
/// let (ctx, handle) = RequestContext::cancellable();
/// let ctx = ctx.with_timeout(Duration::from_secs(5));
/// assert!(!ctx.is_cancelled());
///
/// handle.cancel();
/// assert!(ctx.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    cancel: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

/// Cancels every [`RequestContext`] created alongside it.
///
/// Dropping the handle without calling [`cancel`](Self::cancel) leaves the
/// context running.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    /// Fires the cancellation signal.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl RequestContext {
    /// A context that never fires.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that fires when the returned handle is cancelled.
    #[must_use]
    pub fn cancellable() -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        let ctx = Self {
            cancel: Some(receiver),
            deadline: None,
        };
        (ctx, CancelHandle { sender })
    }

    /// Adds a deadline `timeout` from now.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Adds a deadline. An earlier existing deadline is kept.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(self.deadline.map_or(deadline, |current| current.min(deadline)));
        self
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` once the cancellation signal has fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|receiver| *receiver.borrow())
    }

    /// Returns the error the context has fired with, if it has.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Cancelled`] or [`ClientError::DeadlineExceeded`].
    pub fn check(&self) -> Result<(), ClientError> {
        if self.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(ClientError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Runs `future` unless the context fires first.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Cancelled`] or [`ClientError::DeadlineExceeded`]
    /// if the context fired before or while `future` ran. The future is
    /// dropped in that case.
    pub async fn run<F: Future>(&self, future: F) -> Result<F::Output, ClientError> {
        self.check()?;
        tokio::select! {
            biased;
            error = self.fired() => Err(error),
            output = future => Ok(output),
        }
    }

    async fn fired(&self) -> ClientError {
        let cancelled = async {
            match &self.cancel {
                Some(receiver) => {
                    let mut receiver = receiver.clone();
                    let closed = receiver.wait_for(|cancelled| *cancelled).await.is_err();
                    // A dropped handle can no longer cancel.
                    if closed {
                        pending::<()>().await;
                    }
                }
                None => pending::<()>().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            () = cancelled => ClientError::Cancelled,
            () = expired => ClientError::DeadlineExceeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_background_runs_to_completion() {
        let ctx = RequestContext::background();
        assert_eq!(ctx.run(async { 7 }).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_pre_cancelled_context_never_polls_future() {
        let (ctx, handle) = RequestContext::cancellable();
        handle.cancel();

        let mut polled = false;
        let result = ctx
            .run(async {
                polled = true;
            })
            .await;
        assert!(matches!(result, Err(ClientError::Cancelled)));
        assert!(!polled);
    }

    #[tokio::test]
    async fn test_cancel_interrupts_pending_future() {
        let (ctx, handle) = RequestContext::cancellable();
        let task = tokio::spawn(async move { ctx.run(pending::<()>()).await });

        tokio::task::yield_now().await;
        handle.cancel();

        let result = task.await.unwrap();
        assert!(matches!(result, Err(ClientError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_interrupts_pending_future() {
        let ctx = RequestContext::background().with_timeout(Duration::from_secs(2));
        let result = ctx.run(pending::<()>()).await;
        assert!(matches!(result, Err(ClientError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn test_dropped_handle_does_not_cancel() {
        let (ctx, handle) = RequestContext::cancellable();
        drop(handle);
        assert!(!ctx.is_cancelled());
        assert_eq!(ctx.run(async { "done" }).await.unwrap(), "done");
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_deadline_keeps_earliest() {
        let soon = Instant::now() + Duration::from_secs(1);
        let later = Instant::now() + Duration::from_secs(10);
        let ctx = RequestContext::background()
            .with_deadline(soon)
            .with_deadline(later);
        assert_eq!(ctx.deadline(), Some(soon));
    }
}
