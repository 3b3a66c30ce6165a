//! Abort controller, abort signal and the caller-facing cancel handle.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;

/// Owner side of an abort signal.
#[derive(Debug, Clone)]
pub struct AbortController {
    sender: Arc<watch::Sender<bool>>,
}

impl AbortController {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// A signal observing this controller.
    #[must_use]
    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            receiver: self.sender.subscribe(),
        }
    }

    /// Abort every signal of this controller. Aborting twice is a no-op.
    pub fn abort(&self) {
        self.sender.send_if_modified(|aborted| {
            if *aborted {
                false
            } else {
                *aborted = true;
                true
            }
        });
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        *self.sender.borrow()
    }
}

impl Default for AbortController {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of an [`AbortController`].
#[derive(Debug, Clone)]
pub struct AbortSignal {
    receiver: watch::Receiver<bool>,
}

impl AbortSignal {
    /// A signal that never aborts.
    #[must_use]
    pub fn never() -> Self {
        let (_, receiver) = watch::channel(false);
        Self { receiver }
    }

    /// A signal that aborts once `duration` has elapsed.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn timeout(duration: Duration) -> Self {
        let controller = AbortController::new();
        let signal = controller.signal();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            tracing::debug!(target: "niupee::transport", ?duration, "abort signal timed out");
            controller.abort();
        });
        signal
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolve once the signal aborts; pending forever if it never can.
    pub async fn aborted(&self) {
        let mut receiver = self.receiver.clone();
        if receiver.wait_for(|aborted| *aborted).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Idempotent cancellation handle returned alongside every result.
///
/// Cloning shares the same underlying action; only the first `cancel()`
/// across all clones runs it.
#[derive(Clone)]
pub struct CancelHandle {
    inner: Arc<CancelInner>,
}

struct CancelInner {
    fired: AtomicBool,
    action: Box<dyn Fn() + Send + Sync>,
}

impl CancelHandle {
    pub fn new<F>(action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(CancelInner {
                fired: AtomicBool::new(false),
                action: Box::new(action),
            }),
        }
    }

    /// A handle whose cancellation does nothing.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    /// A handle that aborts `controller`.
    #[must_use]
    pub fn from_controller(controller: AbortController) -> Self {
        Self::new(move || controller.abort())
    }

    pub fn cancel(&self) {
        if !self.inner.fired.swap(true, Ordering::AcqRel) {
            (self.inner.action)();
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.fired.load(Ordering::Acquire)
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test]
    async fn signal_observes_abort() {
        let controller = AbortController::new();
        let signal = controller.signal();
        assert!(!signal.is_aborted());

        let waiter = tokio::spawn({
            let signal = signal.clone();
            async move { signal.aborted().await }
        });
        controller.abort();
        controller.abort();
        waiter.await.unwrap();
        assert!(signal.is_aborted());
        assert!(controller.is_aborted());
    }

    #[tokio::test]
    async fn signal_created_after_abort_is_aborted() {
        let controller = AbortController::new();
        controller.abort();
        let signal = controller.signal();
        assert!(signal.is_aborted());
        tokio::time::timeout(Duration::from_secs(1), signal.aborted())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn never_signal_stays_pending() {
        let signal = AbortSignal::never();
        let waited = tokio::time::timeout(Duration::from_millis(20), signal.aborted()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn timeout_signal_fires() {
        let signal = AbortSignal::timeout(Duration::from_millis(10));
        tokio::time::timeout(Duration::from_secs(2), signal.aborted())
            .await
            .unwrap();
    }

    #[test]
    fn cancel_runs_action_once_across_clones() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let handle = CancelHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let clone = handle.clone();
        handle.cancel();
        clone.cancel();
        handle.cancel();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(clone.is_cancelled());
    }
}
