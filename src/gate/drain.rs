//! Drain completion signal.

use tokio::sync::watch;

/// Latched, manually resettable signal raised when the last in-flight
/// request completes during shutdown.
///
/// Backed by a `watch` channel so a waiter that subscribes after the signal
/// was raised still observes it.
#[derive(Debug)]
pub struct DrainSignal {
    tx: watch::Sender<bool>,
}

impl DrainSignal {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Raise the signal. No-op if already set.
    pub fn set(&self) {
        self.tx.send_if_modified(|set| {
            if *set {
                false
            } else {
                *set = true;
                true
            }
        });
    }

    /// Lower the signal.
    pub fn reset(&self) {
        self.tx.send_replace(false);
    }

    pub fn is_set(&self) -> bool {
        *self.tx.borrow()
    }

    /// Wait until the signal is set.
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|set| *set).await;
    }
}

impl Default for DrainSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn wait_returns_immediately_when_already_set() {
        let signal = DrainSignal::new();
        signal.set();
        signal.set();
        assert!(signal.is_set());
        tokio::time::timeout(Duration::from_secs(1), signal.wait())
            .await
            .expect("latched signal should not block");
    }

    #[tokio::test]
    async fn wait_wakes_on_set() {
        let signal = Arc::new(DrainSignal::new());
        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.wait().await })
        };

        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        signal.set();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .unwrap();
    }

    #[test]
    fn reset_lowers_signal() {
        let signal = DrainSignal::default();
        signal.set();
        signal.reset();
        assert!(!signal.is_set());
    }
}
