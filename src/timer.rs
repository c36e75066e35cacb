//! Suspension points between tones.

use std::future::Future;
use std::time::Duration;

/// How a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    Elapsed,
    Cancelled,
}

/// A cancellable delay the sequencer awaits between digits.
pub trait Timer {
    fn sleep(&mut self, duration: Duration) -> impl Future<Output = Wait>;

    /// Whether a cancellation is already pending, so the next wait would end
    /// immediately.
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Tokio-backed timer, cancelled through a shared token.
#[cfg(any(feature = "cli", test))]
#[derive(Debug, Clone, Default)]
pub struct TokioTimer {
    cancel: tokio_util::sync::CancellationToken,
}

#[cfg(any(feature = "cli", test))]
impl TokioTimer {
    pub fn new(cancel: tokio_util::sync::CancellationToken) -> Self {
        TokioTimer { cancel }
    }

    pub fn token(&self) -> &tokio_util::sync::CancellationToken {
        &self.cancel
    }
}

#[cfg(any(feature = "cli", test))]
impl Timer for TokioTimer {
    async fn sleep(&mut self, duration: Duration) -> Wait {
        tokio::select! {
            _ = tokio::time::sleep(duration) => Wait::Elapsed,
            _ = self.cancel.cancelled() => Wait::Cancelled,
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

// TokioTimer is also compiled for tests, so these run without `--features cli`.
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn elapses() {
        let mut timer = TokioTimer::default();
        assert_eq!(timer.sleep(Duration::from_millis(10)).await, Wait::Elapsed);
    }

    #[tokio::test]
    async fn cancelled_wait_returns_early() {
        let mut timer = TokioTimer::default();
        timer.token().cancel();
        let started = std::time::Instant::now();
        assert_eq!(timer.sleep(Duration::from_secs(60)).await, Wait::Cancelled);
        assert!(started.elapsed() < Duration::from_secs(60));
    }

    #[tokio::test]
    async fn shared_token_reports_cancellation() {
        let token = tokio_util::sync::CancellationToken::new();
        let timer = TokioTimer::new(token.clone());
        assert!(!timer.is_cancelled());
        token.cancel();
        assert!(timer.is_cancelled());
    }
}
