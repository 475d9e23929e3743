//! Cancellable idle-window timer for typeahead search.
//!
//! Every input event starts a new timer and supersedes all pending ones;
//! only the timer that completes uninterrupted reports `true`, and its
//! caller runs the filter computation. Driven by the tokio clock so tests
//! can pause time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::time::{sleep, Duration};

/// Idle window for search inputs.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn for_search() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }

    /// Register an input event and wait out the idle window. Returns `true`
    /// only when no newer event arrived in the meantime; superseded callers
    /// get `false` and skip their recomputation.
    pub async fn settle(&self) -> bool {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        sleep(self.delay).await;
        self.generation.load(Ordering::SeqCst) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn keystroke_inside_window_supersedes_pending_timer() {
        let debouncer = Debouncer::new(Duration::from_millis(300));

        let (first, second) = tokio::join!(debouncer.settle(), async {
            sleep(Duration::from_millis(100)).await;
            debouncer.settle().await
        });

        assert!(!first, "superseded keystroke must not fire");
        assert!(second, "latest keystroke fires after the idle window");
    }

    #[tokio::test(start_paused = true)]
    async fn only_the_last_of_a_burst_fires() {
        let debouncer = Debouncer::new(Duration::from_millis(300));

        let (a, b, c) = tokio::join!(
            debouncer.settle(),
            async {
                sleep(Duration::from_millis(100)).await;
                debouncer.settle().await
            },
            async {
                sleep(Duration::from_millis(200)).await;
                debouncer.settle().await
            }
        );

        assert!(!a);
        assert!(!b);
        assert!(c);
    }

    #[tokio::test(start_paused = true)]
    async fn events_separated_by_the_idle_window_both_fire() {
        let debouncer = Debouncer::new(Duration::from_millis(300));

        assert!(debouncer.settle().await);
        sleep(Duration::from_millis(400)).await;
        assert!(debouncer.settle().await);
    }
}
