//! Generation-counter debouncing.
//!
//! Every new input bumps the generation. A waiter sleeps for the window and
//! then checks whether its generation is still the latest; if anything newer
//! arrived in the meantime it gives up. Timers are never stacked: only the
//! waiter holding the newest generation fires.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Identifies one input event in a debounced stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, generation: Arc::new(AtomicU64::new(0)) }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a new input and restart the window.
    pub fn bump(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Wait out the window. Returns `true` if no newer input arrived.
    pub async fn settle(&self, ticket: Ticket) -> bool {
        tokio::time::sleep(self.delay).await;
        self.is_current(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn lone_input_settles() {
        let d = Debouncer::new(Duration::from_millis(500));
        let t = d.bump();
        assert!(d.settle(t).await);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_input_supersedes_older() {
        let d = Debouncer::new(Duration::from_millis(500));
        let first = d.bump();
        let waiter = {
            let d = d.clone();
            tokio::spawn(async move { d.settle(first).await })
        };
        tokio::time::sleep(Duration::from_millis(200)).await;
        let second = d.bump();

        assert!(!waiter.await.unwrap(), "first input should be dropped");
        assert!(d.settle(second).await);
    }

    #[tokio::test(start_paused = true)]
    async fn window_restarts_from_latest_input() {
        let d = Debouncer::new(Duration::from_millis(500));
        let start = tokio::time::Instant::now();
        d.bump();
        tokio::time::sleep(Duration::from_millis(400)).await;
        let last = d.bump();
        assert!(d.settle(last).await);
        assert!(start.elapsed() >= Duration::from_millis(900));
    }
}
