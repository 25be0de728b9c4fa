//! Quiet-interval timer for typed search terms.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use super::commands::WidgetEvent;
use super::session::Generation;

/// Delays a search until typing has paused for a fixed interval.
///
/// Each schedule call replaces the previous timer: the last keystroke wins,
/// nothing is queued or coalesced. When the interval elapses a
/// [`WidgetEvent::DebounceElapsed`] is posted back to the widget actor.
#[derive(Debug)]
pub struct Debouncer {
    interval: Duration,
    pending: Option<AbortHandle>,
}

impl Debouncer {
    /// Creates a debouncer with no pending timer.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    /// Whether a timer is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedules `term` to be searched after the quiet interval, cancelling
    /// any timer already pending.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(
        &mut self,
        generation: Generation,
        term: String,
        events: &mpsc::UnboundedSender<WidgetEvent>,
    ) {
        self.cancel();

        let events = events.clone();
        let interval = self.interval;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            let _ = events.send(WidgetEvent::DebounceElapsed { generation, term });
        });

        self.pending = Some(timer.abort_handle());
    }

    /// Cancels the pending timer. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(timer) => {
                timer.abort();
                true
            }
            None => false,
        }
    }

    /// Forgets the timer after it fired.
    pub fn fired(&mut self) {
        self.pending = None;
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elapsed_term(event: WidgetEvent) -> String {
        match event {
            WidgetEvent::DebounceElapsed { term, .. } => term,
            _ => panic!("expected a debounce event"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_quiet_interval() {
        let (events, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        debouncer.schedule(Generation::default(), "bat".to_string(), &events);

        tokio::time::sleep(Duration::from_millis(99)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(elapsed_term(rx.try_recv().unwrap()), "bat");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduling_keeps_only_latest_term() {
        let (events, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        for term in ["b", "ba", "bat"] {
            debouncer.schedule(Generation::default(), term.to_string(), &events);
            tokio::time::sleep(Duration::from_millis(40)).await;
        }
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(elapsed_term(rx.try_recv().unwrap()), "bat");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let (events, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        debouncer.schedule(Generation::default(), "bat".to_string(), &events);
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }
}
