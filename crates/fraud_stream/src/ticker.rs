//! Scrolling ticker state.
//!
//! Keeps a short newest-first list of events: seeded from the store's
//! latest events, then fed by a stream subscription.

use crate::controller::{StreamController, Subscription};
use fraud_core::format::{format_amount, format_time};
use fraud_core::types::FraudEvent;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Default number of ticker entries.
pub const DEFAULT_TICKER_LENGTH: usize = 20;

/// Bounded newest-first event list.
#[derive(Debug, Clone)]
pub struct TickerFeed {
    capacity: usize,
    entries: VecDeque<Arc<FraudEvent>>,
}

impl TickerFeed {
    /// Create an empty feed.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Replace the contents with `latest` (already newest first).
    pub fn seed(&mut self, latest: Vec<Arc<FraudEvent>>) {
        self.entries = latest.into_iter().take(self.capacity).collect();
    }

    /// Put a new event at the top, dropping the oldest past capacity.
    pub fn push(&mut self, event: Arc<FraudEvent>) {
        self.entries.push_front(event);
        self.entries.truncate(self.capacity);
    }

    /// Current entries, newest first.
    pub fn entries(&self) -> Vec<Arc<FraudEvent>> {
        self.entries.iter().cloned().collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the feed is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Seed a shared feed from the controller and keep it updated.
    pub fn attach(
        controller: &StreamController,
        capacity: usize,
        initial: usize,
    ) -> (Arc<Mutex<TickerFeed>>, Subscription) {
        let mut feed = TickerFeed::new(capacity);
        feed.seed(controller.latest_events(initial));
        let feed = Arc::new(Mutex::new(feed));

        let sink = Arc::clone(&feed);
        let subscription = controller.subscribe(move |event| {
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(Arc::clone(event));
        });

        (feed, subscription)
    }
}

impl Default for TickerFeed {
    fn default() -> Self {
        Self::new(DEFAULT_TICKER_LENGTH)
    }
}

/// One rendered ticker row.
pub struct TickerLine<'a>(pub &'a FraudEvent);

impl fmt::Display for TickerLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let event = self.0;
        write!(
            f,
            "{:>11}  {:<40}  {:>10}  {:<6}  {}",
            format_time(event.timestamp_ms),
            format!("{}, {}", event.locality, event.region),
            format_amount(event.amount),
            event.risk_level,
            event.device_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fraud_core::geography::Geography;

    #[test]
    fn test_push_keeps_newest_first_and_bounded() {
        let controller = StreamController::seeded(Geography::india(), 100, 11);
        let events = controller.emit_burst(5);

        let mut feed = TickerFeed::new(3);
        for event in &events {
            feed.push(Arc::clone(event));
        }

        let ids: Vec<_> = feed.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![events[4].id, events[3].id, events[2].id]);
    }

    #[test]
    fn test_seed_truncates() {
        let controller = StreamController::seeded(Geography::india(), 100, 12);
        controller.prepopulate(30);

        let mut feed = TickerFeed::new(20);
        feed.seed(controller.latest_events(25));
        assert_eq!(feed.len(), 20);
    }

    #[test]
    fn test_attach_follows_stream() {
        let controller = StreamController::seeded(Geography::india(), 100, 13);
        controller.prepopulate(10);

        let (feed, subscription) = TickerFeed::attach(&controller, 20, 10);
        assert_eq!(feed.lock().unwrap().len(), 10);

        let produced = controller.emit_burst(2);
        {
            let feed = feed.lock().unwrap();
            assert_eq!(feed.len(), 12);
            assert_eq!(feed.entries()[0].id, produced[1].id);
        }

        subscription.unsubscribe();
        controller.emit_burst(2);
        assert_eq!(feed.lock().unwrap().len(), 12);
    }

    #[test]
    fn test_ticker_line_contents() {
        let controller = StreamController::seeded(Geography::india(), 10, 14);
        let event = controller.emit_burst(1).remove(0);

        let line = TickerLine(&event).to_string();
        assert!(line.contains(&event.region));
        assert!(line.contains(&event.locality));
        assert!(line.contains(event.risk_level.as_str()));
        assert!(line.contains('₹'));
    }
}
