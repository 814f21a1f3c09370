//! Bounded event store with incremental per-region aggregates.
//!
//! The buffer keeps the most recent `capacity` events in insertion order.
//! Region aggregates are all-time totals: evicting an event from the buffer
//! never decrements them.

use crate::types::{FraudEvent, RegionStats};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Default buffer capacity.
pub const DEFAULT_CAPACITY: usize = 1000;

#[derive(Debug, Clone)]
struct RegionTally {
    name: String,
    count: u64,
    risk_score: u64,
}

/// In-memory event buffer and region aggregate table.
#[derive(Debug, Clone)]
pub struct EventStore {
    /// Buffered events, oldest at the front
    buffer: VecDeque<Arc<FraudEvent>>,
    /// Maximum buffered events
    capacity: usize,
    /// Aggregates in first-seen order
    tallies: Vec<RegionTally>,
    /// Region name to index in `tallies`
    index: HashMap<String, usize>,
    /// Events ever added
    total_events: u64,
}

impl EventStore {
    /// Create an empty store holding at most `capacity` events.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY) + 1),
            capacity,
            tallies: Vec::new(),
            index: HashMap::new(),
            total_events: 0,
        }
    }

    /// Add an event, updating aggregates and evicting the oldest buffered
    /// event when the buffer overflows. Returns the stored event.
    pub fn add(&mut self, event: FraudEvent) -> Arc<FraudEvent> {
        let event = Arc::new(event);
        self.total_events += 1;

        let weight = event.risk_weight();
        match self.index.get(&event.region) {
            Some(&idx) => {
                let tally = &mut self.tallies[idx];
                tally.count += 1;
                tally.risk_score += weight;
            }
            None => {
                self.index.insert(event.region.clone(), self.tallies.len());
                self.tallies.push(RegionTally {
                    name: event.region.clone(),
                    count: 1,
                    risk_score: weight,
                });
            }
        }

        self.buffer.push_back(Arc::clone(&event));
        while self.buffer.len() > self.capacity {
            self.buffer.pop_front();
        }

        event
    }

    /// The `k` regions with the most events, count descending.
    ///
    /// Ties keep the order in which regions were first seen.
    pub fn top_regions(&self, k: usize) -> Vec<RegionStats> {
        let mut stats: Vec<RegionStats> = self.tallies.iter().map(|t| self.to_stats(t)).collect();
        stats.sort_by(|a, b| b.count.cmp(&a.count));
        stats.truncate(k);
        stats
    }

    /// Snapshot of the buffered events in insertion order.
    pub fn all_events(&self) -> Vec<Arc<FraudEvent>> {
        self.buffer.iter().cloned().collect()
    }

    /// The `k` most recent buffered events, newest first.
    ///
    /// Sorted by timestamp; among equal timestamps the later insertion comes
    /// first.
    pub fn latest_events(&self, k: usize) -> Vec<Arc<FraudEvent>> {
        let mut events: Vec<Arc<FraudEvent>> = self.buffer.iter().rev().cloned().collect();
        events.sort_by(|a, b| b.timestamp_ms.cmp(&a.timestamp_ms));
        events.truncate(k);
        events
    }

    /// Aggregate for one region, if it has ever received an event.
    pub fn region_stats(&self, name: &str) -> Option<RegionStats> {
        self.index
            .get(name)
            .map(|&idx| self.to_stats(&self.tallies[idx]))
    }

    /// Number of buffered events.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Buffer capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events ever added, including evicted ones.
    pub fn total_events(&self) -> u64 {
        self.total_events
    }

    /// Number of distinct regions seen.
    pub fn region_count(&self) -> usize {
        self.tallies.len()
    }

    /// Store statistics.
    pub fn statistics(&self) -> StoreStatistics {
        StoreStatistics {
            buffered_events: self.buffer.len(),
            capacity: self.capacity,
            total_events: self.total_events,
            distinct_regions: self.tallies.len(),
            total_risk_score: self.tallies.iter().map(|t| t.risk_score).sum(),
        }
    }

    fn to_stats(&self, tally: &RegionTally) -> RegionStats {
        let percentage = if self.total_events == 0 {
            0.0
        } else {
            tally.count as f64 / self.total_events as f64 * 100.0
        };
        RegionStats {
            name: tally.name.clone(),
            count: tally.count,
            percentage,
            risk_score: tally.risk_score,
        }
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Store statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatistics {
    /// Events currently buffered
    pub buffered_events: usize,
    /// Buffer capacity
    pub capacity: usize,
    /// Events ever added
    pub total_events: u64,
    /// Distinct regions seen
    pub distinct_regions: usize,
    /// Sum of all region risk scores
    pub total_risk_score: u64,
}
