//! Timer-driven fraud event stream.
//!
//! The [`StreamController`] owns the generator, the event store and the
//! subscriber list. Each tick draws a burst of one to three events, adds
//! them to the store and hands every added event to each subscriber in
//! registration order. At most one timer is active at a time: starting
//! again replaces the running timer.
//!
//! Subscribers are invoked with no controller lock held, so a callback may
//! query the store, subscribe, unsubscribe, start or stop.

use crate::config::StreamConfig;
use crate::error::StreamError;
use fraud_core::generator::EventGenerator;
use fraud_core::geography::Geography;
use fraud_core::store::{EventStore, StoreStatistics};
use fraud_core::types::{FraudEvent, RegionStats};
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, trace};

/// Callback invoked for every new event.
pub type EventCallback = Arc<dyn Fn(&Arc<FraudEvent>) + Send + Sync>;

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// No active timer
    Idle,
    /// One active timer
    Running,
}

/// Point-in-time view of the store for dashboard consumers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Leading regions by event count
    pub top_regions: Vec<RegionStats>,
    /// Most recent events, newest first
    pub latest_events: Vec<Arc<FraudEvent>>,
    /// Store statistics
    pub statistics: StoreStatistics,
}

struct ActiveTimer {
    id: u64,
    running: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl ActiveTimer {
    fn cancel(self) {
        self.running.store(false, Ordering::SeqCst);
        self.task.abort();
    }
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<(u64, EventCallback)>,
}

struct Inner {
    store: RwLock<EventStore>,
    generator: Mutex<EventGenerator>,
    subscribers: Mutex<Subscribers>,
    timer: Mutex<Option<ActiveTimer>>,
    next_timer_id: AtomicU64,
    ticks: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Inner {
    fn emit_burst(&self, count: usize) -> Vec<Arc<FraudEvent>> {
        let events = lock(&self.generator).generate_batch(count);

        let mut added = Vec::with_capacity(events.len());
        for event in events {
            let event = self
                .store
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .add(event);
            self.notify(&event);
            added.push(event);
        }
        added
    }

    fn tick(&self) -> Vec<Arc<FraudEvent>> {
        let burst = lock(&self.generator).draw_burst_size();
        let events = self.emit_burst(burst);
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(tick, events = events.len(), "Stream tick");
        events
    }

    fn notify(&self, event: &Arc<FraudEvent>) {
        let callbacks: Vec<EventCallback> = lock(&self.subscribers)
            .entries
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        trace!(event_id = %event.id, subscribers = callbacks.len(), "Notifying subscribers");
        for callback in callbacks {
            if catch_unwind(AssertUnwindSafe(|| callback(event))).is_err() {
                error!(event_id = %event.id, "Subscriber panicked; continuing with the next one");
            }
        }
    }

    fn read_store(&self) -> std::sync::RwLockReadGuard<'_, EventStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owner of the event stream.
///
/// Cloning is cheap; clones share the same store, timer and subscribers.
///
/// # Examples
///
/// ```
/// use fraud_stream::prelude::*;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let controller = StreamController::seeded(Geography::india(), 100, 1);
/// let seen = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&seen);
/// let subscription = controller.subscribe(move |_| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// let produced = controller.tick();
/// assert_eq!(seen.load(Ordering::SeqCst), produced.len());
///
/// subscription.unsubscribe();
/// controller.tick();
/// assert_eq!(seen.load(Ordering::SeqCst), produced.len());
/// ```
#[derive(Clone)]
pub struct StreamController {
    inner: Arc<Inner>,
}

impl StreamController {
    /// Create a controller over an existing store and generator.
    pub fn new(store: EventStore, generator: EventGenerator) -> Self {
        Self {
            inner: Arc::new(Inner {
                store: RwLock::new(store),
                generator: Mutex::new(generator),
                subscribers: Mutex::new(Subscribers::default()),
                timer: Mutex::new(None),
                next_timer_id: AtomicU64::new(1),
                ticks: AtomicU64::new(0),
            }),
        }
    }

    /// Create a reproducible controller with an empty store.
    pub fn seeded(geography: Geography, capacity: usize, seed: u64) -> Self {
        Self::new(
            EventStore::new(capacity),
            EventGenerator::seeded(geography, seed),
        )
    }

    /// Build a controller over the India geography from configuration and
    /// prepopulate its store.
    pub fn from_config(config: &StreamConfig) -> Result<Self, StreamError> {
        config.validate()?;

        let geography = Geography::india();
        let generator = match config.seed {
            Some(seed) => EventGenerator::seeded(geography, seed),
            None => EventGenerator::new(geography),
        };
        let controller = Self::new(EventStore::new(config.buffer_capacity), generator);
        controller.prepopulate(config.prepopulate);

        info!(
            capacity = config.buffer_capacity,
            prepopulated = config.prepopulate,
            seeded = config.seed.is_some(),
            "Stream controller ready"
        );
        Ok(controller)
    }

    /// Add `count` events without notifying subscribers.
    pub fn prepopulate(&self, count: usize) -> usize {
        let events = lock(&self.inner.generator).generate_batch(count);
        let mut store = self.inner.store.write().unwrap_or_else(PoisonError::into_inner);
        for event in events {
            store.add(event);
        }
        count
    }

    /// Register a callback for every event produced from now on.
    ///
    /// A panicking callback is logged and skipped; the remaining subscribers
    /// and the timer are unaffected.
    ///
    /// The controller keeps the callback alive until it is unsubscribed. A
    /// callback that captures a clone of this controller therefore keeps the
    /// controller, and any running timer, alive as well: stop the stream or
    /// unsubscribe explicitly to release it.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Arc<FraudEvent>) + Send + Sync + 'static,
    {
        let mut subscribers = lock(&self.inner.subscribers);
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        subscribers.entries.push((id, Arc::new(callback)));
        debug!(subscriber = id, total = subscribers.entries.len(), "Subscriber registered");

        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Run one tick synchronously: draw a burst size, generate, store and
    /// notify. Returns the events produced.
    pub fn tick(&self) -> Vec<Arc<FraudEvent>> {
        self.inner.tick()
    }

    /// Generate, store and publish exactly `count` events.
    pub fn emit_burst(&self, count: usize) -> Vec<Arc<FraudEvent>> {
        self.inner.emit_burst(count)
    }

    /// Start the timer, replacing any active one.
    ///
    /// The first tick fires one full `interval` after the call. Must be
    /// called from within a tokio runtime.
    pub fn start(&self, interval: Duration) -> Result<StreamHandle, StreamError> {
        if interval.is_zero() {
            return Err(StreamError::InvalidInterval);
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| StreamError::NoRuntime)?;

        let id = self.inner.next_timer_id.fetch_add(1, Ordering::SeqCst);
        let running = Arc::new(AtomicBool::new(true));
        let weak = Arc::downgrade(&self.inner);

        let mut slot = lock(&self.inner.timer);
        if let Some(previous) = slot.take() {
            info!(timer = previous.id, "Replacing active stream timer");
            previous.cancel();
        }

        let task = runtime.spawn(run_timer(weak, interval, Arc::clone(&running)));
        *slot = Some(ActiveTimer { id, running, task });
        info!(timer = id, interval_ms = interval.as_millis() as u64, "Stream started");

        Ok(StreamHandle {
            id,
            inner: Arc::downgrade(&self.inner),
        })
    }

    /// Stop whichever timer is active. No-op when idle.
    pub fn stop(&self) {
        if let Some(timer) = lock(&self.inner.timer).take() {
            info!(timer = timer.id, "Stream stopped");
            timer.cancel();
        }
    }

    /// Current state.
    pub fn state(&self) -> StreamState {
        if lock(&self.inner.timer).is_some() {
            StreamState::Running
        } else {
            StreamState::Idle
        }
    }

    /// Whether a timer is active.
    pub fn is_running(&self) -> bool {
        self.state() == StreamState::Running
    }

    /// Ticks run so far, timer-driven or manual.
    pub fn tick_count(&self) -> u64 {
        self.inner.ticks.load(Ordering::SeqCst)
    }

    /// Registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner.subscribers).entries.len()
    }

    /// The `k` most recent events, newest first.
    pub fn latest_events(&self, k: usize) -> Vec<Arc<FraudEvent>> {
        self.inner.read_store().latest_events(k)
    }

    /// Every buffered event in insertion order.
    pub fn all_events(&self) -> Vec<Arc<FraudEvent>> {
        self.inner.read_store().all_events()
    }

    /// The `k` regions with the most events.
    pub fn top_regions(&self, k: usize) -> Vec<RegionStats> {
        self.inner.read_store().top_regions(k)
    }

    /// Events ever added.
    pub fn total_events(&self) -> u64 {
        self.inner.read_store().total_events()
    }

    /// Store statistics.
    pub fn statistics(&self) -> StoreStatistics {
        self.inner.read_store().statistics()
    }

    /// Consistent view of leaderboard, latest events and statistics.
    pub fn snapshot(&self, top: usize, latest: usize) -> DashboardSnapshot {
        let store = self.inner.read_store();
        DashboardSnapshot {
            top_regions: store.top_regions(top),
            latest_events: store.latest_events(latest),
            statistics: store.statistics(),
        }
    }
}

async fn run_timer(inner: Weak<Inner>, period: Duration, running: Arc<AtomicBool>) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if !running.load(Ordering::SeqCst) {
            break;
        }
        match inner.upgrade() {
            Some(inner) => {
                inner.tick();
            }
            None => break,
        }
    }
}

/// Handle returned by [`StreamController::start`].
///
/// Stopping is idempotent, and a no-op once this handle's timer has been
/// stopped or replaced by a later `start`. Dropping the handle leaves the
/// timer running.
#[derive(Debug, Clone)]
pub struct StreamHandle {
    id: u64,
    inner: Weak<Inner>,
}

impl StreamHandle {
    /// Cancel the timer this handle started.
    ///
    /// Unlike [`StreamController::stop`], this never cancels a timer started
    /// by a later `start`.
    pub fn stop(&self) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let mut slot = lock(&inner.timer);
        if slot.as_ref().is_some_and(|timer| timer.id == self.id) {
            if let Some(timer) = slot.take() {
                info!(timer = timer.id, "Stream stopped");
                timer.cancel();
            }
        }
    }

    /// Whether this handle's timer is still the active one.
    pub fn is_active(&self) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| lock(&inner.timer).as_ref().is_some_and(|t| t.id == self.id))
    }
}

/// Handle returned by [`StreamController::subscribe`].
///
/// Unsubscribing is idempotent. Dropping the handle keeps the callback
/// registered.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    inner: Weak<Inner>,
}

impl Subscription {
    /// Remove exactly this subscription's callback.
    pub fn unsubscribe(&self) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let mut subscribers = lock(&inner.subscribers);
        let before = subscribers.entries.len();
        subscribers.entries.retain(|(id, _)| *id != self.id);
        if subscribers.entries.len() < before {
            debug!(subscriber = self.id, "Subscriber removed");
        }
    }

    /// Whether the callback is still registered.
    pub fn is_active(&self) -> bool {
        self.inner.upgrade().is_some_and(|inner| {
            lock(&inner.subscribers)
                .entries
                .iter()
                .any(|(id, _)| *id == self.id)
        })
    }
}
