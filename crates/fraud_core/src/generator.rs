//! Synthetic fraud event generator.
//!
//! Every draw goes through the injected random source, so a seeded generator
//! replays the same event sequence (identifiers included). Only the
//! timestamp comes from the [`Clock`].
//!
//! ## Draw Order
//!
//! 1. Region: biased towards the high-incidence subset
//! 2. Locality: a known locality with small jitter, or the centroid with
//!    larger jitter and a synthesised `"<region> Region"` name
//! 3. Risk level: fixed 30/40/30 split
//! 4. Amount: squared uniform, skewed towards the minimum
//! 5. Device: mobile only for high-risk events
//! 6. Identifier

use crate::geography::{Geography, Region};
use crate::types::{DeviceType, EventId, FraudEvent, RiskLevel};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Probability of drawing from the high-incidence subset.
pub const HIGH_INCIDENCE_BIAS: f64 = 0.7;
/// Probability of placing an event at a known locality when one exists.
pub const LOCALITY_PROBABILITY: f64 = 0.8;
/// Jitter scale around a locality coordinate.
pub const LOCALITY_JITTER: f64 = 0.05;
/// Jitter scale around a region centroid.
pub const REGION_JITTER: f64 = 0.5;
/// Smallest generated amount.
pub const MIN_AMOUNT: u64 = 1_000;
/// Span added on top of [`MIN_AMOUNT`] at the top of the distribution.
pub const AMOUNT_SPAN: f64 = 49_000.0;
/// Largest number of events produced by one stream tick.
pub const MAX_BURST: usize = 3;

/// Source of event timestamps.
pub trait Clock: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Weighted-random fraud event generator.
pub struct EventGenerator<R = StdRng> {
    geography: Geography,
    rng: R,
    clock: Arc<dyn Clock>,
}

impl EventGenerator<StdRng> {
    /// Create a generator seeded from OS entropy.
    pub fn new(geography: Geography) -> Self {
        Self::with_rng(geography, StdRng::from_entropy())
    }

    /// Create a reproducible generator.
    pub fn seeded(geography: Geography, seed: u64) -> Self {
        Self::with_rng(geography, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> EventGenerator<R> {
    /// Create a generator over an arbitrary random source.
    pub fn with_rng(geography: Geography, rng: R) -> Self {
        Self {
            geography,
            rng,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Geography the generator draws from.
    pub fn geography(&self) -> &Geography {
        &self.geography
    }

    /// Generate one event.
    pub fn generate(&mut self) -> FraudEvent {
        let region = pick_region(&mut self.rng, &self.geography);
        let (locality, latitude, longitude) =
            resolve_location(&mut self.rng, &self.geography, region);
        let risk_level = RiskLevel::from_roll(self.rng.gen());
        let amount = draw_amount(&mut self.rng);
        let device_type = draw_device(&mut self.rng, risk_level);
        let id = EventId::from_random_bytes(self.rng.gen());

        FraudEvent {
            id,
            timestamp_ms: self.clock.now_ms(),
            region: region.name.clone(),
            locality,
            amount,
            risk_level,
            device_type,
            latitude,
            longitude,
        }
    }

    /// Generate `count` events.
    pub fn generate_batch(&mut self, count: usize) -> Vec<FraudEvent> {
        (0..count).map(|_| self.generate()).collect()
    }

    /// Number of events for one stream tick, uniform in `1..=MAX_BURST`.
    pub fn draw_burst_size(&mut self) -> usize {
        self.rng.gen_range(1..=MAX_BURST)
    }
}

fn pick_region<'g, R: Rng>(rng: &mut R, geography: &'g Geography) -> &'g Region {
    let favoured = geography.high_incidence_len();
    if rng.gen::<f64>() < HIGH_INCIDENCE_BIAS && favoured > 0 {
        geography.high_incidence_at(rng.gen_range(0..favoured))
    } else {
        let regions = geography.regions();
        &regions[rng.gen_range(0..regions.len())]
    }
}

fn resolve_location<R: Rng>(
    rng: &mut R,
    geography: &Geography,
    region: &Region,
) -> (String, f64, f64) {
    let localities = geography.localities(&region.name);
    if !localities.is_empty() && rng.gen::<f64>() < LOCALITY_PROBABILITY {
        let locality = &localities[rng.gen_range(0..localities.len())];
        let latitude = locality.latitude + jitter(rng, LOCALITY_JITTER);
        let longitude = locality.longitude + jitter(rng, LOCALITY_JITTER);
        (locality.name.clone(), latitude, longitude)
    } else {
        let latitude = region.latitude + jitter(rng, REGION_JITTER);
        let longitude = region.longitude + jitter(rng, REGION_JITTER);
        (format!("{} Region", region.name), latitude, longitude)
    }
}

fn jitter<R: Rng>(rng: &mut R, scale: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * scale
}

fn draw_amount<R: Rng>(rng: &mut R) -> u64 {
    let u: f64 = rng.gen();
    MIN_AMOUNT + (u * u * AMOUNT_SPAN).round() as u64
}

fn draw_device<R: Rng>(rng: &mut R, risk_level: RiskLevel) -> DeviceType {
    if risk_level == RiskLevel::High {
        DeviceType::MOBILE[rng.gen_range(0..DeviceType::MOBILE.len())]
    } else {
        DeviceType::ALL[rng.gen_range(0..DeviceType::ALL.len())]
    }
}
