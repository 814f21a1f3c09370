//! Property tests for the bounded event store.
//!
//! Arbitrary add sequences are replayed against the store and checked
//! against a plain model of the expected buffer and aggregates.

use fraud_core::prelude::*;
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

const REGIONS: [&str; 4] = ["North", "South", "East", "West"];

fn make_event(seq: usize, region: usize, timestamp_ms: i64, risk: usize) -> FraudEvent {
    let mut bytes = [0u8; 16];
    bytes[..8].copy_from_slice(&(seq as u64).to_le_bytes());
    FraudEvent {
        id: EventId::from_random_bytes(bytes),
        timestamp_ms,
        region: REGIONS[region].to_string(),
        locality: format!("{} Region", REGIONS[region]),
        amount: 1_000 + seq as u64,
        risk_level: RiskLevel::ALL[risk],
        device_type: DeviceType::Other,
        latitude: 0.0,
        longitude: 0.0,
    }
}

/// (region index, timestamp increment, risk index)
fn add_strategy() -> impl Strategy<Value = Vec<(usize, i64, usize)>> {
    prop::collection::vec((0..REGIONS.len(), 0i64..3, 0..3usize), 0..200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_buffer_holds_most_recent_in_order(
        capacity in 1usize..40,
        adds in add_strategy(),
    ) {
        let mut store = EventStore::new(capacity);
        let mut added = Vec::new();
        let mut now = 0i64;

        for (seq, (region, step, risk)) in adds.iter().enumerate() {
            now += step;
            added.push(store.add(make_event(seq, *region, now, *risk)));
        }

        let expected_len = adds.len().min(capacity);
        prop_assert_eq!(store.len(), expected_len);

        let buffered = store.all_events();
        let tail = &added[added.len() - expected_len..];
        prop_assert_eq!(buffered.len(), tail.len());
        for (got, want) in buffered.iter().zip(tail) {
            prop_assert!(Arc::ptr_eq(got, want));
        }
    }

    #[test]
    fn test_counts_monotone_and_sum_to_total(
        capacity in 1usize..20,
        adds in add_strategy(),
    ) {
        let mut store = EventStore::new(capacity);
        let mut model: HashMap<&str, (u64, u64)> = HashMap::new();

        for (seq, (region, _, risk)) in adds.iter().enumerate() {
            let before = store.region_stats(REGIONS[*region]).map(|s| s.count).unwrap_or(0);
            store.add(make_event(seq, *region, seq as i64, *risk));
            let after = store.region_stats(REGIONS[*region]).map(|s| s.count).unwrap_or(0);
            prop_assert_eq!(after, before + 1);

            let entry = model.entry(REGIONS[*region]).or_default();
            entry.0 += 1;
            entry.1 += RiskLevel::ALL[*risk].weight();
        }

        let all = store.top_regions(REGIONS.len());
        let sum: u64 = all.iter().map(|s| s.count).sum();
        prop_assert_eq!(sum, store.total_events());
        prop_assert_eq!(store.total_events(), adds.len() as u64);

        for stats in &all {
            let (count, score) = model[stats.name.as_str()];
            prop_assert_eq!(stats.count, count);
            prop_assert_eq!(stats.risk_score, score);
        }
    }

    #[test]
    fn test_latest_sorted_descending(
        capacity in 1usize..50,
        k in 0usize..60,
        adds in add_strategy(),
    ) {
        let mut store = EventStore::new(capacity);
        let mut now = 0i64;
        for (seq, (region, step, risk)) in adds.iter().enumerate() {
            now += step;
            store.add(make_event(seq, *region, now, *risk));
        }

        let latest = store.latest_events(k);
        prop_assert_eq!(latest.len(), k.min(store.len()));
        for pair in latest.windows(2) {
            prop_assert!(pair[0].timestamp_ms >= pair[1].timestamp_ms);
        }
    }

    #[test]
    fn test_top_regions_sorted_and_bounded(
        k in 0usize..6,
        adds in add_strategy(),
    ) {
        let mut store = EventStore::new(10);
        for (seq, (region, _, risk)) in adds.iter().enumerate() {
            store.add(make_event(seq, *region, seq as i64, *risk));
        }

        let top = store.top_regions(k);
        prop_assert_eq!(top.len(), k.min(store.region_count()));
        for pair in top.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
    }
}

#[test]
fn test_generated_stream_through_store() {
    let mut generator = EventGenerator::seeded(Geography::india(), 2024);
    let mut store = EventStore::new(50);

    for event in generator.generate_batch(500) {
        store.add(event);
    }

    assert_eq!(store.len(), 50);
    assert_eq!(store.total_events(), 500);

    let top = store.top_regions(5);
    assert_eq!(top.len(), 5);
    // the favoured subset dominates the leaderboard
    assert!(["Maharashtra", "Delhi", "Karnataka", "Telangana", "Tamil Nadu"]
        .contains(&top[0].name.as_str()));
}
