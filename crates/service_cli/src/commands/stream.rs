//! Stream command implementation
//!
//! Runs the timer-driven stream, printing a ticker line per event, until
//! the requested duration elapses or Ctrl-C is pressed. The ticker feed and
//! the leaderboard are printed on exit.

use crate::Result;
use fraud_stream::config::StreamConfig;
use fraud_stream::controller::StreamController;
use fraud_stream::ticker::{TickerFeed, TickerLine};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{info, warn};

/// Outcome of a stream run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSummary {
    /// Timer ticks run
    pub ticks: u64,
    /// Events published to subscribers
    pub published: u64,
    /// Events in the store, prepopulated ones included
    pub total_events: u64,
    /// Entries left in the ticker feed
    pub ticker_entries: usize,
}

/// Run the stream command
pub async fn run(config: &StreamConfig, duration: Option<Duration>) -> Result<StreamSummary> {
    let controller = StreamController::from_config(config)?;
    let prepopulated = controller.total_events();

    let (ticker, ticker_subscription) =
        TickerFeed::attach(&controller, config.ticker_length, config.latest_events);
    for event in lock_feed(&ticker).entries().iter().rev() {
        println!("{}", TickerLine(event));
    }

    let subscription = controller.subscribe(|event| {
        println!("{}", TickerLine(event));
    });
    let handle = controller.start(config.interval())?;

    match duration {
        Some(duration) => tokio::time::sleep(duration).await,
        None => {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Unable to listen for Ctrl-C, stopping");
            }
        }
    }

    handle.stop();
    subscription.unsubscribe();
    ticker_subscription.unsubscribe();

    let feed = lock_feed(&ticker).entries();
    let summary = StreamSummary {
        ticks: controller.tick_count(),
        published: controller.total_events() - prepopulated,
        total_events: controller.total_events(),
        ticker_entries: feed.len(),
    };
    info!(
        ticks = summary.ticks,
        published = summary.published,
        total = summary.total_events,
        "Stream finished"
    );

    println!();
    println!("Ticker (newest first)");
    for event in &feed {
        println!("{}", TickerLine(event));
    }

    println!();
    println!("Top regions after {} ticks", summary.ticks);
    let top = controller.top_regions(config.top_regions);
    let top_score = top.first().map(|s| s.risk_score).unwrap_or_default();
    for (rank, region) in top.iter().enumerate() {
        println!(
            "{:<4} {:<24} {:>7} {:>6.1}% {:<6}",
            rank + 1,
            region.name,
            region.count,
            region.percentage,
            region.relative_risk(top_score)
        );
    }

    Ok(summary)
}

fn lock_feed(feed: &Mutex<TickerFeed>) -> MutexGuard<'_, TickerFeed> {
    feed.lock().unwrap_or_else(PoisonError::into_inner)
}
