//! Snapshot command implementation
//!
//! Prepopulates a stream, runs a number of synchronous ticks and prints
//! what the dashboard widgets would show.

use crate::{CliError, Result};
use fraud_core::format::format_amount;
use fraud_stream::config::StreamConfig;
use fraud_stream::controller::{DashboardSnapshot, StreamController};
use fraud_stream::ticker::TickerLine;
use std::io::Write;
use tracing::info;

/// Snapshot output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tables
    Table,
    /// Pretty-printed JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown output format: {}. Supported: table, json",
                other
            ))),
        }
    }
}

/// Run the snapshot command
pub fn run<W: Write>(
    config: &StreamConfig,
    ticks: usize,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let controller = StreamController::from_config(config)?;
    for _ in 0..ticks {
        controller.tick();
    }
    info!(ticks, total = controller.total_events(), "Snapshot taken");

    let snapshot = controller.snapshot(config.top_regions, config.latest_events);
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &snapshot)?;
            writeln!(out)?;
        }
        OutputFormat::Table => render_table(&snapshot, out)?,
    }
    Ok(())
}

fn render_table<W: Write>(snapshot: &DashboardSnapshot, out: &mut W) -> Result<()> {
    let stats = &snapshot.statistics;
    writeln!(
        out,
        "Events: {} total, {} buffered (capacity {}), {} regions",
        stats.total_events, stats.buffered_events, stats.capacity, stats.distinct_regions
    )?;
    writeln!(out)?;

    writeln!(out, "Top regions")?;
    writeln!(
        out,
        "{:<4} {:<24} {:>7} {:>7} {:>6} {:<6}",
        "#", "Region", "Events", "Share", "Score", "Risk"
    )?;
    let top_score = snapshot
        .top_regions
        .first()
        .map(|s| s.risk_score)
        .unwrap_or_default();
    for (rank, region) in snapshot.top_regions.iter().enumerate() {
        writeln!(
            out,
            "{:<4} {:<24} {:>7} {:>6.1}% {:>6} {:<6}",
            rank + 1,
            region.name,
            region.count,
            region.percentage,
            region.risk_score,
            region.relative_risk(top_score)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Latest events")?;
    for event in &snapshot.latest_events {
        writeln!(out, "{}", TickerLine(event))?;
    }

    let volume: u64 = snapshot.latest_events.iter().map(|e| e.amount).sum();
    writeln!(out)?;
    writeln!(out, "Latest volume: {}", format_amount(volume))?;
    Ok(())
}
