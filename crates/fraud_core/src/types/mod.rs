//! Event model types.
//!
//! This module provides:
//! - [`FraudEvent`]: one immutable synthetic fraud occurrence
//! - [`RiskLevel`] and [`DeviceType`]: closed classifications carried by events
//! - [`RegionStats`]: all-time per-region aggregate with derived percentage

mod event;
mod stats;

pub use event::{DeviceType, EventId, FraudEvent, RiskLevel};
pub use stats::RegionStats;
