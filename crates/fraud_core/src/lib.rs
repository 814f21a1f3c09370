//! # fraud_core: Synthetic Fraud Events and Rolling Aggregates
//!
//! Foundation layer of the fraud tracker. Everything here is synchronous and
//! free of I/O:
//!
//! - Geography table of Indian states with locality coordinates (`geography`)
//! - Event model: `FraudEvent`, `RiskLevel`, `DeviceType`, `RegionStats` (`types`)
//! - Weighted-random event generation with an injectable RNG and clock (`generator`)
//! - Bounded, insertion-ordered event buffer with all-time per-region
//!   aggregates (`store`)
//! - Currency and time display helpers (`format`)
//!
//! ## Usage Examples
//!
//! ```rust
//! use fraud_core::prelude::*;
//!
//! let mut generator = EventGenerator::seeded(Geography::india(), 7);
//! let mut store = EventStore::new(100);
//!
//! for event in generator.generate_batch(10) {
//!     store.add(event);
//! }
//!
//! assert_eq!(store.len(), 10);
//! assert_eq!(store.total_events(), 10);
//! assert!(store.top_regions(5).len() <= 5);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod format;
pub mod generator;
pub mod geography;
pub mod store;
pub mod types;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::format::{format_amount, format_time, format_time_in};
    pub use crate::generator::{Clock, EventGenerator, SystemClock};
    pub use crate::geography::{Geography, GeographyError, Locality, Region};
    pub use crate::store::{EventStore, StoreStatistics, DEFAULT_CAPACITY};
    pub use crate::types::{DeviceType, EventId, FraudEvent, RegionStats, RiskLevel};
}
