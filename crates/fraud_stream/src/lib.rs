//! # Fraud Event Stream
//!
//! Timer-driven publication of synthetic fraud events.
//!
//! A [`StreamController`](controller::StreamController) is created once by
//! the composition root and handed to every consumer. It owns the event
//! generator and the bounded store, ticks on a tokio interval, and pushes
//! each new event to its subscribers. Consumers that prefer pulling read
//! snapshots through the same controller.
//!
//! ## Modules
//!
//! - [`controller`]: start/stop timer, subscriptions, store queries
//! - [`ticker`]: bounded newest-first feed for the scrolling ticker
//! - [`config`]: TOML configuration with environment overrides
//! - [`error`]: stream error type

pub mod config;
pub mod controller;
pub mod error;
pub mod ticker;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, StreamConfig};
    pub use crate::controller::{
        DashboardSnapshot, EventCallback, StreamController, StreamHandle, StreamState, Subscription,
    };
    pub use crate::error::StreamError;
    pub use crate::ticker::{TickerFeed, TickerLine};
    pub use fraud_core::prelude::*;
}
