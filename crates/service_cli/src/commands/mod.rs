//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod regions;
pub mod snapshot;
pub mod stream;
