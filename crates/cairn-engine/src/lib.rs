//! Tick driver and merge decision engine for Cairn ground items.
//!
//! Provides the [`World`] — entity storage plus the synchronous tick
//! loop — and the merge decision sweep that lets nearby, compatible
//! item entities collapse into single stacks under a shared cooldown
//! and a cancellable approval protocol.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod cooldown;
pub mod entity;
pub mod merge;
pub mod metrics;
pub mod world;

pub use config::{ConfigError, WorldConfig};
pub use cooldown::MergeCooldown;
pub use entity::ItemEntity;
pub use merge::{MergeRecord, ScanError};
pub use metrics::TickMetrics;
pub use world::{TickError, TickReport, World};
