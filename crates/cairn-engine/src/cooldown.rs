//! The shared merge-scan throttle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cairn_core::TickTime;

/// Sentinel for "no throttling": every tick qualifies for a scan.
const DISABLED: u64 = u64::MAX;

/// Process-wide shared cooldown between merge scans.
///
/// A cheaply clonable handle to a single shared cell holding the
/// cooldown in milliseconds. Every item entity in a world observes the
/// same cell: changing the value through any handle is seen by all
/// entities on their next eligibility check, and no entity caches a
/// private copy.
///
/// Reads and writes use relaxed atomics — the scheduling model accepts
/// a change becoming visible mid-tick-sequence, staleness of at most
/// one tick, so no lock is taken on the read path.
#[derive(Clone, Debug)]
pub struct MergeCooldown {
    millis: Arc<AtomicU64>,
}

impl MergeCooldown {
    /// Create a cooldown cell; `None` disables throttling.
    pub fn new(delay: Option<Duration>) -> Self {
        let cell = Self {
            millis: Arc::new(AtomicU64::new(DISABLED)),
        };
        cell.set(delay);
        cell
    }

    /// A cooldown cell with throttling disabled.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// The current cooldown, or `None` when throttling is disabled.
    pub fn get(&self) -> Option<Duration> {
        match self.millis.load(Ordering::Relaxed) {
            DISABLED => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Change the cooldown; `None` disables throttling entirely.
    ///
    /// Takes effect on every entity's next eligibility check. Durations
    /// beyond `u64::MAX - 1` milliseconds are clamped below the
    /// disabled sentinel.
    pub fn set(&self, delay: Option<Duration>) {
        let ms = match delay {
            None => DISABLED,
            Some(d) => u64::try_from(d.as_millis())
                .unwrap_or(DISABLED - 1)
                .min(DISABLED - 1),
        };
        self.millis.store(ms, Ordering::Relaxed);
    }

    /// Whether an entity whose last scan attempt was at `last_check`
    /// may scan again at `now`.
    ///
    /// True when throttling is disabled or the cooldown window has
    /// fully elapsed (the boundary tick qualifies).
    pub fn gate_passes(&self, now: TickTime, last_check: TickTime) -> bool {
        match self.millis.load(Ordering::Relaxed) {
            DISABLED => true,
            ms => now.saturating_since(last_check) >= ms,
        }
    }
}

impl Default for MergeCooldown {
    /// 500 ms — ten 50 ms server ticks, the conventional merge delay.
    fn default() -> Self {
        Self::new(Some(Duration::from_millis(500)))
    }
}
