//! Per-tick counters for the simulation world.

/// Counters collected during a single [`World::tick`](crate::World::tick)
/// call.
///
/// The tick driver populates these as it sweeps; consumers (telemetry,
/// tests, tuning) read them from the returned
/// [`TickReport`](crate::TickReport). All counters reset to zero at the
/// start of every tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickMetrics {
    /// Item entities alive when the merge sweep started.
    pub items_ticked: u64,
    /// Scans that passed every gate and enumerated candidates.
    pub scans_run: u64,
    /// Scans skipped because the shared cooldown window had not elapsed.
    pub scans_throttled: u64,
    /// Scans skipped because the entity was not mergeable or not yet
    /// pickable.
    pub scans_ineligible: u64,
    /// Neighbor candidates examined across all scans (self excluded).
    pub candidates_seen: u64,
    /// Merges approved and committed.
    pub merges_committed: u64,
    /// Merges cancelled by an observer.
    pub merges_vetoed: u64,
    /// Item entities removed by the despawn sweep.
    pub items_despawned: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = TickMetrics::default();
        assert_eq!(m.items_ticked, 0);
        assert_eq!(m.scans_run, 0);
        assert_eq!(m.scans_throttled, 0);
        assert_eq!(m.scans_ineligible, 0);
        assert_eq!(m.candidates_seen, 0);
        assert_eq!(m.merges_committed, 0);
        assert_eq!(m.merges_vetoed, 0);
        assert_eq!(m.items_despawned, 0);
    }
}
