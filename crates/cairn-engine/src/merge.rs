//! The merge decision sweep.
//!
//! One scan per item entity per qualifying tick: gate, stamp, enumerate
//! the entity's chunk, filter candidates, and — pending observer
//! approval — commit each merge. The scan visits *every* candidate in
//! the chunk within the single tick (no first-match early return), and
//! later pairs in the same scan operate on the initiator's stack as
//! committed by earlier pairs.
//!
//! # Gates
//!
//! A scan runs only when the entity is mergeable, currently pickable,
//! and the shared cooldown window has elapsed. Pickability gating means
//! an item still inside its pickup delay never scans — observed
//! behavior of the source system, preserved deliberately (it keeps
//! items that are about to be picked up from merging out from under
//! the picker).
//!
//! # Partition locality
//!
//! Candidates come from the initiator's chunk only. Entities in
//! adjacent chunks are never considered, even when geometrically within
//! merge range: the per-scan cost stays proportional to one chunk's
//! population regardless of world size.

use std::error::Error;
use std::fmt;

use cairn_core::{dispatch, EntityId, ItemStack, MergeEvent, MergeVerdict, TickTime};
use cairn_space::{ChunkPos, SpaceError};
use smallvec::SmallVec;

use crate::metrics::TickMetrics;
use crate::world::World;

// ── ScanError ──────────────────────────────────────────────────────

/// Collaborator faults that abort the current entity's scan.
///
/// A candidate failing a filter is never an error — it is skipped. These
/// variants cover the spatial index breaking its contract, which must
/// surface to the tick driver rather than silently scanning against
/// inconsistent state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The initiator's own chunk has no member set in the index.
    ChunkUnloaded {
        /// The chunk derived from the initiator's position.
        chunk: ChunkPos,
    },
    /// The index answered, but the initiating entity was absent from
    /// its own chunk's member set — the "includes the caller itself"
    /// contract was violated.
    IndexInconsistent {
        /// The scanning entity.
        entity: EntityId,
        /// The chunk whose member set was missing it.
        chunk: ChunkPos,
    },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChunkUnloaded { chunk } => {
                write!(f, "chunk {chunk} is not loaded")
            }
            Self::IndexInconsistent { entity, chunk } => {
                write!(f, "entity {entity} missing from its own chunk {chunk}")
            }
        }
    }
}

impl Error for ScanError {}

impl From<SpaceError> for ScanError {
    fn from(err: SpaceError) -> Self {
        match err {
            SpaceError::ChunkUnloaded { chunk } => Self::ChunkUnloaded { chunk },
        }
    }
}

// ── MergeRecord ────────────────────────────────────────────────────

/// One committed merge, as reported in the tick report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeRecord {
    /// The initiator, which absorbed the candidate.
    pub survivor: EntityId,
    /// The candidate removed from the world.
    pub absorbed: EntityId,
    /// The stack the survivor carries after this merge.
    pub result: ItemStack,
}

// ── The sweep ──────────────────────────────────────────────────────

impl World {
    /// Run one merge scan for `id` at `now`.
    ///
    /// Returns the merges committed by this scan. An entity that was
    /// absorbed earlier in the same tick scans as a no-op.
    pub(crate) fn merge_scan(
        &mut self,
        id: EntityId,
        now: TickTime,
        metrics: &mut TickMetrics,
    ) -> Result<Vec<MergeRecord>, ScanError> {
        // Gate phase. Order matters: the cheap flag checks first, the
        // shared cooldown last, and the merge-check stamp is recorded
        // once per qualifying tick, before any candidate is evaluated.
        let chunk = {
            let Some(entity) = self.items.get_mut(&id) else {
                // Absorbed or despawned earlier this tick.
                return Ok(Vec::new());
            };
            if !entity.is_mergeable() || !entity.is_pickable(now) {
                metrics.scans_ineligible += 1;
                return Ok(Vec::new());
            }
            if !self.cooldown.gate_passes(now, entity.last_merge_check()) {
                metrics.scans_throttled += 1;
                return Ok(Vec::new());
            }
            entity.stamp_merge_check(now);
            entity.position().chunk()
        };
        metrics.scans_run += 1;

        // Snapshot the chunk's member set before any mutation, so that
        // removing an absorbed candidate cannot corrupt or skip the
        // remaining candidates of this same enumeration.
        let members = self.index.entities_in(chunk)?;
        if !members.contains(&id) {
            return Err(ScanError::IndexInconsistent { entity: id, chunk });
        }
        let candidates: SmallVec<[EntityId; 16]> = members.iter().copied().collect();

        let mut merges = Vec::new();
        for candidate_id in candidates {
            // Do not merge with itself.
            if candidate_id == id {
                continue;
            }
            metrics.candidates_seen += 1;

            let proposed = {
                let initiator = self
                    .items
                    .get(&id)
                    .expect("initiator survives its own scan");
                // Not an item entity (a blocker), or absorbed by an
                // earlier pair of this same scan.
                let Some(candidate) = self.items.get(&candidate_id) else {
                    continue;
                };
                if !candidate.is_pickable(now) || !candidate.is_mergeable() {
                    continue;
                }
                // Too far. The range is the initiator's: a candidate
                // with a larger range of its own is still out of reach.
                if initiator.position().distance_to(candidate.position())
                    > initiator.merge_range()
                {
                    continue;
                }
                if !self.rule.can_be_stacked(initiator.stack(), candidate.stack()) {
                    continue;
                }
                // Cap check. An unrepresentable total is rejected the
                // same way as one over the cap: never truncated, never
                // wrapped.
                let Some(total) = self
                    .rule
                    .amount(initiator.stack())
                    .checked_add(self.rule.amount(candidate.stack()))
                else {
                    continue;
                };
                if !self.rule.can_apply(initiator.stack(), total) {
                    continue;
                }
                self.rule.apply(initiator.stack(), total)
            };

            // The proposed outcome is fully determined before the event
            // is raised; observers see a concrete result.
            let event = MergeEvent {
                initiator: id,
                absorbed: candidate_id,
                result: proposed,
            };
            match dispatch(&mut self.observers, event) {
                MergeVerdict::Approved(result) => {
                    self.items
                        .get_mut(&id)
                        .expect("initiator survives its own scan")
                        .set_stack(result);
                    self.remove(candidate_id);
                    metrics.merges_committed += 1;
                    merges.push(MergeRecord {
                        survivor: id,
                        absorbed: candidate_id,
                        result,
                    });
                }
                MergeVerdict::Vetoed { .. } => {
                    // A veto cancels this pair only; the scan moves on
                    // to the next candidate in the same tick.
                    metrics.merges_vetoed += 1;
                }
            }
        }

        Ok(merges)
    }
}
