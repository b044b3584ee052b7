//! Entity storage and the tick driver.
//!
//! [`World`] owns all simulation state and advances it synchronously:
//! each [`tick()`](World::tick) call runs the despawn sweep and then one
//! merge scan per item entity, committing merges as it goes. One
//! entity's scan completes — including any commits — before the next
//! entity's scan begins; nothing blocks, suspends, or runs on a
//! background thread.
//!
//! # Ownership model
//!
//! `World` is [`Send`] (can be moved between threads) but is driven from
//! exactly one place: all mutating methods take `&mut self`. External
//! control surfaces share only the [`MergeCooldown`] cell, which is
//! safe to retune from anywhere at any time.

use std::error::Error;
use std::fmt;

use cairn_core::{EntityId, ItemStack, MergeObserver, StackingRule, TickTime};
use cairn_space::{ChunkIndex, ChunkPos, Position};
use indexmap::IndexMap;

use crate::config::{ConfigError, WorldConfig};
use crate::cooldown::MergeCooldown;
use crate::entity::ItemEntity;
use crate::merge::{MergeRecord, ScanError};
use crate::metrics::TickMetrics;

// Compile-time assertion: World is Send (movable into a driver thread).
// Fails to compile if any field is !Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<World>();
    }
};

// ── TickReport ─────────────────────────────────────────────────────

/// Result of a successful [`World::tick()`] call.
#[derive(Debug)]
pub struct TickReport {
    /// Counters for this tick.
    pub metrics: TickMetrics,
    /// Merges committed this tick, in commit order.
    pub merges: Vec<MergeRecord>,
    /// Item entities removed by the despawn sweep this tick.
    pub despawned: Vec<EntityId>,
}

// ── TickError ──────────────────────────────────────────────────────

/// Error returned from [`World::tick()`].
///
/// Identifies the entity whose scan hit a collaborator fault. Merges
/// committed by earlier entities in the same tick stand; the failing
/// entity's scan performed no partial mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickError {
    /// The entity whose scan failed.
    pub entity: EntityId,
    /// The underlying fault.
    pub source: ScanError,
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "merge scan for entity {} failed: {}", self.entity, self.source)
    }
}

impl Error for TickError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

// ── World ──────────────────────────────────────────────────────────

/// A simulation world of ground items.
///
/// Created from a [`WorldConfig`] via [`new()`](World::new). The world
/// stores item entities and *blockers* (non-item entities — players,
/// mobs — that occupy chunk space but are opaque to this core), keeps
/// the chunk index in step with every spawn, move, and removal, and
/// drives the merge decision sweep.
///
/// # Example
///
/// ```
/// use cairn_core::{ItemKind, ItemStack, TickTime};
/// use cairn_engine::{World, WorldConfig};
/// use cairn_space::Position;
///
/// let mut world = World::new(WorldConfig {
///     merge_cooldown: None,
///     ..WorldConfig::default()
/// })
/// .unwrap();
/// world.spawn_item(ItemStack::new(ItemKind(1), 3), Position::new(0.5, 0.0, 0.5), TickTime(0));
/// world.spawn_item(ItemStack::new(ItemKind(1), 5), Position::new(1.0, 0.0, 0.5), TickTime(0));
///
/// let report = world.tick(TickTime(50)).unwrap();
/// assert_eq!(report.merges.len(), 1);
/// assert_eq!(world.item_count(), 1);
/// ```
pub struct World {
    pub(crate) items: IndexMap<EntityId, ItemEntity>,
    pub(crate) blockers: IndexMap<EntityId, Position>,
    pub(crate) index: ChunkIndex,
    pub(crate) observers: Vec<Box<dyn MergeObserver>>,
    pub(crate) rule: Box<dyn StackingRule>,
    pub(crate) cooldown: MergeCooldown,
    despawn_age_ms: Option<u64>,
}

impl World {
    /// Create a world from a [`WorldConfig`].
    ///
    /// Validates the configuration and consumes it.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            items: IndexMap::new(),
            blockers: IndexMap::new(),
            index: ChunkIndex::new(),
            observers: Vec::new(),
            rule: config.stacking_rule,
            cooldown: MergeCooldown::new(config.merge_cooldown),
            despawn_age_ms: config
                .despawn_age
                .map(|age| u64::try_from(age.as_millis()).unwrap_or(u64::MAX)),
        })
    }

    /// Spawn a new item entity carrying `stack` at `position`.
    ///
    /// Records `now` as the entity's spawn time and indexes it.
    ///
    /// # Panics
    ///
    /// Panics if `stack` is empty (see [`ItemEntity::new`]).
    pub fn spawn_item(&mut self, stack: ItemStack, position: Position, now: TickTime) -> EntityId {
        self.insert_item(ItemEntity::new(stack, position), now)
    }

    /// Spawn a pre-configured item entity (custom range, delay, flags).
    ///
    /// The spawn time is recorded exactly once: an entity that was
    /// already spawned elsewhere keeps its original timestamp.
    pub fn insert_item(&mut self, mut entity: ItemEntity, now: TickTime) -> EntityId {
        entity.mark_spawned(now);
        let id = entity.id();
        self.index.insert(id, entity.position().chunk());
        self.items.insert(id, entity);
        id
    }

    /// Register a non-item entity occupying chunk space.
    ///
    /// Blockers appear in chunk member sets — and are skipped by every
    /// merge scan's "not an item entity" filter — but are otherwise
    /// opaque to this core.
    pub fn spawn_blocker(&mut self, position: Position) -> EntityId {
        let id = EntityId::next();
        self.index.insert(id, position.chunk());
        self.blockers.insert(id, position);
        id
    }

    /// Excise an entity from the simulation.
    ///
    /// Idempotent: returns `false` if the entity is already gone. The
    /// merge sweep calls this exactly once per merged-away candidate.
    pub fn remove(&mut self, id: EntityId) -> bool {
        if let Some(entity) = self.items.swap_remove(&id) {
            self.index.remove(id, entity.position().chunk());
            return true;
        }
        if let Some(position) = self.blockers.swap_remove(&id) {
            self.index.remove(id, position.chunk());
            return true;
        }
        false
    }

    /// Move an item entity, keeping the chunk index in step.
    ///
    /// Returns `false` if the entity does not exist.
    pub fn move_item(&mut self, id: EntityId, position: Position) -> bool {
        let Some(entity) = self.items.get_mut(&id) else {
            return false;
        };
        let from = entity.position().chunk();
        entity.set_position(position);
        self.index.relocate(id, from, position.chunk());
        true
    }

    /// Borrow an item entity.
    pub fn item(&self, id: EntityId) -> Option<&ItemEntity> {
        self.items.get(&id)
    }

    /// Mutably borrow an item entity.
    ///
    /// Positions cannot be changed through this borrow — use
    /// [`move_item`](World::move_item), which maintains the index.
    pub fn item_mut(&mut self, id: EntityId) -> Option<&mut ItemEntity> {
        self.items.get_mut(&id)
    }

    /// Iterate the item entities in storage order.
    pub fn items(&self) -> impl Iterator<Item = &ItemEntity> {
        self.items.values()
    }

    /// Number of item entities alive.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Whether any entity (item or blocker) with this ID is alive.
    pub fn contains(&self, id: EntityId) -> bool {
        self.items.contains_key(&id) || self.blockers.contains_key(&id)
    }

    /// The shared cooldown cell. Clone the handle to hand a control
    /// surface live retuning access.
    pub fn cooldown(&self) -> &MergeCooldown {
        &self.cooldown
    }

    /// The stacking rule consulted by every merge scan.
    pub fn stacking_rule(&self) -> &dyn StackingRule {
        self.rule.as_ref()
    }

    /// Register a merge observer. Observers are consulted in
    /// registration order on every proposed merge.
    pub fn add_observer(&mut self, observer: Box<dyn MergeObserver>) {
        self.observers.push(observer);
    }

    /// The chunk index.
    pub fn index(&self) -> &ChunkIndex {
        &self.index
    }

    /// Mutable access to the chunk index.
    ///
    /// The index is an external collaborator: the world maintains it
    /// through its own operations, but an embedder integrating an outer
    /// entity layer may mutate it directly. The merge sweep verifies
    /// the index's contract on every scan and surfaces violations as
    /// [`TickError`] rather than scanning against inconsistent state.
    pub fn index_mut(&mut self) -> &mut ChunkIndex {
        &mut self.index
    }

    /// Unload a chunk, despawning every entity inside it.
    ///
    /// Returns the despawned entity IDs.
    pub fn unload_chunk(&mut self, chunk: ChunkPos) -> Vec<EntityId> {
        let evicted = self.index.unload(chunk);
        for id in &evicted {
            self.items.swap_remove(id);
            self.blockers.swap_remove(id);
        }
        evicted
    }

    /// Run one item entity's merge scan outside the full sweep.
    ///
    /// This is the per-entity operation [`tick()`](World::tick) runs
    /// for every item; an embedder driving entity updates itself can
    /// call it directly. The usual gates apply — mergeable, pickable,
    /// and the shared cooldown — and an unknown or non-item ID is a
    /// no-op. The despawn sweep is not part of this call.
    pub fn tick_entity(
        &mut self,
        id: EntityId,
        now: TickTime,
    ) -> Result<Vec<MergeRecord>, TickError> {
        let mut metrics = TickMetrics::default();
        self.merge_scan(id, now, &mut metrics)
            .map_err(|source| TickError { entity: id, source })
    }

    /// Advance the simulation by one tick.
    ///
    /// Runs the despawn sweep, then one merge scan per surviving item
    /// entity (snapshot of IDs at sweep start, storage order). A
    /// collaborator fault aborts the tick at the failing entity; see
    /// [`TickError`].
    pub fn tick(&mut self, now: TickTime) -> Result<TickReport, TickError> {
        let mut metrics = TickMetrics::default();

        // Despawn sweep. Skipped entirely when ageing is disabled.
        let mut despawned = Vec::new();
        if let Some(age_limit) = self.despawn_age_ms {
            let expired: Vec<EntityId> = self
                .items
                .iter()
                .filter(|(_, entity)| entity.age_ms(now) >= age_limit)
                .map(|(id, _)| *id)
                .collect();
            for id in expired {
                self.remove(id);
                despawned.push(id);
            }
            metrics.items_despawned = despawned.len() as u64;
        }

        // Merge sweep over a snapshot of the surviving IDs. Entities
        // absorbed mid-sweep scan as no-ops when their turn comes.
        let ids: Vec<EntityId> = self.items.keys().copied().collect();
        metrics.items_ticked = ids.len() as u64;

        let mut merges = Vec::new();
        for id in ids {
            match self.merge_scan(id, now, &mut metrics) {
                Ok(mut committed) => merges.append(&mut committed),
                Err(source) => return Err(TickError { entity: id, source }),
            }
        }

        Ok(TickReport {
            metrics,
            merges,
            despawned,
        })
    }
}
