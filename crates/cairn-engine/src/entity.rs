//! The ground-item entity.

use std::time::Duration;

use cairn_core::{EntityId, ItemStack, TickTime};
use cairn_space::Position;

/// A dropped stack of items lying in the world.
///
/// An item entity owns its stack exclusively; merging replaces the
/// stack wholesale and never mutates it in place. The entity becomes
/// *spawned* exactly once, when the world inserts it into the active
/// simulation, and is destroyed either by pickup (an external
/// collaborator) or by being absorbed into another item entity through
/// a committed merge.
#[derive(Debug, Clone)]
pub struct ItemEntity {
    id: EntityId,
    position: Position,
    stack: ItemStack,
    pickable: bool,
    mergeable: bool,
    merge_range: f64,
    spawn_time: Option<TickTime>,
    pickup_delay_ms: u64,
    last_merge_check: TickTime,
}

impl ItemEntity {
    /// Create an item entity carrying `stack` at `position`.
    ///
    /// The entity starts pickable and mergeable, with a merge range of
    /// 1.0 world units, no pickup delay, and no spawn time — the world
    /// records the spawn time when the entity enters the simulation.
    ///
    /// # Panics
    ///
    /// Panics if `stack` is empty. An active entity must always carry
    /// items; a missing payload is a precondition violation caught
    /// here, at construction, rather than tolerated mid-scan.
    pub fn new(stack: ItemStack, position: Position) -> Self {
        assert!(!stack.is_empty(), "item entity requires a non-empty stack");
        Self {
            id: EntityId::next(),
            position,
            stack,
            pickable: true,
            mergeable: true,
            merge_range: 1.0,
            spawn_time: None,
            pickup_delay_ms: 0,
            last_merge_check: TickTime::ZERO,
        }
    }

    /// This entity's unique ID.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Current world position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Relocation goes through the world so the chunk index stays in
    /// step with the position.
    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// The stack on the ground.
    pub fn stack(&self) -> &ItemStack {
        &self.stack
    }

    /// Replace the stack on the ground.
    ///
    /// # Panics
    ///
    /// Panics if `stack` is empty, for the same reason as
    /// [`ItemEntity::new`].
    pub fn set_stack(&mut self, stack: ItemStack) {
        assert!(!stack.is_empty(), "item entity requires a non-empty stack");
        self.stack = stack;
    }

    /// The raw pickable flag, ignoring the pickup delay.
    pub fn pickable(&self) -> bool {
        self.pickable
    }

    /// Allow or forbid pickup (and with it, merge scanning).
    pub fn set_pickable(&mut self, pickable: bool) {
        self.pickable = pickable;
    }

    /// Whether the entity can currently be picked up.
    ///
    /// Derived, never cached: the pickable flag must be set *and* the
    /// pickup delay must have elapsed since spawn. An entity that has
    /// not yet spawned is not pickable. Merge scanning is gated on this
    /// same predicate, so an item still inside its pickup delay also
    /// does not scan for merges.
    pub fn is_pickable(&self, now: TickTime) -> bool {
        self.pickable
            && self
                .spawn_time
                .is_some_and(|spawned| now.saturating_since(spawned) >= self.pickup_delay_ms)
    }

    /// Whether the entity participates in merge scans.
    pub fn is_mergeable(&self) -> bool {
        self.mergeable
    }

    /// When set, nearby item entities with compatible stacks collapse
    /// into this one (and vice versa) as the world ticks.
    pub fn set_mergeable(&mut self, mergeable: bool) {
        self.mergeable = mergeable;
    }

    /// Maximum distance at which this entity absorbs candidates.
    ///
    /// Read from the scanning entity only: a candidate's own range
    /// plays no part in whether it is absorbed.
    pub fn merge_range(&self) -> f64 {
        self.merge_range
    }

    /// Change the merge range.
    pub fn set_merge_range(&mut self, merge_range: f64) {
        self.merge_range = merge_range;
    }

    /// Delay before the entity becomes pickable after spawning.
    pub fn pickup_delay(&self) -> Duration {
        Duration::from_millis(self.pickup_delay_ms)
    }

    /// Set the pickup delay. Stored with millisecond granularity.
    pub fn set_pickup_delay(&mut self, delay: Duration) {
        self.pickup_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
    }

    /// When the entity entered the active simulation, if it has.
    pub fn spawn_time(&self) -> Option<TickTime> {
        self.spawn_time
    }

    /// Milliseconds since spawn; zero until the entity has spawned.
    pub fn age_ms(&self, now: TickTime) -> u64 {
        self.spawn_time
            .map_or(0, |spawned| now.saturating_since(spawned))
    }

    /// Timestamp of the most recent merge scan attempt.
    ///
    /// Updated only when the cooldown gate passes and a scan actually
    /// runs — not on every tick, and not only on successful merges.
    pub fn last_merge_check(&self) -> TickTime {
        self.last_merge_check
    }

    /// Record the spawn time. First write wins: a second spawn of the
    /// same entity keeps the original timestamp.
    pub(crate) fn mark_spawned(&mut self, now: TickTime) {
        self.spawn_time.get_or_insert(now);
    }

    /// Stamp the merge-check timestamp for a qualifying tick.
    ///
    /// Invariant: monotonically non-decreasing, since simulation time
    /// itself never goes backwards.
    pub(crate) fn stamp_merge_check(&mut self, now: TickTime) {
        debug_assert!(now >= self.last_merge_check);
        self.last_merge_check = now;
    }
}
