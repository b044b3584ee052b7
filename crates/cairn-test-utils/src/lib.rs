//! Test utilities and fixtures for Cairn development.
//!
//! Provides a [`TestWorldBuilder`] for constructing worlds with
//! test-friendly defaults (cooldown and ageing disabled), scripted
//! merge observers, and seeded item scattering for scenario and bench
//! setup.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod observers;

use std::time::Duration;

use cairn_core::{EntityId, ItemKind, ItemStack, TickTime, VanillaStackingRule};
use cairn_engine::{World, WorldConfig};
use cairn_space::{ChunkPos, Position, CHUNK_SIZE};
use rand::{Rng, RngExt, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A seeded RNG for reproducible scenario generation.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Builder for worlds preconfigured for tests.
///
/// Defaults differ from [`WorldConfig::default`]: the merge cooldown
/// and despawn ageing are *disabled*, so scenarios observe merge
/// behavior on every tick unless a test opts back in.
pub struct TestWorldBuilder {
    stack_cap: u32,
    merge_cooldown: Option<Duration>,
    despawn_age: Option<Duration>,
}

impl TestWorldBuilder {
    pub fn new() -> Self {
        Self {
            stack_cap: 64,
            merge_cooldown: None,
            despawn_age: None,
        }
    }

    /// Per-stack cap for the vanilla stacking rule.
    pub fn stack_cap(mut self, cap: u32) -> Self {
        self.stack_cap = cap;
        self
    }

    /// Enable the shared merge cooldown.
    pub fn merge_cooldown(mut self, cooldown: Duration) -> Self {
        self.merge_cooldown = Some(cooldown);
        self
    }

    /// Enable despawn ageing.
    pub fn despawn_age(mut self, age: Duration) -> Self {
        self.despawn_age = Some(age);
        self
    }

    pub fn build(self) -> World {
        World::new(WorldConfig {
            stacking_rule: Box::new(VanillaStackingRule::new(self.stack_cap)),
            merge_cooldown: self.merge_cooldown,
            despawn_age: self.despawn_age,
        })
        .expect("test world config is valid")
    }
}

impl Default for TestWorldBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Scatter `n` single-item stacks of `kind` uniformly inside `chunk`.
///
/// Positions are drawn from the caller's RNG — seed a
/// `rand_chacha::ChaCha8Rng` for reproducible scenarios.
pub fn scatter_items(
    world: &mut World,
    rng: &mut impl Rng,
    chunk: ChunkPos,
    n: usize,
    kind: ItemKind,
    now: TickTime,
) -> Vec<EntityId> {
    (0..n)
        .map(|_| {
            let position = Position::new(
                chunk.x as f64 * CHUNK_SIZE + rng.random_range(0.0..CHUNK_SIZE),
                0.0,
                chunk.z as f64 * CHUNK_SIZE + rng.random_range(0.0..CHUNK_SIZE),
            );
            world.spawn_item(ItemStack::new(kind, 1), position, now)
        })
        .collect()
}
