//! Benchmark profiles for the Cairn ground-item simulation.
//!
//! Provides pre-built world setups for benchmarking:
//!
//! - [`dense_chunk`]: one chunk populated with `n` compatible
//!   single-item entities, cooldown disabled — the worst case for a
//!   single merge sweep.
//! - [`throttled_chunk`]: the same population behind an unelapsed
//!   cooldown window, measuring gate-only cost.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::time::Duration;

use cairn_core::{ItemKind, TickTime};
use cairn_engine::World;
use cairn_space::ChunkPos;
use cairn_test_utils::{scatter_items, TestWorldBuilder};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Chunk used by every profile.
pub const BENCH_CHUNK: ChunkPos = ChunkPos { x: 0, z: 0 };

/// One chunk holding `n` compatible single-item entities, cooldown
/// disabled, positions seeded for reproducibility.
pub fn dense_chunk(seed: u64, n: usize) -> World {
    let mut world = TestWorldBuilder::new().build();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    scatter_items(
        &mut world,
        &mut rng,
        BENCH_CHUNK,
        n,
        ItemKind(1),
        TickTime(0),
    );
    world
}

/// Like [`dense_chunk`], but behind a cooldown window that has not
/// elapsed at the first tick, so every scan is throttled.
pub fn throttled_chunk(seed: u64, n: usize) -> World {
    let mut world = TestWorldBuilder::new()
        .merge_cooldown(Duration::from_millis(500))
        .build();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    scatter_items(
        &mut world,
        &mut rng,
        BENCH_CHUNK,
        n,
        ItemKind(1),
        TickTime(0),
    );
    world
}
