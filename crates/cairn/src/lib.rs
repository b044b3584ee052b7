//! Cairn: a ground-item simulation core for tick-based game worlds.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Cairn sub-crates. For most users, adding `cairn` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use cairn::prelude::*;
//!
//! // A world that scans every tick (no cooldown) and never ages items.
//! let mut world = World::new(WorldConfig {
//!     merge_cooldown: None,
//!     despawn_age: None,
//!     ..WorldConfig::default()
//! })
//! .unwrap();
//!
//! // Two compatible stacks half a unit apart.
//! let a = world.spawn_item(ItemStack::new(ItemKind(1), 3), Position::new(0.5, 0.0, 0.5), TickTime(0));
//! let b = world.spawn_item(ItemStack::new(ItemKind(1), 5), Position::new(1.0, 0.0, 0.5), TickTime(0));
//!
//! // One tick later they have collapsed into a single entity of 8.
//! let report = world.tick(TickTime(50)).unwrap();
//! assert_eq!(report.merges.len(), 1);
//! assert_eq!(world.item(a).unwrap().stack().amount, 8);
//! assert!(world.item(b).is_none());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cairn-core` | IDs, simulation time, stacks, stacking rules, the merge-event protocol |
//! | [`space`] | `cairn-space` | Positions, chunk coordinates, the chunk index |
//! | [`engine`] | `cairn-engine` | The world, item entities, the merge sweep, cooldown, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`cairn-core`).
///
/// Contains [`types::ItemStack`], the [`types::StackingRule`] contract,
/// and the cancellable merge-event protocol
/// ([`types::MergeEvent`], [`types::MergeObserver`],
/// [`types::MergeVerdict`]).
pub use cairn_core as types;

/// Spatial partitioning (`cairn-space`).
///
/// Provides [`space::Position`], [`space::ChunkPos`], and the
/// [`space::ChunkIndex`] membership index.
pub use cairn_space as space;

/// The simulation engine (`cairn-engine`).
///
/// [`engine::World`] for entity storage and synchronous ticking,
/// [`engine::ItemEntity`] for per-item state, and
/// [`engine::MergeCooldown`] for the shared scan throttle.
pub use cairn_engine as engine;

/// Common imports for typical Cairn usage.
///
/// ```rust
/// use cairn::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use cairn_core::{
        EntityId, ItemKind, ItemStack, MergeDecision, MergeEvent, MergeObserver, MergeVerdict,
        StackingRule, TickTime, VanillaStackingRule,
    };

    // Space
    pub use cairn_space::{ChunkIndex, ChunkPos, Position, CHUNK_SIZE};

    // Engine
    pub use cairn_engine::{
        ConfigError, ItemEntity, MergeCooldown, MergeRecord, ScanError, TickError, TickMetrics,
        TickReport, World, WorldConfig,
    };
}
