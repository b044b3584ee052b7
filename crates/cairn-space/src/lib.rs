//! Spatial partitioning for Cairn simulations.
//!
//! This crate defines world [`Position`]s, the [`ChunkPos`] partition
//! coordinates they map onto, and the [`ChunkIndex`] — the membership
//! index the merge sweep queries for "entities near a point".
//!
//! # Partition locality
//!
//! All neighbor queries are chunk-local: a query returns the entities of
//! exactly one chunk, never of its neighbors. This bounds the cost of a
//! merge scan to the population of one partition regardless of world
//! size, and is a contract the engine relies on — merges never cross
//! chunk boundaries, even when two entities are geometrically close.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod index;
pub mod pos;

pub use error::SpaceError;
pub use index::ChunkIndex;
pub use pos::{ChunkPos, Position, CHUNK_SIZE};
