//! The chunk membership index.

use cairn_core::EntityId;
use indexmap::{IndexMap, IndexSet};

use crate::error::SpaceError;
use crate::pos::ChunkPos;

/// Membership index from chunks to the entities inside them.
///
/// The index does not know entity positions — the world tells it which
/// chunk an entity belongs to on insert, relocation, and removal, and
/// the index answers "who is in this chunk" queries. A chunk is *loaded*
/// from its first insert until [`unload`](ChunkIndex::unload) drops it;
/// querying an unloaded chunk is a contract violation surfaced as
/// [`SpaceError::ChunkUnloaded`] rather than an empty answer, so a
/// desynced caller cannot silently scan against nothing.
///
/// Backed by [`IndexMap`]/[`IndexSet`] for deterministic iteration
/// order. Removal uses `swap_remove`: O(1) and deterministic, though
/// not order-preserving.
#[derive(Debug, Default)]
pub struct ChunkIndex {
    chunks: IndexMap<ChunkPos, IndexSet<EntityId>>,
}

impl ChunkIndex {
    /// Create an empty index with no loaded chunks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity to a chunk's member set, loading the chunk on
    /// first use. Inserting an entity that is already a member is a
    /// no-op.
    pub fn insert(&mut self, entity: EntityId, chunk: ChunkPos) {
        self.chunks.entry(chunk).or_default().insert(entity);
    }

    /// Remove an entity from a chunk's member set.
    ///
    /// Idempotent: returns `false` if the entity was not a member (or
    /// the chunk is not loaded). The chunk itself stays loaded even
    /// when its member set becomes empty.
    pub fn remove(&mut self, entity: EntityId, chunk: ChunkPos) -> bool {
        match self.chunks.get_mut(&chunk) {
            Some(members) => members.swap_remove(&entity),
            None => false,
        }
    }

    /// Move an entity's membership between chunks.
    ///
    /// A same-chunk relocation is a no-op.
    pub fn relocate(&mut self, entity: EntityId, from: ChunkPos, to: ChunkPos) {
        if from == to {
            return;
        }
        self.remove(entity, from);
        self.insert(entity, to);
    }

    /// Every entity currently indexed in `chunk`, including the caller
    /// itself when the caller is a member.
    ///
    /// Returns [`SpaceError::ChunkUnloaded`] if the chunk has no member
    /// set.
    pub fn entities_in(&self, chunk: ChunkPos) -> Result<&IndexSet<EntityId>, SpaceError> {
        self.chunks
            .get(&chunk)
            .ok_or(SpaceError::ChunkUnloaded { chunk })
    }

    /// Whether `entity` is indexed in `chunk`.
    pub fn contains(&self, entity: EntityId, chunk: ChunkPos) -> bool {
        self.chunks
            .get(&chunk)
            .is_some_and(|members| members.contains(&entity))
    }

    /// Drop a chunk's member set, returning the evicted members.
    ///
    /// Unloading a chunk that was never loaded returns an empty list.
    pub fn unload(&mut self, chunk: ChunkPos) -> Vec<EntityId> {
        self.chunks
            .swap_remove(&chunk)
            .map(|members| members.into_iter().collect())
            .unwrap_or_default()
    }

    /// The loaded chunks, in load order.
    pub fn loaded_chunks(&self) -> impl Iterator<Item = ChunkPos> + '_ {
        self.chunks.keys().copied()
    }

    /// Number of entities indexed in `chunk`; zero when unloaded.
    pub fn population(&self, chunk: ChunkPos) -> usize {
        self.chunks.get(&chunk).map_or(0, IndexSet::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(x: i32, z: i32) -> ChunkPos {
        ChunkPos { x, z }
    }

    #[test]
    fn query_includes_the_caller_itself() {
        let mut index = ChunkIndex::new();
        let me = EntityId::next();
        index.insert(me, chunk(0, 0));
        let members = index.entities_in(chunk(0, 0)).unwrap();
        assert!(members.contains(&me));
    }

    #[test]
    fn unloaded_chunk_is_an_error_not_an_empty_answer() {
        let index = ChunkIndex::new();
        let err = index.entities_in(chunk(3, -2)).unwrap_err();
        assert_eq!(err, SpaceError::ChunkUnloaded { chunk: chunk(3, -2) });
    }

    #[test]
    fn chunk_stays_loaded_after_last_member_leaves() {
        let mut index = ChunkIndex::new();
        let e = EntityId::next();
        index.insert(e, chunk(0, 0));
        assert!(index.remove(e, chunk(0, 0)));
        assert!(index.entities_in(chunk(0, 0)).unwrap().is_empty());
    }

    #[test]
    fn remove_is_idempotent() {
        let mut index = ChunkIndex::new();
        let e = EntityId::next();
        index.insert(e, chunk(0, 0));
        assert!(index.remove(e, chunk(0, 0)));
        assert!(!index.remove(e, chunk(0, 0)));
        assert!(!index.remove(e, chunk(9, 9)));
    }

    #[test]
    fn relocate_moves_membership() {
        let mut index = ChunkIndex::new();
        let e = EntityId::next();
        index.insert(e, chunk(0, 0));
        index.relocate(e, chunk(0, 0), chunk(1, 0));
        assert!(!index.contains(e, chunk(0, 0)));
        assert!(index.contains(e, chunk(1, 0)));
    }

    #[test]
    fn unload_returns_the_evicted_members() {
        let mut index = ChunkIndex::new();
        let a = EntityId::next();
        let b = EntityId::next();
        index.insert(a, chunk(0, 0));
        index.insert(b, chunk(0, 0));
        let evicted = index.unload(chunk(0, 0));
        assert_eq!(evicted.len(), 2);
        assert!(evicted.contains(&a) && evicted.contains(&b));
        assert!(index.entities_in(chunk(0, 0)).is_err());
    }

    #[test]
    fn population_counts_members() {
        let mut index = ChunkIndex::new();
        assert_eq!(index.population(chunk(0, 0)), 0);
        index.insert(EntityId::next(), chunk(0, 0));
        index.insert(EntityId::next(), chunk(0, 0));
        assert_eq!(index.population(chunk(0, 0)), 2);
    }
}
