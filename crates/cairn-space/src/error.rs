//! Error types for spatial queries.

use crate::pos::ChunkPos;
use std::fmt;

/// Errors arising from chunk index queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// The queried chunk has no member set — it was never loaded, or it
    /// has been unloaded since.
    ChunkUnloaded {
        /// The offending chunk.
        chunk: ChunkPos,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChunkUnloaded { chunk } => {
                write!(f, "chunk {chunk} is not loaded")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
