//! World positions and chunk coordinates.

use std::fmt;

/// Width of a chunk in world units along the x and z axes.
pub const CHUNK_SIZE: f64 = 16.0;

/// A location in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    /// East-west coordinate.
    pub x: f64,
    /// Vertical coordinate. Does not participate in partitioning.
    pub y: f64,
    /// North-south coordinate.
    pub z: f64,
}

impl Position {
    /// Create a position from its components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// The chunk this position falls in.
    ///
    /// Pure function of the position: two positions inside the same
    /// 16x16 column always map to the same [`ChunkPos`], and the
    /// boundary at a multiple of [`CHUNK_SIZE`] belongs to the higher
    /// chunk.
    pub fn chunk(&self) -> ChunkPos {
        ChunkPos {
            x: (self.x / CHUNK_SIZE).floor() as i32,
            z: (self.z / CHUNK_SIZE).floor() as i32,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// Coordinates of one spatial partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
    /// Chunk column along x.
    pub x: i32,
    /// Chunk column along z.
    pub z: i32,
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn chunk_of_origin_is_zero_zero() {
        assert_eq!(Position::new(0.0, 64.0, 0.0).chunk(), ChunkPos { x: 0, z: 0 });
    }

    #[test]
    fn chunk_boundary_belongs_to_the_higher_chunk() {
        assert_eq!(Position::new(15.999, 0.0, 0.0).chunk(), ChunkPos { x: 0, z: 0 });
        assert_eq!(Position::new(16.0, 0.0, 0.0).chunk(), ChunkPos { x: 1, z: 0 });
    }

    #[test]
    fn negative_coordinates_floor_toward_negative_chunks() {
        assert_eq!(Position::new(-0.5, 0.0, -0.5).chunk(), ChunkPos { x: -1, z: -1 });
        assert_eq!(Position::new(-16.0, 0.0, 0.0).chunk(), ChunkPos { x: -1, z: 0 });
    }

    #[test]
    fn y_does_not_affect_the_chunk() {
        let low = Position::new(3.0, -64.0, 3.0);
        let high = Position::new(3.0, 320.0, 3.0);
        assert_eq!(low.chunk(), high.chunk());
    }

    proptest! {
        #[test]
        fn distance_is_metric(
            ax in -512.0f64..512.0, az in -512.0f64..512.0,
            bx in -512.0f64..512.0, bz in -512.0f64..512.0,
            cx in -512.0f64..512.0, cz in -512.0f64..512.0,
        ) {
            let a = Position::new(ax, 0.0, az);
            let b = Position::new(bx, 0.0, bz);
            let c = Position::new(cx, 0.0, cz);

            // Reflexive
            prop_assert!(a.distance_to(&a).abs() < f64::EPSILON);
            // Symmetric
            prop_assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-9);
            // Triangle inequality
            prop_assert!(a.distance_to(&c) <= a.distance_to(&b) + b.distance_to(&c) + 1e-9);
        }

        #[test]
        fn offsets_inside_a_chunk_stay_in_that_chunk(
            cx in -100i32..100, cz in -100i32..100,
            ox in 0.0f64..15.999, oz in 0.0f64..15.999,
        ) {
            let p = Position::new(
                cx as f64 * CHUNK_SIZE + ox,
                0.0,
                cz as f64 * CHUNK_SIZE + oz,
            );
            prop_assert_eq!(p.chunk(), ChunkPos { x: cx, z: cz });
        }
    }
}
