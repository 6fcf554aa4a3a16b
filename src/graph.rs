//! Block-edge graph construction.
//!
//! Converts a block structure into an undirected, unweighted graph whose
//! nodes are cube corners and whose edges are cube edges. Corners shared by
//! face-adjacent or stacked blocks collapse to one node, which is what joins
//! neighboring blocks into a single walkable structure.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::world::{Block, Point, BLOCK_SIZE};

/// Quantized corner identity: each coordinate scaled by `KEY_SCALE` and
/// rounded to the nearest integer.
///
/// Grid corners sit on half-block positions, so distinct corners are at
/// least 50 key units apart and float jitter can never merge or split them.
pub type VertexKey = (i32, i32, i32);

/// Fixed-point scale for vertex keys (two decimal places of precision).
const KEY_SCALE: f32 = 100.0;

/// The 8 corner offsets of a unit cube relative to its center.
///
/// Index bit layout: bit 0 = +x, bit 1 = +y, bit 2 = +z. `CUBE_EDGES` below
/// depends on this ordering.
const CORNER_OFFSETS: [Point; 8] = [
    (-0.5, -0.5, -0.5),
    (0.5, -0.5, -0.5),
    (-0.5, 0.5, -0.5),
    (0.5, 0.5, -0.5),
    (-0.5, -0.5, 0.5),
    (0.5, -0.5, 0.5),
    (-0.5, 0.5, 0.5),
    (0.5, 0.5, 0.5),
];

/// The 12 cube edges as index pairs into `CORNER_OFFSETS`.
const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 3),
    (3, 2),
    (2, 0), // -z face ring
    (4, 5),
    (5, 7),
    (7, 6),
    (6, 4), // +z face ring
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7), // edges joining the two rings
];

/// Canonical key for a corner position.
pub fn vertex_key(point: Point) -> VertexKey {
    (
        (point.0 * KEY_SCALE).round() as i32,
        (point.1 * KEY_SCALE).round() as i32,
        (point.2 * KEY_SCALE).round() as i32,
    )
}

/// Corner-vertex graph of a block structure.
///
/// Rebuilt from scratch for every query and discarded afterwards; it is
/// never updated incrementally.
pub struct Graph {
    /// Canonical key to the first corner position observed for it.
    pub vertices: FxHashMap<VertexKey, Point>,
    /// Undirected adjacency, stored in both directions.
    pub adjacency: FxHashMap<VertexKey, FxHashSet<VertexKey>>,
}

/// Builds the corner graph for a set of blocks.
///
/// Duplicate blocks and shared faces are harmless: both the vertex map and
/// the adjacency sets deduplicate, so multiplicity never affects path
/// counting. An empty block set yields an empty graph.
pub fn build_graph(blocks: &[Block]) -> Graph {
    let mut vertices: FxHashMap<VertexKey, Point> = FxHashMap::default();
    let mut adjacency: FxHashMap<VertexKey, FxHashSet<VertexKey>> = FxHashMap::default();

    for block in blocks {
        let (cx, cy, cz) = block.center;

        let mut corner_keys = [(0, 0, 0); 8];
        for (index, &(ox, oy, oz)) in CORNER_OFFSETS.iter().enumerate() {
            let corner = (
                cx + ox * BLOCK_SIZE,
                cy + oy * BLOCK_SIZE,
                cz + oz * BLOCK_SIZE,
            );
            let key = vertex_key(corner);
            // first insertion wins; later corners with the same key agree to
            // within rounding tolerance
            vertices.entry(key).or_insert(corner);
            corner_keys[index] = key;
        }

        for &(i0, i1) in &CUBE_EDGES {
            adjacency
                .entry(corner_keys[i0])
                .or_default()
                .insert(corner_keys[i1]);
            adjacency
                .entry(corner_keys[i1])
                .or_default()
                .insert(corner_keys[i0]);
        }
    }

    Graph {
        vertices,
        adjacency,
    }
}
