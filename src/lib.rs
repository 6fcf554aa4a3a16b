//! Block Stacking Path Library
//!
//! Core functionality for the block-stacking sandbox: the stacked-block
//! world model with undo/redo, the cube-corner edge graph built from a
//! block snapshot, and shortest-path queries over that graph (distance,
//! number of distinct shortest paths, and full enumeration).

pub mod graph;
pub mod persistence;
pub mod solver;
pub mod world;

pub use graph::{build_graph, Graph, VertexKey};
pub use solver::{all_shortest_paths, shortest_path_count, PathCount};
pub use world::{Block, Point, World, BLOCK_SIZE};
