//! Shortest-path queries over the block-edge graph.
//!
//! Three related traversals share one breadth-first core: distance labeling,
//! layered path counting, and exhaustive enumeration of the shortest paths
//! themselves. Counting and enumeration both expand only along edges that
//! step from one BFS layer into the very next one; those are exactly the
//! edges lying on some shortest path from the source.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::graph::{vertex_key, Graph, VertexKey};
use crate::world::Point;

/// Result of a shortest-distance-and-count query.
///
/// `distance` is `None` when an endpoint does not land on a graph vertex or
/// the endpoints are disconnected; `count` is 0 in that case. Counts use
/// `u128`: they grow multinomially with structure size, and `u64` would
/// already overflow on a solid structure around 20 blocks per axis.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PathCount {
    /// Shortest distance in edge-hops, or `None` if unreachable.
    pub distance: Option<u32>,
    /// Number of distinct shortest paths.
    pub count: u128,
}

impl PathCount {
    /// The outcome for missing endpoints or disconnected structures.
    pub const UNREACHABLE: Self = Self {
        distance: None,
        count: 0,
    };
}

/// Computes the shortest distance between two corner points and the number
/// of distinct shortest paths between them.
///
/// An endpoint that does not quantize onto an existing vertex is a normal
/// incomplete-selection outcome, reported as `UNREACHABLE`, never an error.
pub fn shortest_path_count(graph: &Graph, a: Point, b: Point) -> PathCount {
    let start = vertex_key(a);
    let end = vertex_key(b);
    if !graph.vertices.contains_key(&start) || !graph.vertices.contains_key(&end) {
        return PathCount::UNREACHABLE;
    }

    let mut dist: FxHashMap<VertexKey, u32> = FxHashMap::default();
    let mut count: FxHashMap<VertexKey, u128> = FxHashMap::default();
    let mut queue = VecDeque::new();
    dist.insert(start, 0);
    count.insert(start, 1);
    queue.push_back(start);

    while let Some(u) = queue.pop_front() {
        let d = dist[&u];
        let routes_through_u = count[&u];
        let Some(neighbors) = graph.adjacency.get(&u) else {
            continue;
        };
        for &v in neighbors {
            match dist.get(&v) {
                None => {
                    dist.insert(v, d + 1);
                    count.insert(v, routes_through_u);
                    queue.push_back(v);
                }
                // cross-edge into the next BFS layer: v is reached by
                // another shortest route, through u
                Some(&dv) if dv == d + 1 => {
                    *count.entry(v).or_insert(0) += routes_through_u;
                }
                // back-edges and same-layer edges never extend a shortest path
                Some(_) => {}
            }
        }
    }

    match dist.get(&end) {
        Some(&d) => PathCount {
            distance: Some(d),
            count: count[&end],
        },
        None => PathCount::UNREACHABLE,
    }
}

/// BFS distance labels for every vertex reachable from `start`.
fn bfs_distances(graph: &Graph, start: VertexKey) -> FxHashMap<VertexKey, u32> {
    let mut dist = FxHashMap::default();
    let mut queue = VecDeque::new();
    dist.insert(start, 0);
    queue.push_back(start);

    while let Some(u) = queue.pop_front() {
        let d = dist[&u];
        let Some(neighbors) = graph.adjacency.get(&u) else {
            continue;
        };
        for &v in neighbors {
            if !dist.contains_key(&v) {
                dist.insert(v, d + 1);
                queue.push_back(v);
            }
        }
    }

    dist
}

/// Enumerates every shortest path from `a` to `b`, each as the ordered list
/// of actual corner positions from one endpoint to the other.
///
/// Labels the graph with a distance-only BFS, then walks the shortest-path
/// DAG with an explicit backtracking stack: each frame holds one vertex's
/// next-layer neighbors and a resume index, and the shared path buffer is
/// restored when a frame is exhausted so sibling branches never see stale
/// state. Output size is (number of paths) x (path length); bounding that is
/// the caller's concern.
pub fn all_shortest_paths(graph: &Graph, a: Point, b: Point) -> Vec<Vec<Point>> {
    let start = vertex_key(a);
    let end = vertex_key(b);
    if !graph.vertices.contains_key(&start) || !graph.vertices.contains_key(&end) {
        return Vec::new();
    }

    if start == end {
        return vec![vec![graph.vertices[&start]]];
    }

    let dist = bfs_distances(graph, start);
    if !dist.contains_key(&end) {
        return Vec::new();
    }

    struct Frame {
        next_layer: Vec<VertexKey>,
        resume: usize,
    }

    let next_layer_of = |u: VertexKey| -> Vec<VertexKey> {
        let du = dist[&u];
        graph
            .adjacency
            .get(&u)
            .map(|neighbors| {
                neighbors
                    .iter()
                    .copied()
                    .filter(|n| dist.get(n) == Some(&(du + 1)))
                    .collect()
            })
            .unwrap_or_default()
    };

    let mut paths = Vec::new();
    let mut path = vec![start];
    let mut stack = vec![Frame {
        next_layer: next_layer_of(start),
        resume: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(&v) = frame.next_layer.get(frame.resume) else {
            // frame exhausted: backtrack
            stack.pop();
            path.pop();
            continue;
        };
        frame.resume += 1;

        path.push(v);
        if v == end {
            paths.push(path.iter().map(|key| graph.vertices[key]).collect());
            path.pop();
        } else {
            stack.push(Frame {
                next_layer: next_layer_of(v),
                resume: 0,
            });
        }
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use crate::world::World;

    /// A single cube resting on the ground at the origin column.
    fn single_cube() -> Graph {
        let mut world = World::new();
        world.place_at(0, 0);
        build_graph(world.blocks())
    }

    /// A 1-wide row of `n` cubes along the x axis.
    fn row(n: i32) -> Graph {
        let mut world = World::new();
        for x in 0..n {
            world.place_at(x, 0);
        }
        build_graph(world.blocks())
    }

    /// Sorted quantized forms of a path list, for order-insensitive comparison.
    fn normalized(paths: &[Vec<Point>]) -> Vec<Vec<VertexKey>> {
        let mut keys: Vec<Vec<VertexKey>> = paths
            .iter()
            .map(|path| path.iter().map(|&p| vertex_key(p)).collect())
            .collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn test_single_cube_edge() {
        let graph = single_cube();
        let result = shortest_path_count(&graph, (-0.5, 0.0, -0.5), (0.5, 0.0, -0.5));
        assert_eq!(result.distance, Some(1));
        assert_eq!(result.count, 1);
    }

    #[test]
    fn test_single_cube_face_diagonal() {
        // two routes around the face
        let graph = single_cube();
        let result = shortest_path_count(&graph, (-0.5, 0.0, -0.5), (0.5, 1.0, -0.5));
        assert_eq!(result.distance, Some(2));
        assert_eq!(result.count, 2);
    }

    #[test]
    fn test_single_cube_body_diagonal() {
        // 3! orderings of the three edge axes
        let graph = single_cube();
        let result = shortest_path_count(&graph, (-0.5, 0.0, -0.5), (0.5, 1.0, 0.5));
        assert_eq!(result.distance, Some(3));
        assert_eq!(result.count, 6);
    }

    #[test]
    fn test_coincident_endpoints() {
        let graph = single_cube();
        let a = (-0.5, 0.0, -0.5);
        assert_eq!(
            shortest_path_count(&graph, a, a),
            PathCount {
                distance: Some(0),
                count: 1
            }
        );
        assert_eq!(all_shortest_paths(&graph, a, a), vec![vec![a]]);
    }

    #[test]
    fn test_missing_endpoint_is_unreachable_not_an_error() {
        let graph = single_cube();
        let off_grid = (7.25, 0.0, 0.0);
        assert_eq!(
            shortest_path_count(&graph, (-0.5, 0.0, -0.5), off_grid),
            PathCount::UNREACHABLE
        );
        assert!(all_shortest_paths(&graph, (-0.5, 0.0, -0.5), off_grid).is_empty());
    }

    #[test]
    fn test_disconnected_structures() {
        let mut world = World::new();
        world.place_at(0, 0);
        world.place_at(5, 5);
        let graph = build_graph(world.blocks());

        let a = (-0.5, 0.0, -0.5);
        let b = (4.5, 0.0, 4.5);
        assert_eq!(shortest_path_count(&graph, a, b), PathCount::UNREACHABLE);
        assert!(all_shortest_paths(&graph, a, b).is_empty());
    }

    #[test]
    fn test_empty_graph() {
        let graph = build_graph(&[]);
        let result = shortest_path_count(&graph, (0.5, 0.5, 0.5), (1.5, 0.5, 0.5));
        assert_eq!(result, PathCount::UNREACHABLE);
    }

    #[test]
    fn test_count_matches_enumeration() {
        let mut world = World::new();
        for x in 0..3 {
            for z in 0..2 {
                world.place_at(x, z);
            }
        }
        world.place_at(0, 0); // one extra block stacked on a corner column
        let graph = build_graph(world.blocks());

        let a = (-0.5, 0.0, -0.5);
        let b = (2.5, 1.0, 1.5);
        let result = shortest_path_count(&graph, a, b);
        let paths = all_shortest_paths(&graph, a, b);

        assert_eq!(result.count, paths.len() as u128);
        let distance = result.distance.unwrap();
        for path in &paths {
            assert_eq!(path.len() as u32, distance + 1);
            assert_eq!(vertex_key(path[0]), vertex_key(a));
            assert_eq!(vertex_key(path[path.len() - 1]), vertex_key(b));
        }
    }

    #[test]
    fn test_enumerated_paths_step_along_single_edges() {
        let graph = single_cube();
        let paths = all_shortest_paths(&graph, (-0.5, 0.0, -0.5), (0.5, 1.0, 0.5));
        assert_eq!(paths.len(), 6);

        for path in &paths {
            for pair in path.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let step = (a.0 - b.0).abs() + (a.1 - b.1).abs() + (a.2 - b.2).abs();
                assert!((step - 1.0).abs() < 1e-5, "non-edge step in {path:?}");
            }
        }
    }

    #[test]
    fn test_symmetry() {
        let mut world = World::new();
        world.place_at(0, 0);
        world.place_at(1, 0);
        world.place_at(1, 1);
        let graph = build_graph(world.blocks());

        let a = (-0.5, 0.0, -0.5);
        let b = (1.5, 1.0, 1.5);
        let forward = shortest_path_count(&graph, a, b);
        let backward = shortest_path_count(&graph, b, a);
        assert_eq!(forward, backward);

        let mut reversed = all_shortest_paths(&graph, a, b);
        for path in &mut reversed {
            path.reverse();
        }
        assert_eq!(
            normalized(&reversed),
            normalized(&all_shortest_paths(&graph, b, a))
        );
    }

    #[test]
    fn test_row_has_single_route_along_its_edge_chain() {
        // a 1-wide strip admits no alternate route between the two ends of a
        // straight edge chain: the over-counting boundary check
        for n in [1, 4, 9] {
            let graph = row(n);
            let a = (-0.5, 0.0, -0.5);
            let b = (n as f32 - 0.5, 0.0, -0.5);
            let result = shortest_path_count(&graph, a, b);
            assert_eq!(result.distance, Some(n as u32));
            assert_eq!(result.count, 1);
            assert_eq!(all_shortest_paths(&graph, a, b).len(), 1);
        }
    }

    #[test]
    fn test_row_diagonal_agreement() {
        let n = 5;
        let graph = row(n);
        let a = (-0.5, 0.0, -0.5);
        let b = (n as f32 - 0.5, 1.0, 0.5);
        let result = shortest_path_count(&graph, a, b);
        let paths = all_shortest_paths(&graph, a, b);
        assert_eq!(result.distance, Some(n as u32 + 2));
        assert_eq!(result.count, paths.len() as u128);
    }
}
