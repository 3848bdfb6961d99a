//! Random spanning trees of grid graphs via randomized Prim's algorithm.
//!
//! Randomness comes from two sources: the start vertex is uniform, and the
//! underlying edge weights are a fresh random permutation. The result is the
//! minimum spanning tree for the realized weights, which is not a uniform
//! random spanning tree, but differs run to run.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::graph::{neighbor, Direction, GridGraph, DIRECTIONS};
use rand::Rng;

/// A spanning tree over the vertices of a grid graph, stored as a per-vertex
/// adjacency relation: connected, acyclic, exactly `rows * cols - 1` edges,
/// each present in both directions.
#[derive(Debug, Clone)]
pub struct SpanningTree {
    rows: usize,
    cols: usize,
    /// Row-major per-vertex adjacency, indexed by `Direction`.
    edges: Vec<[bool; 4]>,
}

impl SpanningTree {
    /// Computes a random spanning tree of the `rows x cols` grid graph.
    ///
    /// # Panics
    /// Panics if `rows < 2` or `cols < 2`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let graph = GridGraph::random(rows, cols, rng);
        Self::from_graph(&graph, rng)
    }

    /// Runs randomized Prim's algorithm over an existing weighted graph.
    ///
    /// The frontier is a min-heap keyed by the weight of the edge that could
    /// admit each vertex, with lazy deletion: a vertex may be pushed once per
    /// candidate edge, and stale entries for already-selected vertices are
    /// skipped on pop. Global weight uniqueness is what makes this enough:
    /// when a vertex is admitted at priority W, exactly one edge to a
    /// selected neighbor can carry weight W, and that edge is the one that
    /// admitted it.
    pub fn from_graph<R: Rng + ?Sized>(graph: &GridGraph, rng: &mut R) -> Self {
        let (rows, cols) = (graph.rows(), graph.cols());
        let mut tree = Self {
            rows,
            cols,
            edges: vec![[false; 4]; rows * cols],
        };
        let mut selected = vec![false; rows * cols];
        let mut frontier: BinaryHeap<Reverse<(u32, usize, usize)>> = BinaryHeap::new();

        let start_x = rng.random_range(0..cols);
        let start_y = rng.random_range(0..rows);
        frontier.push(Reverse((0, start_x, start_y)));

        while let Some(Reverse((weight, x, y))) = frontier.pop() {
            if selected[y * cols + x] {
                continue;
            }
            selected[y * cols + x] = true;

            for dir in DIRECTIONS {
                let Some((nx, ny)) = neighbor(x, y, dir, rows, cols) else {
                    continue;
                };
                let Some(w) = graph.edge_weight(x, y, dir) else {
                    continue;
                };
                if !selected[ny * cols + nx] {
                    frontier.push(Reverse((w, nx, ny)));
                } else if w == weight {
                    // The unique edge matching this vertex's pop priority is
                    // the edge that admitted it.
                    tree.record_edge(x, y, dir);
                }
            }
        }

        tree
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True if the tree contains the edge leaving `(x, y)` in `dir`. Edges to
    /// coordinates outside the grid are always absent.
    pub fn has_edge(&self, x: usize, y: usize, dir: Direction) -> bool {
        match neighbor(x, y, dir, self.rows, self.cols) {
            Some(_) => self.edges[y * self.cols + x][dir as usize],
            None => false,
        }
    }

    /// Records an edge in both directions.
    pub(crate) fn record_edge(&mut self, x: usize, y: usize, dir: Direction) {
        let (nx, ny) = neighbor(x, y, dir, self.rows, self.cols)
            .expect("tree edges stay inside the grid");
        self.edges[y * self.cols + x][dir as usize] = true;
        self.edges[ny * self.cols + nx][dir.opposite() as usize] = true;
    }

    #[cfg(test)]
    pub(crate) fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            edges: vec![[false; 4]; rows * cols],
        }
    }

    /// Undirected edge count.
    #[cfg(test)]
    pub(crate) fn edge_count(&self) -> usize {
        let directed: usize = self
            .edges
            .iter()
            .map(|dirs| dirs.iter().filter(|&&e| e).count())
            .sum();
        directed / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    /// Vertices reachable from (0, 0) through tree edges.
    fn reachable(tree: &SpanningTree) -> usize {
        let (rows, cols) = (tree.rows(), tree.cols());
        let mut visited = vec![false; rows * cols];
        let mut stack = vec![(0usize, 0usize)];
        visited[0] = true;
        let mut count = 0;
        while let Some((x, y)) = stack.pop() {
            count += 1;
            for dir in DIRECTIONS {
                if !tree.has_edge(x, y, dir) {
                    continue;
                }
                let (nx, ny) = neighbor(x, y, dir, rows, cols).unwrap();
                if !visited[ny * cols + nx] {
                    visited[ny * cols + nx] = true;
                    stack.push((nx, ny));
                }
            }
        }
        count
    }

    #[test]
    fn spans_every_vertex_with_minimal_edges() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        for (rows, cols) in [(2, 2), (3, 3), (4, 7), (10, 10)] {
            for _ in 0..5 {
                let tree = SpanningTree::random(rows, cols, &mut rng);
                assert_eq!(
                    tree.edge_count(),
                    rows * cols - 1,
                    "{}x{} tree must have v-1 edges",
                    rows,
                    cols
                );
                // Connected with v-1 edges, hence acyclic.
                assert_eq!(
                    reachable(&tree),
                    rows * cols,
                    "{}x{} tree must be connected",
                    rows,
                    cols
                );
            }
        }
    }

    #[test]
    fn edges_are_symmetric() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let tree = SpanningTree::random(5, 6, &mut rng);
        for y in 0..5 {
            for x in 0..6 {
                for dir in DIRECTIONS {
                    if let Some((nx, ny)) = neighbor(x, y, dir, 5, 6) {
                        assert_eq!(
                            tree.has_edge(x, y, dir),
                            tree.has_edge(nx, ny, dir.opposite())
                        );
                    } else {
                        assert!(!tree.has_edge(x, y, dir));
                    }
                }
            }
        }
    }

    #[test]
    fn same_seed_reproduces_tree() {
        let mut rng1 = ChaCha20Rng::seed_from_u64(11);
        let mut rng2 = ChaCha20Rng::seed_from_u64(11);
        let tree1 = SpanningTree::random(6, 6, &mut rng1);
        let tree2 = SpanningTree::random(6, 6, &mut rng2);
        for y in 0..6 {
            for x in 0..6 {
                for dir in DIRECTIONS {
                    assert_eq!(tree1.has_edge(x, y, dir), tree2.has_edge(x, y, dir));
                }
            }
        }
    }
}
