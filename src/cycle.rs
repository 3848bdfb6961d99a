//! Hamiltonian cycle synthesis by boundary tracing.
//!
//! A spanning tree is computed on the half-resolution grid, so every tree
//! vertex corresponds to a 2x2 block of full-resolution cells. Walking the
//! outline of the thickened tree with a right-hand wall-follower visits each
//! of those four cells exactly once per block, and crosses between blocks
//! exactly where the tree has no edge in the way. Because the tree is
//! connected and acyclic, its planar boundary is a single closed curve, and
//! the trace is a Hamiltonian cycle of the full grid.

use crate::graph::Direction;
use crate::prim::SpanningTree;
use rand::Rng;

/// One element of a Hamiltonian cycle: a grid coordinate and its position
/// along the tour. Indices are 0-based and dense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleNode {
    pub x: usize,
    pub y: usize,
    pub index: usize,
}

/// A closed tour visiting every cell of a `rows x cols` grid exactly once.
///
/// The ring is stored as a flat sequence in tour order; the successor of the
/// node at `index` is the node at `(index + 1) % len()`, so the last node
/// wraps back to the head without any self-referential links. Immutable once
/// constructed; build a fresh cycle for each new episode.
#[derive(Debug, Clone)]
pub struct HamiltonianCycle {
    rows: usize,
    cols: usize,
    nodes: Vec<CycleNode>,
}

impl HamiltonianCycle {
    /// Builds a random Hamiltonian cycle over the full `rows x cols` grid.
    ///
    /// # Panics
    /// Panics if `rows` or `cols` is odd or less than 4.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        assert!(rows >= 4 && cols >= 4, "grid must be at least 4x4");
        assert!(
            rows % 2 == 0 && cols % 2 == 0,
            "rows and cols must be even"
        );

        let tree = SpanningTree::random(rows / 2, cols / 2, rng);
        let start_x = rng.random_range(0..cols / 2);
        let start_y = rng.random_range(0..rows / 2);
        Self::trace(&tree, (start_x, start_y))
    }

    /// Traces the boundary of the thickened tree, starting at the top-right
    /// cell of the `start` block.
    ///
    /// The walk carries the current block `(px, py)` and two flags selecting
    /// the active cell within it: `up` (upper half) and `right` (right half).
    /// Each step moves one full-resolution cell right, left, down, or up,
    /// checked in that order against the tree edges around the block. A tree
    /// edge blocks the wall-follower from crossing; a missing edge lets it
    /// turn around the tree's outline.
    pub(crate) fn trace(tree: &SpanningTree, start: (usize, usize)) -> Self {
        let (rows, cols) = (tree.rows() * 2, tree.cols() * 2);
        let total = rows * cols;

        let (mut px, mut py) = start;
        let (mut up, mut right) = (true, true);

        let mut nodes = Vec::with_capacity(total);
        let mut visited = vec![false; total];
        let (sx, sy) = corner(px, py, up, right);
        emit(&mut nodes, &mut visited, rows, cols, sx, sy);

        while nodes.len() < total {
            let edge_up = tree.has_edge(px, py, Direction::Up);
            let edge_right = tree.has_edge(px, py, Direction::Right);
            let edge_down = tree.has_edge(px, py, Direction::Down);
            let edge_left = tree.has_edge(px, py, Direction::Left);

            let (cx, cy) = corner(px, py, up, right);
            if up && ((!right && !edge_up) || (right && edge_right)) {
                // move right
                emit(&mut nodes, &mut visited, rows, cols, cx + 1, cy);
                if right {
                    px += 1;
                }
                right = !right;
            } else if !up && ((right && !edge_down) || (!right && edge_left)) {
                // move left
                let nx = cx.checked_sub(1).expect("wall-follower stays in bounds");
                emit(&mut nodes, &mut visited, rows, cols, nx, cy);
                if !right {
                    px -= 1;
                }
                right = !right;
            } else if right {
                // move down
                emit(&mut nodes, &mut visited, rows, cols, cx, cy + 1);
                if !up {
                    py += 1;
                }
                up = !up;
            } else {
                // move up
                let ny = cy.checked_sub(1).expect("wall-follower stays in bounds");
                emit(&mut nodes, &mut visited, rows, cols, cx, ny);
                if up {
                    py -= 1;
                }
                up = !up;
            }
        }

        Self { rows, cols, nodes }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of nodes, always `rows * cols`.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Highest valid tour index, `len() - 1`.
    pub fn last_index(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Head of the ring (index 0).
    pub fn head(&self) -> &CycleNode {
        &self.nodes[0]
    }

    /// Node at `index`.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    pub fn node(&self, index: usize) -> &CycleNode {
        &self.nodes[index]
    }

    /// Ring successor of the node at `index`; the last node wraps to the
    /// head.
    pub fn successor(&self, index: usize) -> &CycleNode {
        &self.nodes[(index + 1) % self.nodes.len()]
    }

    /// Nodes in tour order.
    pub fn iter(&self) -> impl Iterator<Item = &CycleNode> {
        self.nodes.iter()
    }

    #[cfg(test)]
    pub(crate) fn from_coords(rows: usize, cols: usize, coords: &[(usize, usize)]) -> Self {
        let nodes = coords
            .iter()
            .enumerate()
            .map(|(index, &(x, y))| CycleNode { x, y, index })
            .collect();
        Self { rows, cols, nodes }
    }

    /// Test-only validity check: every grid cell appears exactly once and
    /// consecutive nodes (including the wrap) are grid-adjacent.
    #[cfg(test)]
    pub(crate) fn is_complete_tour(&self) -> bool {
        if self.nodes.len() != self.rows * self.cols {
            return false;
        }
        let mut seen = vec![false; self.rows * self.cols];
        for (i, node) in self.nodes.iter().enumerate() {
            if node.index != i || node.x >= self.cols || node.y >= self.rows {
                return false;
            }
            let cell = node.y * self.cols + node.x;
            if seen[cell] {
                return false;
            }
            seen[cell] = true;

            let next = self.successor(i);
            if node.x.abs_diff(next.x) + node.y.abs_diff(next.y) != 1 {
                return false;
            }
        }
        true
    }
}

/// Full-resolution cell at the corner of block `(px, py)` selected by the
/// `up`/`right` flags.
fn corner(px: usize, py: usize, up: bool, right: bool) -> (usize, usize) {
    let x = if right { 2 * px + 1 } else { 2 * px };
    let y = if up { 2 * py } else { 2 * py + 1 };
    (x, y)
}

/// Appends the next tour node, asserting the walk never leaves the grid or
/// revisits a cell; either would mean the tree-boundary logic is broken.
fn emit(
    nodes: &mut Vec<CycleNode>,
    visited: &mut [bool],
    rows: usize,
    cols: usize,
    x: usize,
    y: usize,
) {
    assert!(
        x < cols && y < rows,
        "wall-follower left the grid at ({}, {})",
        x,
        y
    );
    let cell = y * cols + x;
    assert!(
        !visited[cell],
        "wall-follower revisited ({}, {})",
        x,
        y
    );
    visited[cell] = true;
    nodes.push(CycleNode {
        x,
        y,
        index: nodes.len(),
    });
}

/// Coordinate to tour-index lookup over a completed cycle. Built once per
/// cycle, read-only afterward, O(1) per lookup.
#[derive(Debug, Clone)]
pub struct CycleIndexTable {
    cols: usize,
    indices: Vec<usize>,
}

impl CycleIndexTable {
    /// Builds the lookup by walking the ring once from the head.
    pub fn build(cycle: &HamiltonianCycle) -> Self {
        let mut indices = vec![0; cycle.len()];
        let mut node = cycle.head();
        loop {
            indices[node.y * cycle.cols() + node.x] = node.index;
            node = cycle.successor(node.index);
            if node.index == 0 {
                break;
            }
        }
        Self {
            cols: cycle.cols(),
            indices,
        }
    }

    /// Tour index of the cell at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinate lies outside the cycle's grid.
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        assert!(x < self.cols, "x {} out of bounds", x);
        self.indices[y * self.cols + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn traces_a_complete_tour() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        for (rows, cols) in [(4, 4), (4, 8), (6, 6), (10, 16), (30, 40)] {
            for _ in 0..3 {
                let cycle = HamiltonianCycle::random(rows, cols, &mut rng);
                assert_eq!(cycle.len(), rows * cols);
                assert!(
                    cycle.is_complete_tour(),
                    "{}x{} trace must be a Hamiltonian cycle",
                    rows,
                    cols
                );
            }
        }
    }

    #[test]
    fn known_tree_produces_known_tour() {
        // 2x2 half-resolution tree shaped like an L:
        //   (0,0)-(1,0), (0,0)-(0,1), (0,1)-(1,1)
        let mut tree = SpanningTree::empty(2, 2);
        tree.record_edge(0, 0, Direction::Right);
        tree.record_edge(0, 0, Direction::Down);
        tree.record_edge(0, 1, Direction::Right);

        let cycle = HamiltonianCycle::trace(&tree, (0, 0));
        let coords: Vec<(usize, usize)> = cycle.iter().map(|n| (n.x, n.y)).collect();
        assert_eq!(
            coords,
            vec![
                (1, 0),
                (2, 0),
                (3, 0),
                (3, 1),
                (2, 1),
                (1, 1),
                (1, 2),
                (2, 2),
                (3, 2),
                (3, 3),
                (2, 3),
                (1, 3),
                (0, 3),
                (0, 2),
                (0, 1),
                (0, 0),
            ]
        );
        assert!(cycle.is_complete_tour());
    }

    #[test]
    fn same_seed_reproduces_cycle() {
        let mut rng1 = ChaCha20Rng::seed_from_u64(9);
        let mut rng2 = ChaCha20Rng::seed_from_u64(9);
        let cycle1 = HamiltonianCycle::random(8, 8, &mut rng1);
        let cycle2 = HamiltonianCycle::random(8, 8, &mut rng2);
        let coords1: Vec<_> = cycle1.iter().map(|n| (n.x, n.y)).collect();
        let coords2: Vec<_> = cycle2.iter().map(|n| (n.x, n.y)).collect();
        assert_eq!(coords1, coords2, "same seed must produce identical tours");
    }

    #[test]
    fn different_seeds_diverge_smoke() {
        let mut rng1 = ChaCha20Rng::seed_from_u64(0);
        let base: Vec<_> = HamiltonianCycle::random(8, 8, &mut rng1)
            .iter()
            .map(|n| (n.x, n.y))
            .collect();
        for seed in 1..6 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let other: Vec<_> = HamiltonianCycle::random(8, 8, &mut rng)
                .iter()
                .map(|n| (n.x, n.y))
                .collect();
            if other != base {
                return;
            }
        }
        panic!("five different seeds all produced the same tour (vanishingly unlikely)");
    }

    #[test]
    #[should_panic(expected = "must be even")]
    fn rejects_odd_dimensions() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let _ = HamiltonianCycle::random(5, 8, &mut rng);
    }

    #[test]
    #[should_panic(expected = "at least 4x4")]
    fn rejects_small_dimensions() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let _ = HamiltonianCycle::random(2, 8, &mut rng);
    }

    #[test]
    fn successor_wraps_to_head() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let cycle = HamiltonianCycle::random(6, 6, &mut rng);
        let last = cycle.node(cycle.last_index());
        let wrapped = cycle.successor(last.index);
        assert_eq!(wrapped.index, 0);
        assert_eq!(
            last.x.abs_diff(wrapped.x) + last.y.abs_diff(wrapped.y),
            1,
            "ring must close on a grid-adjacent pair"
        );
    }

    #[test]
    fn index_table_is_a_bijection() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        for (rows, cols) in [(4, 4), (8, 6), (12, 12)] {
            let cycle = HamiltonianCycle::random(rows, cols, &mut rng);
            let table = CycleIndexTable::build(&cycle);
            // Walking the ring and reading the table back agree everywhere.
            let mut node = cycle.head();
            for expected in 0..cycle.len() {
                assert_eq!(node.index, expected);
                assert_eq!(table.index_of(node.x, node.y), expected);
                node = cycle.successor(node.index);
            }
            assert_eq!(node.index, 0, "walk must return to the head");
        }
    }
}
