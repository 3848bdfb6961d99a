use rand::Rng;
use rand::seq::SliceRandom;

/// The four grid-adjacency directions. `y` grows downward, so `Up` is `-y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

pub(crate) const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

impl Direction {
    /// Unit offset of this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

/// Neighbor of `(x, y)` in `dir`, or `None` outside the `rows x cols` grid.
pub(crate) fn neighbor(
    x: usize,
    y: usize,
    dir: Direction,
    rows: usize,
    cols: usize,
) -> Option<(usize, usize)> {
    let (dx, dy) = dir.offset();
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;
    (nx < cols && ny < rows).then_some((nx, ny))
}

/// A `rows x cols` grid graph with a unique positive weight on every
/// 4-adjacency edge.
///
/// An `r x c` grid has `2rc - r - c` internal edges; their weights are a
/// permutation of `1..=E`, stored symmetrically on both endpoints. Weight 0
/// marks the absence of an edge (the grid boundary).
#[derive(Debug, Clone)]
pub struct GridGraph {
    rows: usize,
    cols: usize,
    /// Row-major per-cell weights, indexed by `Direction`.
    weights: Vec<[u32; 4]>,
}

impl GridGraph {
    /// Builds a grid graph with unique random edge weights.
    ///
    /// Each edge draws its weight without replacement from a shuffled pool of
    /// `1..=E`, so uniqueness and full coverage hold by construction; there is
    /// no collision path.
    ///
    /// # Panics
    /// Panics if `rows < 2` or `cols < 2`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        assert!(rows >= 2 && cols >= 2, "grid must be at least 2x2");

        let edge_total = 2 * rows * cols - rows - cols;
        let mut pool: Vec<u32> = (1..=edge_total as u32).collect();
        pool.shuffle(rng);

        let mut weights = vec![[0u32; 4]; rows * cols];
        for y in 0..rows {
            for x in 0..cols {
                for dir in DIRECTIONS {
                    let Some((nx, ny)) = neighbor(x, y, dir, rows, cols) else {
                        continue;
                    };
                    if weights[y * cols + x][dir as usize] != 0 {
                        continue;
                    }
                    let w = pool.pop().expect("weight pool covers every edge");
                    weights[y * cols + x][dir as usize] = w;
                    weights[ny * cols + nx][dir.opposite() as usize] = w;
                }
            }
        }
        debug_assert!(pool.is_empty());

        Self {
            rows,
            cols,
            weights,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Weight of the edge leaving `(x, y)` in `dir`, or `None` at the grid
    /// boundary.
    pub fn edge_weight(&self, x: usize, y: usize, dir: Direction) -> Option<u32> {
        let w = self.weights[y * self.cols + x][dir as usize];
        (w != 0).then_some(w)
    }
}
