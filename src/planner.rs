//! Per-tick move selection over a completed cycle.
//!
//! The planner reasons in circular index space `[0, last]`: positions along
//! the tour, compared by forward arcs rather than absolute order. A shortcut
//! is a jump forward along the tour that skips cells while provably staying
//! clear of the arc claimed by the trailing reference point; when no neighbor
//! qualifies, the ring successor is always a safe move.

use crate::cycle::{CycleIndexTable, CycleNode, HamiltonianCycle};
use rand::Rng;

const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// True if `index` lies strictly inside the forward arc that starts just
/// after `tail` and ends just before `head`, wrapping through 0 when
/// `head <= tail`.
fn is_in_range(index: usize, head: usize, tail: usize, last: usize) -> bool {
    if head > tail {
        tail < index && index < head
    } else {
        (index > tail && index <= last) || index < head
    }
}

/// Number of indices strictly between `head` and `tail` along the forward
/// arc from `head`.
///
/// Returns -1 when `head == tail`. The negative value matters: it is what
/// rejects the trailing cell itself under the separation check, and what
/// makes a neighbor sitting on the target the closest possible candidate.
fn forward_distance(head: usize, tail: usize, last: usize) -> i64 {
    if head > tail {
        (last - head + tail) as i64
    } else {
        tail as i64 - head as i64 - 1
    }
}

/// Picks the cell to occupy next. Never fails; the fallback is the current
/// node's ring successor, which follows the tour and cannot self-intersect.
///
/// A grid neighbor of `current` qualifies as a shortcut when it
/// - lies on the forward arc from just past `current` up to and including
///   `food` (no moving backward relative to the target),
/// - does not land in the forward arc between `current` and `tail`, and
/// - keeps more than `separation` tour steps of clearance ahead of `tail`.
///
/// Among qualifying neighbors, the one closest to `food` along the tour
/// wins. `food` and `tail` are caller-supplied reference coordinates; the
/// planner tracks no occupancy of its own.
///
/// # Panics
/// Panics if `food` or `tail` lies outside the cycle's grid.
pub fn plan_shortcut<'a>(
    cycle: &'a HamiltonianCycle,
    table: &CycleIndexTable,
    current: &CycleNode,
    food: (usize, usize),
    tail: (usize, usize),
    separation: usize,
) -> &'a CycleNode {
    let last = cycle.last_index();
    let food_index = table.index_of(food.0, food.1);
    let tail_index = table.index_of(tail.0, tail.1);
    let index_after_food = if food_index < last { food_index + 1 } else { 0 };

    let mut best: Option<&CycleNode> = None;
    let mut best_distance = i64::MAX;
    for (dx, dy) in NEIGHBOR_OFFSETS {
        let Some(nx) = current.x.checked_add_signed(dx) else {
            continue;
        };
        let Some(ny) = current.y.checked_add_signed(dy) else {
            continue;
        };
        if nx >= cycle.cols() || ny >= cycle.rows() {
            continue;
        }

        let next = cycle.node(table.index_of(nx, ny));
        let food_distance = forward_distance(next.index, food_index, last);
        if is_in_range(next.index, index_after_food, current.index, last)
            && !is_in_range(next.index, current.index, tail_index, last)
            && forward_distance(next.index, tail_index, last) > separation as i64
            && food_distance < best_distance
        {
            best_distance = food_distance;
            best = Some(next);
        }
    }

    best.unwrap_or_else(|| cycle.successor(current.index))
}

/// Per-episode navigation state: one cycle, its index table, and the current
/// position on the ring.
///
/// The caller feeds in fresh target and tail coordinates every tick and
/// applies the returned coordinate to its own body model; occupancy and
/// collision rules stay on the caller's side. Build a new `Navigator` for
/// every episode.
pub struct Navigator {
    cycle: HamiltonianCycle,
    table: CycleIndexTable,
    position: usize,
}

impl Navigator {
    /// Builds a fresh cycle and starts at the ring head.
    ///
    /// # Panics
    /// Panics if `rows` or `cols` is odd or less than 4.
    pub fn new<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let cycle = HamiltonianCycle::random(rows, cols, rng);
        let table = CycleIndexTable::build(&cycle);
        Self {
            cycle,
            table,
            position: 0,
        }
    }

    pub fn cycle(&self) -> &HamiltonianCycle {
        &self.cycle
    }

    pub fn table(&self) -> &CycleIndexTable {
        &self.table
    }

    /// Node currently occupied.
    pub fn position(&self) -> &CycleNode {
        self.cycle.node(self.position)
    }

    /// Plans one move and commits it as the new position.
    pub fn advance(
        &mut self,
        food: (usize, usize),
        tail: (usize, usize),
        separation: usize,
    ) -> &CycleNode {
        let next = plan_shortcut(
            &self.cycle,
            &self.table,
            self.cycle.node(self.position),
            food,
            tail,
            separation,
        );
        self.position = next.index;
        self.cycle.node(self.position)
    }
}
