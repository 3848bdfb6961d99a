use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use wasm_bindgen::prelude::*;

use crate::{HamiltonianCycle, Navigator};

fn check_dimensions(rows: u32, cols: u32) -> Result<(), JsError> {
    if rows < 4 || cols < 4 || rows % 2 != 0 || cols % 2 != 0 {
        return Err(JsError::new("rows and cols must be even and at least 4"));
    }
    Ok(())
}

/// Convert a cycle to a JsValue (array of [x, y] pairs in tour order).
fn cycle_to_js(cycle: &HamiltonianCycle) -> Result<JsValue, JsError> {
    let coords: Vec<[u32; 2]> = cycle
        .iter()
        .map(|node| [node.x as u32, node.y as u32])
        .collect();
    serde_wasm_bindgen::to_value(&coords).map_err(|e| JsError::new(&e.to_string()))
}

/// Build a Hamiltonian cycle for a rows x cols grid with the given seed.
/// Returns the tour as an array of [x, y] pairs, directly usable in
/// JavaScript.
#[wasm_bindgen]
pub fn trace_cycle(rows: u32, cols: u32, seed: u64) -> Result<JsValue, JsError> {
    check_dimensions(rows, cols)?;
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let cycle = HamiltonianCycle::random(rows as usize, cols as usize, &mut rng);
    cycle_to_js(&cycle)
}

/// A stateful navigator over one Hamiltonian cycle.
///
/// The constructor builds the cycle and its lookup table; each `advance`
/// plans one move toward the food while keeping clear of the tail, commits
/// it, and returns the new position. The caller owns all body and collision
/// bookkeeping.
#[wasm_bindgen]
pub struct WasmNavigator {
    navigator: Navigator,
    rows: u32,
    cols: u32,
}

#[wasm_bindgen]
impl WasmNavigator {
    /// Create a navigator for a rows x cols grid.
    ///
    /// `rows` and `cols` must be even and at least 4. The `seed` determines
    /// the cycle.
    #[wasm_bindgen(constructor)]
    pub fn new(rows: u32, cols: u32, seed: u64) -> Result<WasmNavigator, JsError> {
        check_dimensions(rows, cols)?;
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let navigator = Navigator::new(rows as usize, cols as usize, &mut rng);
        Ok(WasmNavigator {
            navigator,
            rows,
            cols,
        })
    }

    /// The full tour as an array of [x, y] pairs.
    pub fn cycle(&self) -> Result<JsValue, JsError> {
        cycle_to_js(self.navigator.cycle())
    }

    /// Current position as [x, y].
    pub fn position(&self) -> Vec<u32> {
        let node = self.navigator.position();
        vec![node.x as u32, node.y as u32]
    }

    /// Advance one tick toward the food, keeping more than `separation` tour
    /// steps of clearance from the tail. Returns the new position as [x, y].
    pub fn advance(
        &mut self,
        food_x: u32,
        food_y: u32,
        tail_x: u32,
        tail_y: u32,
        separation: u32,
    ) -> Result<Vec<u32>, JsError> {
        if food_x >= self.cols || food_y >= self.rows || tail_x >= self.cols || tail_y >= self.rows
        {
            return Err(JsError::new("food and tail must lie inside the grid"));
        }
        let node = self.navigator.advance(
            (food_x as usize, food_y as usize),
            (tail_x as usize, tail_y as usize),
            separation as usize,
        );
        Ok(vec![node.x as u32, node.y as u32])
    }
}
