//! Print a seeded Hamiltonian cycle as a grid of tour indices.
//!
//! Usage: cargo run --release --example trace -- <rows> <cols> [seed]
//!
//! Example:
//!   cargo run --release --example trace -- 8 8 42

use gridtour::{CycleIndexTable, HamiltonianCycle};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();

    let rows: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        eprintln!("Usage: {} <rows> <cols> [seed]", args[0]);
        std::process::exit(1);
    });
    let cols: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(rows);
    let seed: u64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(0);

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let cycle = HamiltonianCycle::random(rows, cols, &mut rng);
    let table = CycleIndexTable::build(&cycle);

    let width = cycle.last_index().to_string().len() + 1;
    for y in 0..rows {
        for x in 0..cols {
            print!("{:>width$}", table.index_of(x, y), width = width);
        }
        println!();
    }
}
