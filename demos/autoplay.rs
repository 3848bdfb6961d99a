//! Run a complete self-playing snake episode and report how it went.
//!
//! The snake starts with length 1, gains 5 cells per food, and plays until
//! it fills the grid. Food placement and body bookkeeping live here; the
//! library only answers "which cell next".
//!
//! Usage: cargo run --release --example autoplay -- [rows] [cols] [seed] [separation]

use gridtour::Navigator;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::collections::VecDeque;
use std::env;
use std::time::Instant;

const GROWTH_PER_FOOD: usize = 5;

fn main() {
    let args: Vec<String> = env::args().collect();

    let rows: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(16);
    let cols: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(rows);
    let seed: u64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(0);
    let separation: usize = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(4);

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut navigator = Navigator::new(rows, cols, &mut rng);

    let total = rows * cols;
    let mut occupied = vec![false; total];
    let mut body: VecDeque<(usize, usize)> = VecDeque::new();

    let head = *navigator.position();
    body.push_back((head.x, head.y));
    occupied[head.y * cols + head.x] = true;

    let mut target_len = GROWTH_PER_FOOD;
    let mut food = place_food(&occupied, cols, &mut rng);
    let mut steps = 0u64;
    let mut eaten = 0u64;
    let start = Instant::now();

    while body.len() < total {
        let tail = *body.front().expect("body is never empty");
        let next = *navigator.advance(food, tail, separation);
        let pos = (next.x, next.y);
        steps += 1;

        if body.len() >= target_len {
            let freed = body.pop_front().expect("body is never empty");
            occupied[freed.1 * cols + freed.0] = false;
        }

        if occupied[pos.1 * cols + pos.0] {
            // Long tail freezes from chained food can outrun the margin;
            // a bigger separation makes this rarer.
            println!(
                "ran into the body at {:?} after {} steps, {} food eaten",
                pos, steps, eaten
            );
            return;
        }
        body.push_back(pos);
        occupied[pos.1 * cols + pos.0] = true;

        if pos == food {
            eaten += 1;
            target_len += GROWTH_PER_FOOD - 1;
            if body.len() == total {
                break;
            }
            food = place_food(&occupied, cols, &mut rng);
        }
    }

    let elapsed = start.elapsed().as_secs_f64();
    println!(
        "grid {}x{}  seed {}  separation {}",
        cols, rows, seed, separation
    );
    println!(
        "filled {} cells in {} steps, {} food eaten, {:.3}s",
        body.len(),
        steps,
        eaten,
        elapsed
    );
}

/// Uniform food placement outside the body.
fn place_food<R: Rng + ?Sized>(occupied: &[bool], cols: usize, rng: &mut R) -> (usize, usize) {
    let rows = occupied.len() / cols;
    loop {
        let x = rng.random_range(0..cols);
        let y = rng.random_range(0..rows);
        if !occupied[y * cols + x] {
            return (x, y);
        }
    }
}
