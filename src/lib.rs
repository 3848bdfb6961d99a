#![doc = include_str!("../README.md")]

mod cycle;
mod graph;
mod planner;
mod prim;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use cycle::{CycleIndexTable, CycleNode, HamiltonianCycle};
pub use graph::{Direction, GridGraph};
pub use planner::{Navigator, plan_shortcut};
pub use prim::SpanningTree;
