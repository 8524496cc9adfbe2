//! Deterministic best-first path solving over warren grids.
//!
//! One search loop serves both classic algorithms; the mode only
//! changes the heuristic term:
//!
//! - **Dijkstra** with heuristic 0, settling cells in pure cost order
//! - **A\*** with the [`manhattan`] heuristic to the goal, admissible
//!   and consistent on 4-connected unit-cost grids
//!
//! Paths are reported as the strict interior of the route (endpoints
//! excluded), with a `reachable` flag distinguishing "no route" from
//! "start is end". Equal-priority frontier ties resolve by insertion
//! order and then row-major cell order, so results are reproducible
//! across runs and platforms. [`Solver`] reuses its scratch buffers
//! between calls; [`solve`] is the one-shot convenience.

mod solver;

pub use solver::{SolveMode, SolveReport, Solver, manhattan, solve};
