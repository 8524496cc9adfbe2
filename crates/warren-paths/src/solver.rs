//! The unified best-first search: [`Solver`], [`SolveMode`], [`SolveReport`].

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use warren_core::{GridError, GridMap, Point};

/// Manhattan (L1) distance between two cells; the A* heuristic.
///
/// Admissible and consistent for 4-connected unit-cost grids, so A*
/// settles every cell with its optimal cost and never reopens one.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

// ---------------------------------------------------------------------------
// SolveMode
// ---------------------------------------------------------------------------

/// Which best-first strategy drives the search.
///
/// Both modes run the same loop; the only difference is the heuristic
/// (zero for Dijkstra, [`manhattan`] to the goal for A*), so on a
/// unit-cost grid they always find paths of equal length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveMode {
    Dijkstra,
    AStar,
}

impl SolveMode {
    /// Short human-readable name, for on-screen metrics.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dijkstra => "Dijkstra",
            Self::AStar => "A*",
        }
    }

    /// The other mode.
    pub fn toggle(self) -> Self {
        match self {
            Self::Dijkstra => Self::AStar,
            Self::AStar => Self::Dijkstra,
        }
    }
}

// ---------------------------------------------------------------------------
// SolveReport
// ---------------------------------------------------------------------------

/// Outcome of one solve.
///
/// `path` is the strict interior of the route: it excludes both the
/// start and end cells. It is empty both when no route exists and when
/// start equals end; `reachable` tells the two apart.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveReport {
    /// Interior cells of the route, in start-to-end order.
    pub path: Vec<Point>,
    /// Whether end was settled.
    pub reachable: bool,
    /// Cells finalized before the search stopped.
    pub cells_settled: usize,
    /// Wall-clock duration of the search, including path reconstruction.
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// Search internals
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct Node {
    cost: i32,
    /// Rank of this cell's first insertion into the frontier this
    /// generation. Cost improvements while open keep it: the cell never
    /// left the frontier, so its "inserted earliest" rank is unchanged.
    seq: u64,
    parent: usize,
    generation: u32,
    open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            cost: 0,
            seq: 0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Frontier entry, ordered by `(priority, seq, idx)` ascending and
/// wrapped in `Reverse` so the max-heap pops the smallest first.
///
/// `seq` makes equal-priority ties pop in insertion (FIFO) order; `idx`
/// is the row-major cell index, so the last tie level is exactly the
/// lexicographic `(y, x)` order of the cells.
#[derive(Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    priority: i32,
    seq: u64,
    idx: usize,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
            .then_with(|| self.idx.cmp(&other.idx))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

/// A reusable best-first path solver.
///
/// The solver keeps a flat node array sized to the last grid it saw and
/// invalidates it wholesale with a generation counter, so repeated
/// solves allocate only when the grid grows. Results are a pure
/// function of the arguments: reusing one solver and creating a fresh
/// one per call produce identical reports.
#[derive(Debug)]
pub struct Solver {
    nodes: Vec<Node>,
    generation: u32,
    width: usize,
}

impl Solver {
    /// Create a solver with empty caches.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generation: 0,
            width: 0,
        }
    }

    /// Size the node cache for `grid`, reallocating only on growth.
    fn ensure(&mut self, grid: &GridMap) {
        self.width = grid.width() as usize;
        let len = self.width * grid.height() as usize;
        if len > self.nodes.len() {
            self.nodes.clear();
            self.nodes.resize(len, Node::default());
            self.generation = 0;
        }
    }

    /// Flat index of an in-bounds cell.
    #[inline]
    fn idx(&self, p: Point) -> usize {
        p.y as usize * self.width + p.x as usize
    }

    /// Convert a flat index back to a cell.
    #[inline]
    fn point(&self, idx: usize) -> Point {
        Point::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    /// Search for a shortest route from `start` to `end` over the
    /// passable cells of `grid`.
    ///
    /// Edge cost is uniform 1. Neighbors are visited in the grid's
    /// fixed cardinal order and equal-priority frontier ties resolve by
    /// insertion order, then row-major cell order, so the reported path
    /// is deterministic. `start == end` settles the start as the goal
    /// immediately. Endpoints may sit on obstacle cells: the start's
    /// own occupancy is never consulted, and an obstacle end is simply
    /// never discovered (`reachable = false`).
    ///
    /// Fails with [`GridError::OutOfBounds`] if either endpoint is
    /// outside the grid. An unreachable end is not an error.
    pub fn solve(
        &mut self,
        grid: &GridMap,
        start: Point,
        end: Point,
        mode: SolveMode,
    ) -> Result<SolveReport, GridError> {
        grid.check_bounds(start)?;
        grid.check_bounds(end)?;

        let t0 = Instant::now();

        self.ensure(grid);
        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;

        let heuristic = |p: Point| match mode {
            SolveMode::Dijkstra => 0,
            SolveMode::AStar => manhattan(p, end),
        };

        let start_idx = self.idx(start);
        let goal_idx = self.idx(end);

        {
            let node = &mut self.nodes[start_idx];
            node.cost = 0;
            node.seq = 0;
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open: BinaryHeap<Reverse<FrontierEntry>> = BinaryHeap::new();
        open.push(Reverse(FrontierEntry {
            priority: heuristic(start),
            seq: 0,
            idx: start_idx,
        }));
        let mut next_seq: u64 = 1;
        let mut settled: usize = 0;

        let found = 'search: loop {
            let Some(Reverse(current)) = open.pop() else {
                break 'search false;
            };
            let ci = current.idx;

            // Skip entries superseded by an improvement or settle.
            if self.nodes[ci].generation != cur_gen || !self.nodes[ci].open {
                continue;
            }

            self.nodes[ci].open = false;
            settled += 1;

            if ci == goal_idx {
                break 'search true;
            }

            let current_cost = self.nodes[ci].cost;
            let current_point = self.point(ci);

            for np in grid.cardinal_neighbors(current_point) {
                if grid.at(np) == Some(true) {
                    continue;
                }
                let ni = self.idx(np);
                let tentative = current_cost + 1;

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    // Settled cells are final; open cells only improve.
                    if !n.open || tentative >= n.cost {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.seq = next_seq;
                    next_seq += 1;
                }

                n.cost = tentative;
                n.parent = ci;
                n.open = true;

                open.push(Reverse(FrontierEntry {
                    priority: tentative + heuristic(np),
                    seq: n.seq,
                    idx: ni,
                }));
            }
        };

        let mut path = Vec::new();
        if found {
            // Interior chain only: start from the goal's predecessor and
            // stop before pushing the start.
            let mut ci = self.nodes[goal_idx].parent;
            while ci != usize::MAX && ci != start_idx {
                path.push(self.point(ci));
                ci = self.nodes[ci].parent;
            }
            path.reverse();
        }

        Ok(SolveReport {
            path,
            reachable: found,
            cells_settled: settled,
            elapsed: t0.elapsed(),
        })
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot solve with a fresh [`Solver`].
pub fn solve(
    grid: &GridMap,
    start: Point,
    end: Point,
    mode: SolveMode,
) -> Result<SolveReport, GridError> {
    Solver::new().solve(grid, start, end, mode)
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn mode_round_trip() {
        for mode in [SolveMode::Dijkstra, SolveMode::AStar] {
            let json = serde_json::to_string(&mode).unwrap();
            let back: SolveMode = serde_json::from_str(&json).unwrap();
            assert_eq!(mode, back);
        }
    }

    #[test]
    fn report_round_trip() {
        let report = SolveReport {
            path: vec![Point::new(1, 0), Point::new(2, 0)],
            reachable: true,
            cells_settled: 7,
            elapsed: Duration::from_micros(125),
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: SolveReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
