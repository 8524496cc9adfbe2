//! Randomized-Prim perfect maze generation for warren grids.
//!
//! [`generate`] rebuilds a [`GridMap`] in place as a maze. Cells of the
//! coarse lattice (both coordinates even) act as rooms, the odd cells
//! between them as carvable walls, and the carved walls form a spanning
//! tree: every pair of rooms is connected by exactly one route.
//!
//! All randomness comes from the caller's [`Rng`], so a seeded generator
//! reproduces a maze cell for cell.

use rand::{Rng, RngExt};
use warren_core::{GridMap, Point};

/// Rebuild `grid` in place as a perfect maze, overwriting any prior
/// content.
///
/// The coarse lattice holds the cells with both coordinates even and
/// strictly below `dimension - 1`: an odd dimension leaves the trailing
/// two rows/columns fully walled, an even dimension the trailing one.
/// That boundary shape is part of the contract, not an artifact.
///
/// Runs randomized Prim's over the lattice: starting from a random
/// root, repeatedly carve a random frontier cell together with the wall
/// between it and the tree. The root itself stays uncarved until the
/// tree grows back around and rediscovers it, so a lattice with fewer
/// than two cells (any grid up to 3×3) comes out fully walled.
pub fn generate(grid: &mut GridMap, rng: &mut impl Rng) {
    grid.fill(true);

    let mut lattice = Vec::new();
    for y in (0..grid.height() - 1).step_by(2) {
        for x in (0..grid.width() - 1).step_by(2) {
            lattice.push(Point::new(x, y));
        }
    }
    if lattice.is_empty() {
        return;
    }

    let width = grid.width();
    let idx = move |p: Point| (p.y * width + p.x) as usize;
    let len = width as usize * grid.height() as usize;

    // `unvisited` marks lattice cells not yet part of the tree;
    // `in_frontier` mirrors frontier membership for O(1) dedup. The
    // frontier itself is a vector of (child, parent) pairs so a uniform
    // random pick is one `swap_remove`.
    let mut unvisited = vec![false; len];
    for &p in &lattice {
        unvisited[idx(p)] = true;
    }
    let mut remaining = lattice.len();

    let root = lattice[rng.random_range(0..lattice.len())];
    let mut frontier: Vec<(Point, Point)> = Vec::new();
    let mut in_frontier = vec![false; len];
    for d in Point::CARDINALS {
        let n = root + d * 2;
        if grid.contains(n) && unvisited[idx(n)] && !in_frontier[idx(n)] {
            in_frontier[idx(n)] = true;
            frontier.push((n, root));
        }
    }

    while remaining > 0 {
        if frontier.is_empty() {
            // No cell can ever be discovered again; whatever is left
            // (only the root, on degenerate lattices) stays walled.
            break;
        }
        let (child, parent) = frontier.swap_remove(rng.random_range(0..frontier.len()));
        in_frontier[idx(child)] = false;

        carve(grid, child);
        carve(grid, (child + parent) / 2);

        unvisited[idx(child)] = false;
        remaining -= 1;

        for d in Point::CARDINALS {
            let n = child + d * 2;
            if grid.contains(n) && unvisited[idx(n)] && !in_frontier[idx(n)] {
                in_frontier[idx(n)] = true;
                frontier.push((n, child));
            }
        }
    }
}

/// Carve one cell passable. Generator coordinates are derived from the
/// grid's own dimensions, so the write cannot land out of bounds.
fn carve(grid: &mut GridMap, p: Point) {
    grid.set_obstacle(p, false).expect("carve within bounds");
}
