//! Shared session driver used by the warren terminal demos.
//!
//! The demos translate user input into [`Command`]s; [`Session`] owns the
//! grid, the endpoints, the solver mode and the last report, and exposes
//! read accessors for drawing. Nothing here renders.

use std::time::Duration;

use rand::{SeedableRng, rngs::StdRng};
use warren_core::{GridError, GridMap, Point};
use warren_paths::{SolveMode, SolveReport, Solver};

pub const DEFAULT_WIDTH: i32 = 80;
pub const DEFAULT_HEIGHT: i32 = 60;

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// One edit or query step against the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the route origin.
    PlaceStart(Point),
    /// Move the route destination.
    PlaceEnd(Point),
    /// Set or clear a single obstacle cell.
    Paint { pos: Point, obstacle: bool },
    /// Select the solver mode.
    SetMode(SolveMode),
    /// Flip between Dijkstra and A*.
    ToggleMode,
    /// Run the solver between the current endpoints.
    Solve,
    /// Replace the whole grid content with a fresh maze.
    GenerateMaze,
    /// Wipe all obstacles, keeping endpoints and mode.
    ClearGrid,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Interactive state around one [`GridMap`].
///
/// The solver is reused across solves so repeated queries on a large grid
/// do not reallocate. Grid edits leave the previous report in place; a
/// stale path stays visible until the next [`Command::Solve`].
#[derive(Debug)]
pub struct Session {
    grid: GridMap,
    start: Point,
    end: Point,
    mode: SolveMode,
    solver: Solver,
    rng: StdRng,
    report: Option<SolveReport>,
}

impl Session {
    /// Creates a session over an empty `width` x `height` grid.
    ///
    /// Start defaults to `(0, 0)`, end to `(width-1, height-1)`, the mode
    /// to A*. The seed drives maze generation only.
    pub fn new(width: i32, height: i32, seed: u64) -> Result<Self, GridError> {
        let grid = GridMap::new(width, height)?;
        let end = Point::new(width - 1, height - 1);
        Ok(Session {
            grid,
            start: Point::ZERO,
            end,
            mode: SolveMode::AStar,
            solver: Solver::new(),
            rng: StdRng::seed_from_u64(seed),
            report: None,
        })
    }

    /// Applies one command.
    ///
    /// Placement commands validate bounds and error rather than clamp;
    /// on error the session is unchanged.
    pub fn handle(&mut self, cmd: Command) -> Result<(), GridError> {
        match cmd {
            Command::PlaceStart(pos) => {
                self.grid.check_bounds(pos)?;
                self.start = pos;
            }
            Command::PlaceEnd(pos) => {
                self.grid.check_bounds(pos)?;
                self.end = pos;
            }
            Command::Paint { pos, obstacle } => {
                self.grid.set_obstacle(pos, obstacle)?;
            }
            Command::SetMode(mode) => self.mode = mode,
            Command::ToggleMode => self.mode = self.mode.toggle(),
            Command::Solve => {
                let report = self
                    .solver
                    .solve(&self.grid, self.start, self.end, self.mode)?;
                log::debug!(
                    "{}: settled {} cells in {:?}",
                    self.mode.label(),
                    report.cells_settled,
                    report.elapsed
                );
                self.report = Some(report);
            }
            Command::GenerateMaze => {
                warren_maze::generate(&mut self.grid, &mut self.rng);
                log::debug!(
                    "maze regenerated, {} wall cells",
                    self.grid.count(true)
                );
            }
            Command::ClearGrid => self.grid.clear(),
        }
        Ok(())
    }

    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn mode(&self) -> SolveMode {
        self.mode
    }

    /// Report from the most recent solve, if any.
    pub fn report(&self) -> Option<&SolveReport> {
        self.report.as_ref()
    }

    /// Interior cells of the last solved route, oldest first. Empty
    /// before the first solve and when the end was unreachable.
    pub fn path(&self) -> &[Point] {
        self.report.as_ref().map_or(&[], |r| r.path.as_slice())
    }

    /// Whether the last solve reached the end. False before any solve.
    pub fn reachable(&self) -> bool {
        self.report.as_ref().is_some_and(|r| r.reachable)
    }

    /// Duration of the last solve, for on-screen metrics.
    pub fn elapsed(&self) -> Option<Duration> {
        self.report.as_ref().map(|r| r.elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let s = Session::new(10, 6, 1).unwrap();
        assert_eq!(s.start(), Point::ZERO);
        assert_eq!(s.end(), Point::new(9, 5));
        assert_eq!(s.mode(), SolveMode::AStar);
        assert_eq!(s.grid().count(true), 0);
        assert!(s.report().is_none());
        assert!(s.path().is_empty());
        assert!(!s.reachable());
        assert!(s.elapsed().is_none());
    }

    #[test]
    fn test_invalid_dimensions_propagate() {
        assert_eq!(
            Session::new(0, 6, 1).unwrap_err(),
            GridError::InvalidDimensions {
                width: 0,
                height: 6
            }
        );
    }

    #[test]
    fn test_paint_and_solve() {
        let mut s = Session::new(3, 3, 1).unwrap();
        s.handle(Command::PlaceEnd(Point::new(2, 2))).unwrap();
        s.handle(Command::Paint {
            pos: Point::new(1, 1),
            obstacle: true,
        })
        .unwrap();
        s.handle(Command::Solve).unwrap();
        assert!(s.reachable());
        assert_eq!(s.path(), &[Point::new(1, 0), Point::new(2, 0), Point::new(2, 1)]);
    }

    #[test]
    fn test_placement_validates_bounds() {
        let mut s = Session::new(4, 4, 1).unwrap();
        let err = GridError::OutOfBounds {
            pos: Point::new(4, 0),
            width: 4,
            height: 4,
        };
        assert_eq!(s.handle(Command::PlaceStart(Point::new(4, 0))), Err(err));
        assert_eq!(s.start(), Point::ZERO);
        let err = GridError::OutOfBounds {
            pos: Point::new(0, -1),
            width: 4,
            height: 4,
        };
        assert_eq!(s.handle(Command::PlaceEnd(Point::new(0, -1))), Err(err));
        assert_eq!(s.end(), Point::new(3, 3));
    }

    #[test]
    fn test_toggle_and_set_mode() {
        let mut s = Session::new(4, 4, 1).unwrap();
        s.handle(Command::ToggleMode).unwrap();
        assert_eq!(s.mode(), SolveMode::Dijkstra);
        s.handle(Command::ToggleMode).unwrap();
        assert_eq!(s.mode(), SolveMode::AStar);
        s.handle(Command::SetMode(SolveMode::Dijkstra)).unwrap();
        assert_eq!(s.mode(), SolveMode::Dijkstra);
    }

    #[test]
    fn test_stale_report_survives_edits() {
        let mut s = Session::new(3, 3, 1).unwrap();
        s.handle(Command::PlaceEnd(Point::new(2, 2))).unwrap();
        s.handle(Command::Solve).unwrap();
        let before = s.report().cloned();
        assert!(before.is_some());

        // Edits and regeneration keep the old report until re-solved.
        s.handle(Command::Paint {
            pos: Point::new(1, 0),
            obstacle: true,
        })
        .unwrap();
        assert_eq!(s.report().cloned(), before);
        s.handle(Command::GenerateMaze).unwrap();
        assert_eq!(s.report().cloned(), before);
        s.handle(Command::ClearGrid).unwrap();
        assert_eq!(s.report().cloned(), before);

        s.handle(Command::Solve).unwrap();
        assert!(s.reachable());
    }

    #[test]
    fn test_clear_keeps_endpoints_and_mode() {
        let mut s = Session::new(5, 5, 1).unwrap();
        s.handle(Command::PlaceStart(Point::new(1, 1))).unwrap();
        s.handle(Command::PlaceEnd(Point::new(3, 3))).unwrap();
        s.handle(Command::ToggleMode).unwrap();
        s.handle(Command::GenerateMaze).unwrap();
        assert!(s.grid().count(true) > 0);

        s.handle(Command::ClearGrid).unwrap();
        assert_eq!(s.grid().count(true), 0);
        assert_eq!(s.start(), Point::new(1, 1));
        assert_eq!(s.end(), Point::new(3, 3));
        assert_eq!(s.mode(), SolveMode::Dijkstra);
    }

    #[test]
    fn test_same_seed_generates_same_maze() {
        let mut a = Session::new(9, 9, 42).unwrap();
        let mut b = Session::new(9, 9, 42).unwrap();
        a.handle(Command::GenerateMaze).unwrap();
        b.handle(Command::GenerateMaze).unwrap();
        assert_eq!(a.grid(), b.grid());

        let mut c = Session::new(9, 9, 43).unwrap();
        c.handle(Command::GenerateMaze).unwrap();
        assert_ne!(a.grid(), c.grid());
    }

    #[test]
    fn test_solve_in_generated_maze() {
        let mut s = Session::new(11, 9, 7).unwrap();
        s.handle(Command::GenerateMaze).unwrap();
        s.handle(Command::PlaceEnd(Point::new(8, 6))).unwrap();
        s.handle(Command::Solve).unwrap();
        // Both endpoints are carved rooms, so the maze connects them.
        assert!(s.reachable());
        for &p in s.path() {
            assert_eq!(s.grid().is_obstacle(p), Ok(false));
        }
    }
}
