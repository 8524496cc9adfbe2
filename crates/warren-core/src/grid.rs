//! The occupancy grid: [`GridMap`].

use crate::error::GridError;
use crate::geom::Point;

/// A fixed-size 2D occupancy grid.
///
/// Cells are `bool`: `false` = passable, `true` = obstacle, stored
/// row-major. The grid owns its buffer exclusively and hands out values
/// or iterators, never references into the buffer, so a solver reading
/// it and an editor mutating it cannot alias. Out-of-bounds coordinates
/// are rejected with [`GridError::OutOfBounds`], never clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl GridMap {
    /// Create a grid with every cell passable.
    ///
    /// Fails with [`GridError::InvalidDimensions`] unless both
    /// dimensions are positive.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        })
    }

    /// Width in cells.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size as a point (width = x, height = y).
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Whether the cell is in bounds.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Bounds check as a `Result`, for callers that propagate.
    pub fn check_bounds(&self, p: Point) -> Result<(), GridError> {
        if self.contains(p) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                pos: p,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Row-major buffer index. Callers must have bounds-checked `p`.
    fn index(&self, p: Point) -> usize {
        (p.y * self.width + p.x) as usize
    }

    /// Occupancy at a cell, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<bool> {
        if !self.contains(p) {
            return None;
        }
        Some(self.cells[self.index(p)])
    }

    /// Whether the cell is an obstacle.
    pub fn is_obstacle(&self, p: Point) -> Result<bool, GridError> {
        self.check_bounds(p)?;
        Ok(self.cells[self.index(p)])
    }

    /// Set one cell's occupancy.
    pub fn set_obstacle(&mut self, p: Point, value: bool) -> Result<(), GridError> {
        self.check_bounds(p)?;
        let idx = self.index(p);
        self.cells[idx] = value;
        Ok(())
    }

    /// Set every cell passable.
    pub fn clear(&mut self) {
        self.fill(false);
    }

    /// Set every cell to the given occupancy.
    pub fn fill(&mut self, value: bool) {
        self.cells.fill(value);
    }

    /// Count cells with the given occupancy.
    pub fn count(&self, value: bool) -> usize {
        self.cells.iter().filter(|&&c| c == value).count()
    }

    /// Iterate over `(Point, bool)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, bool)> + '_ {
        self.cells.iter().enumerate().map(|(i, &c)| {
            let i = i as i32;
            (Point::new(i % self.width, i / self.width), c)
        })
    }

    /// The in-bounds cardinal neighbors of a cell, in the fixed
    /// up, left, right, down order (see [`Point::CARDINALS`]).
    ///
    /// The yield order is part of the contract: the path solver's
    /// tie-breaking and the maze generator's branch discovery both
    /// depend on it.
    pub fn cardinal_neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors_4().into_iter().filter(|&n| self.contains(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_size() {
        let g = GridMap::new(10, 5).unwrap();
        assert_eq!(g.size(), Point::new(10, 5));
        assert_eq!(g.width(), 10);
        assert_eq!(g.height(), 5);
        // Freshly created grids are fully passable.
        assert_eq!(g.count(false), 50);
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        assert_eq!(
            GridMap::new(0, 5),
            Err(GridError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
        assert_eq!(
            GridMap::new(3, -1),
            Err(GridError::InvalidDimensions {
                width: 3,
                height: -1
            })
        );
    }

    #[test]
    fn test_set_and_query() {
        let mut g = GridMap::new(4, 4).unwrap();
        let p = Point::new(2, 3);
        g.set_obstacle(p, true).unwrap();
        assert_eq!(g.is_obstacle(p), Ok(true));
        assert_eq!(g.at(p), Some(true));
        assert_eq!(g.is_obstacle(Point::new(0, 0)), Ok(false));
        assert_eq!(g.at(Point::new(10, 10)), None);
    }

    #[test]
    fn test_out_of_bounds_is_an_error() {
        let mut g = GridMap::new(3, 3).unwrap();
        let oob = Point::new(3, 0);
        let err = GridError::OutOfBounds {
            pos: oob,
            width: 3,
            height: 3,
        };
        assert_eq!(g.is_obstacle(oob), Err(err));
        assert_eq!(g.set_obstacle(oob, true), Err(err));
        assert!(g.check_bounds(Point::new(-1, 2)).is_err());
        assert_eq!(g.check_bounds(Point::new(2, 2)), Ok(()));
    }

    #[test]
    fn test_fill_and_clear() {
        let mut g = GridMap::new(5, 5).unwrap();
        g.fill(true);
        assert_eq!(g.count(true), 25);

        g.clear();
        for (p, occupied) in g.iter() {
            assert!(!occupied);
            assert_eq!(g.is_obstacle(p), Ok(false));
        }
        // Clearing an already-clear grid changes nothing.
        let before = g.clone();
        g.clear();
        assert_eq!(g, before);
    }

    #[test]
    fn test_neighbor_order_and_filtering() {
        let g = GridMap::new(3, 3).unwrap();

        let center: Vec<_> = g.cardinal_neighbors(Point::new(1, 1)).collect();
        assert_eq!(
            center,
            vec![
                Point::new(1, 0), // up
                Point::new(0, 1), // left
                Point::new(2, 1), // right
                Point::new(1, 2), // down
            ]
        );

        let corner: Vec<_> = g.cardinal_neighbors(Point::new(0, 0)).collect();
        assert_eq!(corner, vec![Point::new(1, 0), Point::new(0, 1)]);

        let edge: Vec<_> = g.cardinal_neighbors(Point::new(2, 1)).collect();
        assert_eq!(
            edge,
            vec![Point::new(2, 0), Point::new(1, 1), Point::new(2, 2)]
        );
    }

    #[test]
    fn test_iter_row_major() {
        let mut g = GridMap::new(3, 2).unwrap();
        g.set_obstacle(Point::new(1, 0), true).unwrap();
        let items: Vec<_> = g.iter().collect();
        assert_eq!(items.len(), 6);
        assert_eq!(items[0], (Point::new(0, 0), false));
        assert_eq!(items[1], (Point::new(1, 0), true));
        assert_eq!(items[3], (Point::new(0, 1), false));
    }

    #[test]
    fn test_whole_grid_equality() {
        let mut a = GridMap::new(4, 3).unwrap();
        let mut b = GridMap::new(4, 3).unwrap();
        assert_eq!(a, b);
        a.set_obstacle(Point::new(2, 1), true).unwrap();
        assert_ne!(a, b);
        b.set_obstacle(Point::new(2, 1), true).unwrap();
        assert_eq!(a, b);
    }
}
