//! Error types for grid construction and cell access.

use std::fmt;

use crate::geom::Point;

/// Errors surfaced by [`GridMap`](crate::GridMap) operations.
///
/// Both variants are local precondition violations reported to the
/// immediate caller; the grid never clamps or corrects coordinates on
/// its own. An unreachable path goal is *not* an error (see
/// `warren-paths`): disconnected grids are a normal state while
/// obstacles are being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Grid construction with a non-positive width or height.
    InvalidDimensions { width: i32, height: i32 },
    /// A cell query or mutation outside `[0, width) × [0, height)`.
    OutOfBounds {
        pos: Point,
        width: i32,
        height: i32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}")
            }
            Self::OutOfBounds { pos, width, height } => {
                write!(f, "cell {pos} is outside the {width}x{height} grid")
            }
        }
    }
}

impl std::error::Error for GridError {}
