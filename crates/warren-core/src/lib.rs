//! **warren-core** — Occupancy grid and cell geometry (core types).
//!
//! This crate provides the foundational types used across the *warren*
//! toolkit: integer cell coordinates, the owned boolean occupancy grid
//! the solver and maze generator operate on, and the grid error type.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::GridError;
pub use geom::Point;
pub use grid::GridMap;
