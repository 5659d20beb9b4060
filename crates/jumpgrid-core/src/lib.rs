//! Geometry primitives shared by the *jumpgrid* crates.
//!
//! Two coordinate spaces are involved in grid pathfinding:
//!
//! - **cell space**: integer [`Point`] keys addressing square cells, bounded
//!   by a half-open [`Range`];
//! - **world space**: floating-point [`Vec2`] positions and [`Size`] extents
//!   as used by the scene that owns the map and its obstacles.

pub mod geom;
pub mod world;

pub use geom::{Point, Range, RangeIter};
pub use world::{Size, Vec2};
