//! Jump Point Search over world-space maps.
//!
//! A [`GridMap`] covers a rectangular world region with square cells. Obstacle
//! footprints given in world units ([`Obstacle`]) are rasterized onto it, and
//! [`JumpPlanner`] searches between two world points, answering with the
//! cells to walk through:
//!
//! - [`MovementMode::WithDiagonals`] paths step to any of the eight
//!   neighbours but never squeeze between two diagonally adjacent obstacles;
//! - [`MovementMode::Orthogonal`] paths only step to the four edge neighbours.
//!
//! The planner owns its scratch tables and reuses them across queries; the
//! grid is only borrowed for the duration of a search.
//!
//! ```
//! use jumpgrid_core::{Size, Vec2};
//! use jumpgrid_paths::{GridMap, MapDescriptor, MovementMode, Obstacle};
//!
//! let desc = MapDescriptor::new(Vec2::ZERO, Size::new(8.0, 8.0), 1.0);
//! let mut grid = GridMap::new(&desc).unwrap();
//! grid.mark_obstacles(&[Obstacle::new(Vec2::new(3.0, 0.0), Size::new(1.0, 6.0))]);
//!
//! let path = grid
//!     .find_path(Vec2::new(0.5, 0.5), Vec2::new(7.5, 0.5), MovementMode::WithDiagonals)
//!     .unwrap();
//! assert_eq!(path.first().map(|p| (p.x, p.y)), Some((0, 0)));
//! assert_eq!(path.last().map(|p| (p.x, p.y)), Some((7, 0)));
//! ```

mod config;
mod diagonal;
mod distance;
mod error;
mod grid;
mod obstacle;
mod planner;
mod scan;
mod state;
mod transform;

pub use config::{CostModel, DEFAULT_SEARCH_LIMIT, MapDescriptor, MovementMode};
pub use distance::{DIAGONAL_COST, STRAIGHT_COST, chebyshev, manhattan, weighted};
pub use error::{GridError, SearchError};
pub use grid::{CellRecord, GridMap, Terrain};
pub use obstacle::{MIN_OBSTACLE_AREA, Obstacle};
pub use planner::{JumpPlanner, Route, SearchOutcome};
pub use scan::forced_neighbors;
pub use state::SearchState;
pub use transform::CellTransform;
