//! The grid model: a fixed cell table over a world-space rectangle plus the
//! persistent set of cells blocked by obstacles.

use jumpgrid_core::{Point, Range, Vec2};

use crate::config::{CostModel, MapDescriptor, MovementMode};
use crate::error::{GridError, SearchError};
use crate::obstacle::Obstacle;
use crate::planner::{JumpPlanner, SearchOutcome};
use crate::transform::CellTransform;

/// Terrain class of a cell. Recorded per cell but not part of path cost.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    #[default]
    Normal = 1,
    /// Swamp-like ground.
    Hard = 2,
}

impl Terrain {
    /// Numeric weight of the terrain class.
    pub const fn weight(self) -> i32 {
        self as i32
    }
}

/// Permanent per-cell record. Search costs and parents live in the
/// planner's scratch table, never here.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CellRecord {
    pub terrain: Terrain,
}

/// A map of square cells with a persistent fixed-obstacle set.
///
/// Cells outside [`bounds`](Self::bounds) do not exist; every query treats
/// them as blocked.
#[derive(Clone, Debug)]
pub struct GridMap {
    transform: CellTransform,
    bounds: Range,
    width: usize,
    cells: Vec<CellRecord>,
    fixed: Vec<bool>,
    fixed_count: usize,
    search_limit: u32,
    cost_model: CostModel,
}

impl GridMap {
    /// Build the cell table for `desc`: one record per cell of
    /// `ceil(width / cell_size) × ceil(height / cell_size)`.
    pub fn new(desc: &MapDescriptor) -> Result<Self, GridError> {
        let cs = desc.cell_size;
        if !cs.is_finite() || cs <= 0.0 {
            return Err(GridError::InvalidCellSize(cs));
        }
        let (w, h) = (desc.size.width, desc.size.height);
        if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
            return Err(GridError::InvalidMapSize {
                width: w,
                height: h,
            });
        }
        let origin = desc.origin();
        if !origin.is_finite() {
            return Err(GridError::InvalidMapSize {
                width: w,
                height: h,
            });
        }
        let columns = (w / cs).ceil();
        let rows = (h / cs).ceil();
        if columns * rows > i32::MAX as f64 {
            return Err(GridError::MapTooLarge { columns, rows });
        }
        let bounds = Range::with_size(columns as i32, rows as i32);
        let len = bounds.len();
        log::debug!("grid: {} cells of size {cs} at {origin}", bounds.size());
        Ok(Self {
            transform: CellTransform::new(origin, cs),
            bounds,
            width: columns as usize,
            cells: vec![CellRecord::default(); len],
            fixed: vec![false; len],
            fixed_count: 0,
            search_limit: desc.effective_search_limit(),
            cost_model: desc.cost_model,
        })
    }

    /// Build a grid and mark an initial set of obstacles.
    pub fn with_obstacles<'a>(
        desc: &MapDescriptor,
        obstacles: impl IntoIterator<Item = &'a Obstacle>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(desc)?;
        grid.mark_obstacles(obstacles);
        Ok(grid)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Cell keys present in the cell table.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn transform(&self) -> CellTransform {
        self.transform
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.transform.origin
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.transform.cell_size
    }

    /// Maximum main-loop iterations per search.
    #[inline]
    pub fn search_limit(&self) -> u32 {
        self.search_limit
    }

    #[inline]
    pub fn cost_model(&self) -> CostModel {
        self.cost_model
    }

    /// Whether `p` is a key of the cell table.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width + p.x as usize)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    /// The permanent record of `p`, if it is in the map.
    pub fn record(&self, p: Point) -> Option<&CellRecord> {
        self.idx(p).map(|i| &self.cells[i])
    }

    pub fn terrain(&self, p: Point) -> Option<Terrain> {
        self.record(p).map(|r| r.terrain)
    }

    /// Set the terrain of `p`. Returns `false` if `p` is off-map.
    pub fn set_terrain(&mut self, p: Point, terrain: Terrain) -> bool {
        match self.idx(p) {
            Some(i) => {
                self.cells[i].terrain = terrain;
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Obstacle queries
    // -----------------------------------------------------------------------

    /// True if `p` is off-map or a fixed obstacle.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        match self.idx(p) {
            Some(i) => self.fixed[i],
            None => true,
        }
    }

    #[inline]
    pub fn is_clear(&self, p: Point) -> bool {
        !self.is_blocked(p)
    }

    /// True only for in-map cells in the fixed-obstacle set.
    #[inline]
    pub fn is_fixed_obstacle(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| self.fixed[i])
    }

    /// Number of cells in the fixed-obstacle set.
    pub fn obstacle_count(&self) -> usize {
        self.fixed_count
    }

    /// Fixed-obstacle cells in row-major order.
    pub fn obstacle_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.bounds
            .iter()
            .zip(self.fixed.iter())
            .filter_map(|(p, &blocked)| blocked.then_some(p))
    }

    /// Cell containing `world`, if that cell is in the map.
    pub fn cell_of(&self, world: Vec2) -> Option<Point> {
        if !world.is_finite() {
            return None;
        }
        let p = self.transform.world_to_cell(world);
        self.contains(p).then_some(p)
    }

    /// True if `world` is off-map or falls in a fixed-obstacle cell.
    pub fn has_obstacle(&self, world: Vec2) -> bool {
        match self.cell_of(world) {
            Some(p) => self.is_fixed_obstacle(p),
            None => true,
        }
    }

    // -----------------------------------------------------------------------
    // Obstacle updates
    // -----------------------------------------------------------------------

    /// In-map cells overlapped by `obstacle`, both bound edges inclusive.
    /// Negligible obstacles cover nothing.
    pub fn covered_cells(&self, obstacle: &Obstacle) -> Vec<Point> {
        if obstacle.is_negligible() {
            return Vec::new();
        }
        let (min, max) = obstacle.bounds();
        if !min.is_finite() || !max.is_finite() {
            return Vec::new();
        }
        let lo = self.transform.world_to_cell(min);
        let hi = self.transform.world_to_cell(max);
        Range::new(lo.x, lo.y, hi.x.saturating_add(1), hi.y.saturating_add(1))
            .intersect(self.bounds)
            .iter()
            .collect()
    }

    /// Add every cell covered by `obstacles` to the fixed-obstacle set.
    pub fn mark_obstacles<'a>(&mut self, obstacles: impl IntoIterator<Item = &'a Obstacle>) {
        let before = self.fixed_count;
        for obstacle in obstacles {
            for p in self.covered_cells(obstacle) {
                self.set_fixed(p, true);
            }
        }
        log::debug!(
            "grid: marked {} cells ({} blocked)",
            self.fixed_count - before,
            self.fixed_count
        );
    }

    /// Remove every cell covered by `obstacles` from the fixed-obstacle set.
    pub fn unmark_obstacles<'a>(&mut self, obstacles: impl IntoIterator<Item = &'a Obstacle>) {
        let before = self.fixed_count;
        for obstacle in obstacles {
            for p in self.covered_cells(obstacle) {
                self.set_fixed(p, false);
            }
        }
        log::debug!(
            "grid: unmarked {} cells ({} blocked)",
            before - self.fixed_count,
            self.fixed_count
        );
    }

    /// Mark individual cells. Off-map cells are ignored.
    pub fn mark_cells(&mut self, cells: impl IntoIterator<Item = Point>) {
        for p in cells {
            self.set_fixed(p, true);
        }
    }

    /// Unmark individual cells. Cells not marked are ignored.
    pub fn unmark_cells(&mut self, cells: impl IntoIterator<Item = Point>) {
        for p in cells {
            self.set_fixed(p, false);
        }
    }

    /// Empty the fixed-obstacle set.
    pub fn clear_obstacles(&mut self) {
        self.fixed.fill(false);
        self.fixed_count = 0;
    }

    fn set_fixed(&mut self, p: Point, blocked: bool) {
        let Some(i) = self.idx(p) else {
            return;
        };
        if self.fixed[i] != blocked {
            self.fixed[i] = blocked;
            if blocked {
                self.fixed_count += 1;
            } else {
                self.fixed_count -= 1;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Conversion and search
    // -----------------------------------------------------------------------

    /// World position of `cell` offset by `anchor` fractions of a cell.
    pub fn cell_to_world(&self, cell: Point, anchor: Vec2) -> Vec2 {
        self.transform.cell_to_world(cell, anchor)
    }

    /// World positions for a cell path.
    pub fn cells_to_world(&self, cells: &[Point], anchor: Vec2) -> Vec<Vec2> {
        cells
            .iter()
            .map(|&c| self.transform.cell_to_world(c, anchor))
            .collect()
    }

    /// Search between two world points with a fresh planner.
    pub fn search(
        &self,
        start: Vec2,
        goal: Vec2,
        mode: MovementMode,
    ) -> Result<SearchOutcome, SearchError> {
        JumpPlanner::new().search(self, start, goal, mode)
    }

    /// Cell path from `start` to `goal`, empty when there is none.
    pub fn find_path(
        &self,
        start: Vec2,
        goal: Vec2,
        mode: MovementMode,
    ) -> Result<Vec<Point>, SearchError> {
        JumpPlanner::new().find_path(self, start, goal, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jumpgrid_core::Size;

    fn grid(w: f64, h: f64, cell: f64) -> GridMap {
        GridMap::new(&MapDescriptor::new(Vec2::ZERO, Size::new(w, h), cell)).unwrap()
    }

    #[test]
    fn rejects_bad_descriptors() {
        let bad_cell = MapDescriptor::new(Vec2::ZERO, Size::new(5.0, 5.0), 0.0);
        assert_eq!(
            GridMap::new(&bad_cell).unwrap_err(),
            GridError::InvalidCellSize(0.0)
        );
        let bad_size = MapDescriptor::new(Vec2::ZERO, Size::new(-1.0, 5.0), 1.0);
        assert!(matches!(
            GridMap::new(&bad_size),
            Err(GridError::InvalidMapSize { .. })
        ));
        let huge = MapDescriptor::new(Vec2::ZERO, Size::new(1e9, 1e9), 1.0);
        assert!(matches!(
            GridMap::new(&huge),
            Err(GridError::MapTooLarge { .. })
        ));
    }

    #[test]
    fn cell_table_rounds_up_partial_cells() {
        let g = grid(10.0, 4.5, 2.0);
        assert_eq!(g.bounds(), Range::with_size(5, 3));
        assert!(g.contains(Point::new(4, 2)));
        assert!(!g.contains(Point::new(5, 0)));
        assert_eq!(g.terrain(Point::new(1, 1)), Some(Terrain::Normal));
    }

    #[test]
    fn anchored_map_origin() {
        let desc = MapDescriptor::new(Vec2::new(0.0, 0.0), Size::new(10.0, 10.0), 1.0)
            .with_anchor(Vec2::CENTER);
        let g = GridMap::new(&desc).unwrap();
        assert_eq!(g.origin(), Vec2::new(-5.0, -5.0));
        assert_eq!(g.cell_of(Vec2::new(-5.0, -5.0)), Some(Point::new(0, 0)));
        assert_eq!(g.cell_of(Vec2::new(0.2, 0.7)), Some(Point::new(5, 5)));
        assert_eq!(g.cell_of(Vec2::new(5.0, 0.0)), None);
        assert_eq!(g.cell_of(Vec2::new(f64::NAN, 0.0)), None);
    }

    #[test]
    fn off_map_counts_as_blocked() {
        let g = grid(3.0, 3.0, 1.0);
        assert!(g.is_blocked(Point::new(-1, 0)));
        assert!(g.is_blocked(Point::new(0, 3)));
        assert!(!g.is_fixed_obstacle(Point::new(-1, 0)));
        assert!(g.is_clear(Point::new(1, 1)));
        assert!(g.has_obstacle(Vec2::new(-0.5, 1.0)));
        assert!(!g.has_obstacle(Vec2::new(0.5, 1.0)));
    }

    #[test]
    fn obstacle_rasterization_includes_max_edge() {
        let g = grid(10.0, 10.0, 1.0);
        let o = Obstacle::new(Vec2::new(2.0, 3.0), Size::new(2.0, 1.0));
        let cells = g.covered_cells(&o);
        assert_eq!(
            cells,
            vec![
                Point::new(2, 3),
                Point::new(3, 3),
                Point::new(4, 3),
                Point::new(2, 4),
                Point::new(3, 4),
                Point::new(4, 4),
            ]
        );
    }

    #[test]
    fn rotated_obstacle_swaps_extent() {
        let g = grid(10.0, 10.0, 1.0);
        let o = Obstacle::new(Vec2::new(5.5, 5.5), Size::new(4.0, 0.5))
            .with_anchor(Vec2::CENTER)
            .with_rotation(-90.0);
        let cells = g.covered_cells(&o);
        assert_eq!(
            cells,
            vec![
                Point::new(5, 3),
                Point::new(5, 4),
                Point::new(5, 5),
                Point::new(5, 6),
                Point::new(5, 7),
            ]
        );
    }

    #[test]
    fn small_and_off_map_obstacles() {
        let mut g = grid(4.0, 4.0, 1.0);
        g.mark_obstacles(&[Obstacle::new(Vec2::new(1.0, 1.0), Size::new(1.0, 1.0))]);
        assert_eq!(g.obstacle_count(), 0);

        // Straddles the right edge: only in-map cells are kept.
        g.mark_obstacles(&[Obstacle::new(Vec2::new(3.5, 0.2), Size::new(3.0, 0.7))]);
        assert_eq!(g.obstacle_cells().collect::<Vec<_>>(), vec![Point::new(3, 0)]);
    }

    #[test]
    fn mark_unmark_round_trip() {
        let mut g = grid(6.0, 6.0, 1.0);
        let o = Obstacle::new(Vec2::new(1.5, 1.5), Size::new(2.0, 2.0));
        g.mark_obstacles(&[o]);
        assert_eq!(g.obstacle_count(), 9);
        assert!(g.has_obstacle(Vec2::new(2.0, 2.0)));
        g.unmark_obstacles(&[o]);
        assert_eq!(g.obstacle_count(), 0);
        // Removing again is a no-op.
        g.unmark_obstacles(&[o]);
        assert_eq!(g.obstacle_count(), 0);
    }

    #[test]
    fn with_obstacles_marks_on_construction() {
        let desc = MapDescriptor::new(Vec2::ZERO, Size::new(6.0, 6.0), 1.0);
        let walls = [
            Obstacle::new(Vec2::new(1.0, 1.0), Size::new(2.0, 1.0)),
            Obstacle::new(Vec2::new(4.0, 4.0), Size::new(0.5, 0.5)),
        ];
        let g = GridMap::with_obstacles(&desc, &walls).unwrap();
        assert_eq!(g.obstacle_count(), 6);
        assert!(g.is_fixed_obstacle(Point::new(3, 2)));
        assert!(!g.is_fixed_obstacle(Point::new(4, 4)));

        let bad = MapDescriptor::new(Vec2::ZERO, Size::new(6.0, 6.0), -1.0);
        assert_eq!(
            GridMap::with_obstacles(&bad, &walls).unwrap_err(),
            GridError::InvalidCellSize(-1.0)
        );
    }

    #[test]
    fn cell_level_updates_and_clear() {
        let mut g = grid(5.0, 5.0, 1.0);
        g.mark_cells([Point::new(0, 0), Point::new(4, 4), Point::new(9, 9)]);
        assert_eq!(g.obstacle_count(), 2);
        g.unmark_cells([Point::new(0, 0), Point::new(1, 1)]);
        assert_eq!(g.obstacle_cells().collect::<Vec<_>>(), vec![Point::new(4, 4)]);
        g.clear_obstacles();
        assert_eq!(g.obstacle_count(), 0);
        assert!(g.is_clear(Point::new(4, 4)));
    }

    #[test]
    fn terrain_is_stored_per_cell() {
        let mut g = grid(3.0, 3.0, 1.0);
        assert!(g.set_terrain(Point::new(1, 2), Terrain::Hard));
        assert!(!g.set_terrain(Point::new(3, 3), Terrain::Hard));
        assert_eq!(g.terrain(Point::new(1, 2)).map(Terrain::weight), Some(2));
        assert_eq!(g.terrain(Point::new(3, 3)), None);
    }

    #[test]
    fn cells_to_world_uses_anchor() {
        let desc = MapDescriptor::new(Vec2::new(10.0, 20.0), Size::new(8.0, 8.0), 2.0);
        let g = GridMap::new(&desc).unwrap();
        let pts = g.cells_to_world(&[Point::new(0, 0), Point::new(1, 3)], Vec2::CENTER);
        assert_eq!(pts, vec![Vec2::new(11.0, 21.0), Vec2::new(13.0, 27.0)]);
    }
}
