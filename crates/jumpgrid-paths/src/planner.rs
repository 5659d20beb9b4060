//! The search loop: expands jump points until the goal is met, the open set
//! runs dry or the iteration cap trips.

use jumpgrid_core::{Point, Vec2};

use crate::config::{CostModel, MovementMode};
use crate::diagonal::{DiagonalScan, scan_diagonals};
use crate::error::SearchError;
use crate::grid::GridMap;
use crate::scan::{Scan, scan_cardinal};
use crate::state::SearchState;

/// Diagonals whose axis components cover all four cardinal directions.
const ALL_AXES: [Point; 2] = [Point::new(1, 1), Point::new(-1, -1)];

/// A found path.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    jump_points: Vec<Point>,
    cells: Vec<Point>,
}

impl Route {
    fn single(p: Point) -> Self {
        Self {
            jump_points: vec![p],
            cells: vec![p],
        }
    }

    /// Start, every jump point passed through, goal. Consecutive entries
    /// lie on a common row, column or diagonal.
    pub fn jump_points(&self) -> &[Point] {
        &self.jump_points
    }

    /// Every cell from start to goal inclusive, one step apart.
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Point> {
        self.cells
    }
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Route),
    /// Start or goal does not resolve to a cell of the map.
    OutOfMap,
    /// The start cell is a fixed obstacle.
    StartBlocked,
    /// The open set ran out before the goal was met.
    Unreachable,
    /// The iteration cap was exceeded with cells still open.
    LimitExceeded,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            Self::Found(route) => Some(route),
            _ => None,
        }
    }

    /// The cell path, empty unless found.
    pub fn cells(&self) -> &[Point] {
        match self.route() {
            Some(route) => route.cells(),
            None => &[],
        }
    }

    pub fn into_cells(self) -> Vec<Point> {
        match self {
            Self::Found(route) => route.into_cells(),
            _ => Vec::new(),
        }
    }
}

/// Jump Point Search planner.
///
/// A planner keeps its scratch tables between searches so repeated queries
/// on the same grid do not reallocate. It borrows the grid only for the
/// duration of a call.
#[derive(Debug, Default)]
pub struct JumpPlanner {
    state: SearchState,
    jump_points: Vec<Point>,
    iterations: u32,
}

impl JumpPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search state of the last search.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Cells popped from the open set during the last search.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Cell path between two world points; empty if there is none.
    pub fn find_path(
        &mut self,
        grid: &GridMap,
        start: Vec2,
        goal: Vec2,
        mode: MovementMode,
    ) -> Result<Vec<Point>, SearchError> {
        Ok(self.search(grid, start, goal, mode)?.into_cells())
    }

    /// Search between two world points.
    pub fn search(
        &mut self,
        grid: &GridMap,
        start: Vec2,
        goal: Vec2,
        mode: MovementMode,
    ) -> Result<SearchOutcome, SearchError> {
        let (Some(start), Some(goal)) = (grid.cell_of(start), grid.cell_of(goal)) else {
            self.iterations = 0;
            log::debug!("search: {start} -> {goal} is outside the map");
            return Ok(SearchOutcome::OutOfMap);
        };
        self.search_cells(grid, start, goal, mode)
    }

    /// Search between two cells.
    pub fn search_cells(
        &mut self,
        grid: &GridMap,
        start: Point,
        goal: Point,
        mode: MovementMode,
    ) -> Result<SearchOutcome, SearchError> {
        self.iterations = 0;
        if !grid.contains(start) || !grid.contains(goal) {
            return Ok(SearchOutcome::OutOfMap);
        }
        if grid.is_fixed_obstacle(start) {
            log::debug!("search: start {start} is blocked");
            return Ok(SearchOutcome::StartBlocked);
        }
        if start == goal {
            return Ok(SearchOutcome::Found(Route::single(start)));
        }

        let cost_model = match mode {
            MovementMode::Orthogonal => CostModel::Manhattan,
            MovementMode::WithDiagonals => grid.cost_model(),
        };
        self.state.reset(grid, start, goal, cost_model)?;
        let limit = grid.search_limit();
        log::debug!("search: {start} -> {goal} ({mode:?}, limit {limit})");

        let mut current = start;
        loop {
            self.state.close(grid, current)?;
            self.jump_points.clear();
            log::trace!("search: expanding {current}, {} open", self.state.open_len());

            if scan_cardinal(grid, current, goal, &ALL_AXES, &mut self.jump_points) == Scan::Goal {
                break;
            }
            match scan_diagonals(grid, current, goal, &mut self.jump_points) {
                DiagonalScan::Goal => break,
                // `via` cannot be closed: its own expansion probed every
                // cardinal direction and would have met the goal already.
                DiagonalScan::GoalVia(via) => {
                    self.state.try_open(grid, via, current)?;
                    self.state.remove(grid, via)?;
                    current = via;
                    break;
                }
                DiagonalScan::Exhausted => {}
            }

            for &jp in &self.jump_points {
                if !self.state.is_closed(grid, jp) {
                    self.state.try_open(grid, jp, current)?;
                }
            }

            let Some(next) = self.state.pop_min() else {
                log::debug!("search: no path after {} iterations", self.iterations);
                return Ok(SearchOutcome::Unreachable);
            };
            current = next;
            self.iterations += 1;
            if self.iterations > limit {
                log::warn!("search: gave up after {limit} iterations");
                return Ok(SearchOutcome::LimitExceeded);
            }
        }

        let jump_points = self.chain(grid, current, goal);
        let cells = interpolate(grid, &jump_points, mode);
        log::debug!(
            "search: found {} cells via {} jump points in {} iterations",
            cells.len(),
            jump_points.len(),
            self.iterations
        );
        Ok(SearchOutcome::Found(Route { jump_points, cells }))
    }

    /// Follow parent links back from `last`, then append `goal`.
    fn chain(&self, grid: &GridMap, last: Point, goal: Point) -> Vec<Point> {
        let mut chain = vec![goal];
        if last != goal {
            chain.push(last);
        }
        let mut p = last;
        while let Some(parent) = self.state.parent(grid, p) {
            chain.push(parent);
            p = parent;
        }
        chain.reverse();
        chain
    }
}

/// Expand a jump-point chain into single steps.
///
/// In orthogonal mode each diagonal step becomes two, turning through the
/// horizontal neighbour when it is clear and the vertical one otherwise.
fn interpolate(grid: &GridMap, jump_points: &[Point], mode: MovementMode) -> Vec<Point> {
    let Some((&first, rest)) = jump_points.split_first() else {
        return Vec::new();
    };
    let mut cells = vec![first];
    let mut c = first;
    for &target in rest {
        while c != target {
            let step = (target - c).signum();
            if step.is_diagonal() && mode == MovementMode::Orthogonal {
                let across = c.shift(step.x, 0);
                let corner = if grid.is_clear(across) {
                    across
                } else {
                    c.shift(0, step.y)
                };
                cells.push(corner);
            }
            c = c + step;
            cells.push(c);
        }
    }
    cells
}
