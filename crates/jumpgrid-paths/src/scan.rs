//! Forced-neighbour rules and the cardinal jump scan.

use jumpgrid_core::Point;

use crate::grid::GridMap;

pub const UP: Point = Point::new(0, 1);
pub const RIGHT: Point = Point::new(1, 0);
pub const DOWN: Point = Point::new(0, -1);
pub const LEFT: Point = Point::new(-1, 0);

/// Result of a scan that stops early only when the goal is met.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Scan {
    /// Every cursor ran into a blocked cell.
    Exhausted,
    /// A cursor landed on the goal.
    Goal,
}

/// Forced neighbours of `p` when entered moving along `dir`: clear cells
/// next to `p` that only become worth visiting because an obstacle beside
/// the line of travel hides them from the previous cell.
pub fn forced_neighbors(grid: &GridMap, p: Point, dir: Point) -> impl Iterator<Item = Point> + '_ {
    let (dx, dy) = (dir.x, dir.y);
    let mut candidates = [None; 2];
    if dy == 0 {
        if grid.is_clear(p.shift(dx, 0)) {
            if grid.is_blocked(p.shift(0, -1)) {
                candidates[0] = Some(p.shift(dx, -1));
            }
            if grid.is_blocked(p.shift(0, 1)) {
                candidates[1] = Some(p.shift(dx, 1));
            }
        }
    } else if dx == 0 {
        if grid.is_clear(p.shift(0, dy)) {
            if grid.is_blocked(p.shift(-1, 0)) {
                candidates[0] = Some(p.shift(-1, dy));
            }
            if grid.is_blocked(p.shift(1, 0)) {
                candidates[1] = Some(p.shift(1, dy));
            }
        }
    } else {
        if grid.is_clear(p.shift(0, dy)) && grid.is_blocked(p.shift(-dx, 0)) {
            candidates[0] = Some(p.shift(-dx, dy));
        }
        if grid.is_clear(p.shift(dx, 0)) && grid.is_blocked(p.shift(0, -dy)) {
            candidates[1] = Some(p.shift(dx, -dy));
        }
    }
    candidates
        .into_iter()
        .flatten()
        .filter(move |&c| grid.is_clear(c))
}

#[inline]
pub fn has_forced_neighbor(grid: &GridMap, p: Point, dir: Point) -> bool {
    forced_neighbors(grid, p, dir).next().is_some()
}

#[derive(Copy, Clone, Debug)]
struct Cursor {
    pos: Point,
    dir: Point,
    active: bool,
}

/// Scan straight out of `origin` along the axis components of `dirs`.
///
/// `(1, 1)` enables the up and right cursors, `(-1, -1)` down and left, and
/// so on. The enabled cursors advance one cell at a time in lock-step. A
/// cursor stops on a blocked cell; a cursor on a clear cell with a forced
/// neighbour pushes that cell onto `jump_points` and keeps going. The scan
/// returns as soon as any cursor reaches `goal`, even if the goal cell is
/// blocked.
pub fn scan_cardinal(
    grid: &GridMap,
    origin: Point,
    goal: Point,
    dirs: &[Point],
    jump_points: &mut Vec<Point>,
) -> Scan {
    let mut cursors = [UP, RIGHT, DOWN, LEFT].map(|dir| Cursor {
        pos: origin,
        dir,
        active: false,
    });
    for d in dirs {
        cursors[0].active |= d.y == 1;
        cursors[1].active |= d.x == 1;
        cursors[2].active |= d.y == -1;
        cursors[3].active |= d.x == -1;
    }

    while cursors.iter().any(|c| c.active) {
        for c in cursors.iter_mut().filter(|c| c.active) {
            c.pos = c.pos + c.dir;
            if c.pos == goal {
                return Scan::Goal;
            }
            if grid.is_blocked(c.pos) {
                c.active = false;
            } else if has_forced_neighbor(grid, c.pos, c.dir) {
                jump_points.push(c.pos);
            }
        }
    }
    Scan::Exhausted
}
