//! Diagonal walks out of the cell being expanded.

use jumpgrid_core::Point;

use crate::grid::GridMap;
use crate::scan::{Scan, has_forced_neighbor, scan_cardinal};

/// Walk order of the four diagonals.
pub const DIAGONALS: [Point; 4] = [
    Point::new(1, 1),
    Point::new(1, -1),
    Point::new(-1, -1),
    Point::new(-1, 1),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagonalScan {
    /// No walk met the goal.
    Exhausted,
    /// A diagonal walk stepped onto the goal.
    Goal,
    /// The cardinal scan from this diagonal cell reached the goal.
    GoalVia(Point),
}

/// Walk every diagonal out of `origin`, collecting jump points.
///
/// Stops at the first walk that meets the goal.
pub fn scan_diagonals(
    grid: &GridMap,
    origin: Point,
    goal: Point,
    jump_points: &mut Vec<Point>,
) -> DiagonalScan {
    let mut probe = Vec::new();
    for dir in DIAGONALS {
        match walk(grid, origin, goal, dir, jump_points, &mut probe) {
            DiagonalScan::Exhausted => {}
            hit => return hit,
        }
    }
    DiagonalScan::Exhausted
}

/// One diagonal walk. The walk continues while the current cell is clear
/// and at least one of its two neighbours toward `dir` is clear, so a
/// corner is cut only past a single obstacle.
fn walk(
    grid: &GridMap,
    origin: Point,
    goal: Point,
    dir: Point,
    jump_points: &mut Vec<Point>,
    probe: &mut Vec<Point>,
) -> DiagonalScan {
    let mut p = origin;
    while grid.is_clear(p) && (grid.is_clear(p.shift(0, dir.y)) || grid.is_clear(p.shift(dir.x, 0))) {
        if p != origin {
            if has_forced_neighbor(grid, p, dir) {
                jump_points.push(p);
                break;
            }
            probe.clear();
            match scan_cardinal(grid, p, goal, &[dir], probe) {
                Scan::Goal => return DiagonalScan::GoalVia(p),
                Scan::Exhausted if !probe.is_empty() => jump_points.push(p),
                Scan::Exhausted => {}
            }
        }
        p = p + dir;
        if p == goal {
            return DiagonalScan::Goal;
        }
    }
    DiagonalScan::Exhausted
}
