use jumpgrid_core::Point;

use crate::config::CostModel;

/// Cost of one orthogonal unit.
pub const STRAIGHT_COST: i64 = 10;
/// Cost of one diagonal unit under [`CostModel::Octile`].
pub const DIAGONAL_COST: i64 = 14;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Weighted distance between two cells under `model`. Used both as the step
/// cost between a cell and its parent and as the heuristic to the goal.
///
/// Costs are `i64`: ten times the width of a long map does not fit in `i32`.
#[inline]
pub fn weighted(model: CostModel, a: Point, b: Point) -> i64 {
    let dx = (i64::from(a.x) - i64::from(b.x)).abs();
    let dy = (i64::from(a.y) - i64::from(b.y)).abs();
    match model {
        CostModel::Manhattan => STRAIGHT_COST * (dx + dy),
        CostModel::Octile => {
            let diag = dx.min(dy);
            DIAGONAL_COST * diag + STRAIGHT_COST * (dx.max(dy) - diag)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_model_overcounts_diagonals() {
        let a = Point::new(0, 0);
        assert_eq!(weighted(CostModel::Manhattan, a, Point::new(3, 0)), 30);
        assert_eq!(weighted(CostModel::Manhattan, a, Point::new(2, 2)), 40);
    }

    #[test]
    fn octile_model() {
        let a = Point::new(1, 1);
        assert_eq!(weighted(CostModel::Octile, a, Point::new(3, 3)), 28);
        assert_eq!(weighted(CostModel::Octile, a, Point::new(4, 2)), 34);
        assert_eq!(chebyshev(a, Point::new(4, 2)), 3);
        assert_eq!(manhattan(a, Point::new(4, 2)), 4);
    }

    #[test]
    fn costs_across_a_long_row_do_not_overflow() {
        let a = Point::new(0, 0);
        let b = Point::new(i32::MAX - 1, 0);
        let expected = 10 * i64::from(i32::MAX - 1);
        assert_eq!(weighted(CostModel::Manhattan, a, b), expected);
        assert_eq!(weighted(CostModel::Octile, a, b), expected);
        assert_eq!(
            weighted(CostModel::Octile, a, Point::new(i32::MAX - 1, 3)),
            expected - 30 + 42
        );
    }
}
