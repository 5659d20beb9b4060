use std::fmt;

use jumpgrid_core::Point;

/// Errors that can occur when building a [`GridMap`](crate::GridMap).
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Cell size is zero, negative or not finite.
    InvalidCellSize(f64),
    /// Map width or height is zero, negative or not finite.
    InvalidMapSize { width: f64, height: f64 },
    /// The cell table would not be addressable.
    MapTooLarge { columns: f64, rows: f64 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellSize(s) => write!(f, "grid: invalid cell size {s}"),
            Self::InvalidMapSize { width, height } => {
                write!(f, "grid: invalid map size {width}x{height}")
            }
            Self::MapTooLarge { columns, rows } => {
                write!(f, "grid: {columns}x{rows} cells is too large")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Broken search-state invariants. These never result from caller input;
/// an unreachable goal is reported through
/// [`SearchOutcome`](crate::SearchOutcome) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// A cell outside the cell table was opened or closed.
    NotInMap(Point),
    /// A cell was closed twice in one search.
    AlreadyClosed(Point),
    /// A cell was removed from the open set without being in it.
    NotOpen(Point),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInMap(p) => write!(f, "search: cell {p} is not in the map"),
            Self::AlreadyClosed(p) => write!(f, "search: cell {p} is already closed"),
            Self::NotOpen(p) => write!(f, "search: cell {p} is not in the open set"),
        }
    }
}

impl std::error::Error for SearchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_cell() {
        let e = SearchError::AlreadyClosed(Point::new(3, 4));
        assert_eq!(e.to_string(), "search: cell (3, 4) is already closed");
        assert_eq!(
            GridError::InvalidCellSize(0.0).to_string(),
            "grid: invalid cell size 0"
        );
    }
}
