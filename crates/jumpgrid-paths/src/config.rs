use jumpgrid_core::{Size, Vec2};

use crate::obstacle::Obstacle;

/// Iteration cap applied when a map does not configure its own.
pub const DEFAULT_SEARCH_LIMIT: u32 = 666;

/// How G and H are accumulated while searching.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CostModel {
    /// `10 * |dx| + 10 * |dy|` per segment, Manhattan heuristic.
    ///
    /// A diagonal step costs 20, the same as the two-step staircase it
    /// replaces.
    #[default]
    Manhattan,
    /// 10 per orthogonal unit and 14 per diagonal unit, octile heuristic.
    Octile,
}

/// Which moves the planner may place on the returned cell path.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementMode {
    /// Four-way movement. Diagonal runs found by the scanners are walked as
    /// staircases through a clear corner cell.
    Orthogonal,
    /// Eight-way movement.
    #[default]
    WithDiagonals,
}

/// Describes the world-space rectangle covered by a grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapDescriptor {
    /// World position of the anchor point.
    pub position: Vec2,
    pub size: Size,
    /// Fraction of `size` between the map's min corner and `position`.
    pub anchor: Vec2,
    /// Edge length of a square cell.
    pub cell_size: f64,
    /// Iteration cap; `None` or zero selects [`DEFAULT_SEARCH_LIMIT`].
    pub search_limit: Option<u32>,
    pub cost_model: CostModel,
}

impl Default for MapDescriptor {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            size: Size::default(),
            anchor: Vec2::ZERO,
            cell_size: 1.0,
            search_limit: None,
            cost_model: CostModel::default(),
        }
    }
}

impl MapDescriptor {
    /// Map whose min corner sits at `origin`.
    pub fn new(origin: Vec2, size: Size, cell_size: f64) -> Self {
        Self {
            position: origin,
            size,
            cell_size,
            ..Self::default()
        }
    }

    /// Map covering the footprint of a scene object. Rotation is ignored.
    pub fn from_footprint(footprint: &Obstacle, cell_size: f64) -> Self {
        Self {
            position: footprint.position,
            size: footprint.size,
            anchor: footprint.anchor,
            cell_size,
            ..Self::default()
        }
    }

    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_search_limit(mut self, limit: u32) -> Self {
        self.search_limit = Some(limit);
        self
    }

    pub fn with_cost_model(mut self, model: CostModel) -> Self {
        self.cost_model = model;
        self
    }

    /// World position of the min corner of cell `(0, 0)`.
    pub fn origin(&self) -> Vec2 {
        self.position - self.size.scale(self.anchor)
    }

    /// The iteration cap searches on this map obey.
    pub fn effective_search_limit(&self) -> u32 {
        match self.search_limit {
            Some(limit) if limit > 0 => limit,
            _ => DEFAULT_SEARCH_LIMIT,
        }
    }
}
