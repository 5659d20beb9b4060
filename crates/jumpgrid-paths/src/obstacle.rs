use jumpgrid_core::{Size, Vec2};

/// Obstacles whose area is below this are ignored when marking.
pub const MIN_OBSTACLE_AREA: f64 = 2.0;

/// A world-space box that blocks every cell it overlaps.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Obstacle {
    /// World position of the anchor point.
    pub position: Vec2,
    pub size: Size,
    /// Fraction of `size` between the box's min corner and `position`.
    pub anchor: Vec2,
    /// Rotation in degrees. Only quarter turns (±90, ±270) change the
    /// footprint, by exchanging width and height.
    pub rotation: f64,
}

impl Obstacle {
    /// Unrotated box whose min corner sits at `position`.
    pub fn new(position: Vec2, size: Size) -> Self {
        Self {
            position,
            size,
            ..Self::default()
        }
    }

    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Too small to be rasterized.
    pub fn is_negligible(&self) -> bool {
        self.size.area() < MIN_OBSTACLE_AREA
    }

    /// Axis-aligned world bounds `(min, max)` of the box.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let size = if self.is_quarter_turn() {
            self.size.transposed()
        } else {
            self.size
        };
        let min = self.position - size.scale(self.anchor);
        let max = min + Vec2::new(size.width, size.height);
        (min, max)
    }

    fn is_quarter_turn(&self) -> bool {
        let r = self.rotation.abs();
        r == 90.0 || r == 270.0
    }
}
