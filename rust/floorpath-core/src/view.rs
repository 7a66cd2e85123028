use serde::{Deserialize, Serialize};

use crate::geometry::Coord;

pub const DEFAULT_VIEW_SCALE: f64 = 0.4;
pub const DEFAULT_VIEW_ORIGIN: Coord = Coord::new(330.0, 90.0);

/// Map ↔ screen transform: `screen = (map - origin) * scale`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scale: f64,
    pub origin: Coord,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { scale: DEFAULT_VIEW_SCALE, origin: DEFAULT_VIEW_ORIGIN }
    }
}

impl Viewport {
    /// `None` unless `scale` is finite and positive.
    pub fn new(scale: f64, origin: Coord) -> Option<Self> {
        (scale.is_finite() && scale > 0.0).then_some(Self { scale, origin })
    }

    pub fn to_map(&self, screen: Coord) -> Coord {
        Coord::new(screen.x / self.scale + self.origin.x, screen.y / self.scale + self.origin.y)
    }

    pub fn to_screen(&self, map: Coord) -> Coord {
        Coord::new((map.x - self.origin.x) * self.scale, (map.y - self.origin.y) * self.scale)
    }
}
