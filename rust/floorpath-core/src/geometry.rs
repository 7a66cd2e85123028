//! Plane geometry shared by the index, the graph and the picker.

use serde::{Deserialize, Serialize};

/// A map-space position. Serialized as `[x, y]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Coord) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Coord {
    fn from(v: [f64; 2]) -> Self {
        Coord { x: v[0], y: v[1] }
    }
}

impl From<Coord> for [f64; 2] {
    fn from(c: Coord) -> Self {
        [c.x, c.y]
    }
}

/// Axis-aligned box given by its center and half extents.
///
/// Containment is inclusive on every edge, so a point lying exactly on the
/// boundary belongs to the box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Coord,
    pub half: Coord,
}

impl Aabb {
    pub const fn new(center: Coord, half: Coord) -> Self {
        Self { center, half }
    }

    /// Square window of side `2 * half` around `center`.
    pub fn square(center: Coord, half: f64) -> Self {
        Self { center, half: Coord::new(half, half) }
    }

    pub fn min(&self) -> Coord {
        Coord::new(self.center.x - self.half.x, self.center.y - self.half.y)
    }

    pub fn max(&self) -> Coord {
        Coord::new(self.center.x + self.half.x, self.center.y + self.half.y)
    }

    /// NaN coordinates are never contained.
    pub fn contains(&self, p: Coord) -> bool {
        let (lo, hi) = (self.min(), self.max());
        p.x >= lo.x && p.x <= hi.x && p.y >= lo.y && p.y <= hi.y
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        (self.center.x - other.center.x).abs() <= self.half.x + other.half.x
            && (self.center.y - other.center.y).abs() <= self.half.y + other.half.y
    }

    /// Quadrant slot of `p` relative to the center: bit 0 = east, bit 1 = north.
    /// Points on a dividing line go east / north.
    #[inline]
    pub fn quadrant_of(&self, p: Coord) -> usize {
        let east = (p.x >= self.center.x) as usize;
        let north = (p.y >= self.center.y) as usize;
        (north << 1) | east
    }

    /// The four child boxes, indexed like [`Aabb::quadrant_of`].
    pub fn quadrants(&self) -> [Aabb; 4] {
        let h = Coord::new(self.half.x / 2.0, self.half.y / 2.0);
        let c = self.center;
        [
            Aabb::new(Coord::new(c.x - h.x, c.y - h.y), h),
            Aabb::new(Coord::new(c.x + h.x, c.y - h.y), h),
            Aabb::new(Coord::new(c.x - h.x, c.y + h.y), h),
            Aabb::new(Coord::new(c.x + h.x, c.y + h.y), h),
        ]
    }
}

/// Vertex average of an outline, used as a room's routing anchor.
/// Returns `None` for an empty outline instead of dividing by zero.
pub fn centroid(vertices: &[Coord]) -> Option<Coord> {
    if vertices.is_empty() {
        return None;
    }
    let n = vertices.len() as f64;
    let (sx, sy) = vertices.iter().fold((0.0, 0.0), |(sx, sy), v| (sx + v.x, sy + v.y));
    Some(Coord::new(sx / n, sy / n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Coord::new(0.0, 0.0);
        let b = Coord::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn contains_is_inclusive_and_rejects_nan() {
        let b = Aabb::square(Coord::new(0.0, 0.0), 10.0);
        assert!(b.contains(Coord::new(10.0, -10.0)));
        assert!(!b.contains(Coord::new(10.0001, 0.0)));
        assert!(!b.contains(Coord::new(f64::NAN, 0.0)));
    }

    #[test]
    fn quadrants_cover_parent() {
        let b = Aabb::square(Coord::new(5.0, 5.0), 4.0);
        let qs = b.quadrants();
        for p in [Coord::new(1.0, 1.0), Coord::new(9.0, 1.0), Coord::new(1.0, 9.0), Coord::new(5.0, 5.0)] {
            let q = b.quadrant_of(p);
            assert!(qs[q].contains(p), "{:?} not in quadrant {}", p, q);
        }
    }

    #[test]
    fn intersects_touching_boxes() {
        let a = Aabb::square(Coord::new(0.0, 0.0), 1.0);
        let b = Aabb::square(Coord::new(2.0, 0.0), 1.0);
        let c = Aabb::square(Coord::new(2.5, 0.0), 1.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn centroid_of_square_and_empty() {
        let sq = [
            Coord::new(0.0, 0.0),
            Coord::new(2.0, 0.0),
            Coord::new(2.0, 2.0),
            Coord::new(0.0, 2.0),
        ];
        assert_eq!(centroid(&sq), Some(Coord::new(1.0, 1.0)));
        assert_eq!(centroid(&[]), None);
    }

    #[test]
    fn coord_serializes_as_pair() {
        let v = serde_json::to_value(Coord::new(1.5, -2.0)).unwrap();
        assert_eq!(v, serde_json::json!([1.5, -2.0]));
        let c: Coord = serde_json::from_value(serde_json::json!([3.0, 4.0])).unwrap();
        assert_eq!(c, Coord::new(3.0, 4.0));
    }
}
