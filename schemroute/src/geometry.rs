//! Plane geometry shared by the netlist and routing code.
//!
//! Coordinates are caller-defined grid units. Comparisons are exact: the
//! engine assumes every coordinate has already been snapped to a common grid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the schematic canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance, which is also the length of an axis-aligned segment.
    pub fn manhattan(&self, other: &Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// True when the segment to `other` is horizontal or vertical.
    pub fn is_aligned_with(&self, other: &Point) -> bool {
        self.x == other.x || self.y == other.y
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Quarter-turn rotation of a placed instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    /// Rotate a symbol-local point about the symbol origin.
    pub fn apply(self, p: Point) -> Point {
        match self {
            Rotation::R0 => p,
            Rotation::R90 => Point::new(-p.y, p.x),
            Rotation::R180 => Point::new(-p.x, -p.y),
            Rotation::R270 => Point::new(p.y, -p.x),
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(deg: u16) -> Result<Self, Self::Error> {
        match deg {
            0 => Ok(Rotation::R0),
            90 => Ok(Rotation::R90),
            180 => Ok(Rotation::R180),
            270 => Ok(Rotation::R270),
            other => Err(format!("invalid rotation {other}, expected 0, 90, 180 or 270")),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(r: Rotation) -> Self {
        r.degrees()
    }
}

/// Symbol-local bounding box in origin + size form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BBox {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.w > 0.0) || !(self.h > 0.0)
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BBox) -> BBox {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = (self.x + self.w).max(other.x + other.w);
        let max_y = (self.y + self.h).max(other.y + other.h);
        BBox::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }
}

/// Axis-aligned rectangle in min/max form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Grow the rectangle by `margin` on every side.
    pub fn expand(&self, margin: f64) -> Rect {
        Rect::new(
            self.min_x - margin,
            self.min_y - margin,
            self.max_x + margin,
            self.max_y + margin,
        )
    }

    /// Rotate the rectangle about the origin and return the enclosing box.
    pub fn rotated(&self, rotation: Rotation) -> Rect {
        let a = rotation.apply(Point::new(self.min_x, self.min_y));
        let b = rotation.apply(Point::new(self.max_x, self.max_y));
        Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    pub fn translated(&self, offset: Point) -> Rect {
        Rect::new(
            self.min_x + offset.x,
            self.min_y + offset.y,
            self.max_x + offset.x,
            self.max_y + offset.y,
        )
    }

    /// Strict interior test; points on the boundary are outside.
    pub fn contains_strict(&self, p: &Point) -> bool {
        p.x > self.min_x && p.x < self.max_x && p.y > self.min_y && p.y < self.max_y
    }

    /// Does the axis-aligned segment `a`–`b` pass through the open interior?
    ///
    /// Segments running along an edge or ending on the boundary do not count.
    /// Diagonal segments are always reported as crossing.
    pub fn segment_crosses(&self, a: &Point, b: &Point) -> bool {
        if a.y == b.y {
            let (lo, hi) = (a.x.min(b.x), a.x.max(b.x));
            a.y > self.min_y && a.y < self.max_y && lo < self.max_x && hi > self.min_x
        } else if a.x == b.x {
            let (lo, hi) = (a.y.min(b.y), a.y.max(b.y));
            a.x > self.min_x && a.x < self.max_x && lo < self.max_y && hi > self.min_y
        } else {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_quarter_turns() {
        let p = Point::new(30.0, 5.0);
        assert_eq!(Rotation::R0.apply(p), Point::new(30.0, 5.0));
        assert_eq!(Rotation::R90.apply(p), Point::new(-5.0, 30.0));
        assert_eq!(Rotation::R180.apply(p), Point::new(-30.0, -5.0));
        assert_eq!(Rotation::R270.apply(p), Point::new(5.0, -30.0));
    }

    #[test]
    fn test_rotation_serde() {
        let r: Rotation = serde_json::from_str("270").unwrap();
        assert_eq!(r, Rotation::R270);
        assert_eq!(serde_json::to_string(&Rotation::R90).unwrap(), "90");
        assert!(serde_json::from_str::<Rotation>("45").is_err());
    }

    #[test]
    fn test_rect_rotated_swaps_extent() {
        let r = Rect::new(-20.0, -6.0, 20.0, 6.0).rotated(Rotation::R90);
        assert_eq!(r, Rect::new(-6.0, -20.0, 6.0, 20.0));
    }

    #[test]
    fn test_boundary_is_not_interior() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_strict(&Point::new(5.0, 5.0)));
        assert!(!r.contains_strict(&Point::new(0.0, 5.0)));
        assert!(!r.contains_strict(&Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_segment_crossing() {
        let r = Rect::new(40.0, -20.0, 60.0, 20.0);
        // straight through
        assert!(r.segment_crosses(&Point::new(0.0, 0.0), &Point::new(100.0, 0.0)));
        // along the top edge
        assert!(!r.segment_crosses(&Point::new(0.0, -20.0), &Point::new(100.0, -20.0)));
        // ends on the left edge
        assert!(!r.segment_crosses(&Point::new(0.0, 0.0), &Point::new(40.0, 0.0)));
        // vertical through the middle
        assert!(r.segment_crosses(&Point::new(50.0, -50.0), &Point::new(50.0, 50.0)));
        // vertical beside it
        assert!(!r.segment_crosses(&Point::new(70.0, -50.0), &Point::new(70.0, 50.0)));
    }
}
