//! Axis-aligned rectangles on a container's open face.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangle in the (width-axis, height-axis) plane, anchored at its
/// lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Bottom edge.
    pub y: f64,
    /// Extent along the width axis.
    pub width: f64,
    /// Extent along the height axis.
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge.
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Returns the area.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Returns true if a `width` x `height` footprint fits inside.
    pub fn can_hold(&self, width: f64, height: f64) -> bool {
        self.width >= width && self.height >= height
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.top()
            && self.top() > other.y
    }

    /// Returns true if `other` lies inside this rectangle (edges may coincide).
    pub fn contains(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.top() <= self.top()
    }

    /// Returns the positive-area intersection, if any.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let top = self.top().min(other.top());

        if right <= x || top <= y {
            return None;
        }

        Some(Self::new(x, y, right - x, top - y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 5.0, 5.0);
        let inside = Rect::new(5.0, 5.0, 10.0, 10.0);

        assert!(!a.overlaps(&touching));
        assert!(!touching.overlaps(&a));
        assert!(a.overlaps(&inside));
    }

    #[test]
    fn test_contains_with_shared_edges() {
        let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(outer.contains(&outer));
        assert!(outer.contains(&Rect::new(0.0, 5.0, 10.0, 5.0)));
        assert!(!outer.contains(&Rect::new(5.0, 5.0, 10.0, 1.0)));
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);

        let i = a.intersection(&b).unwrap();
        assert_relative_eq!(i.x, 5.0);
        assert_relative_eq!(i.area(), 25.0);

        assert!(a.intersection(&Rect::new(10.0, 0.0, 1.0, 1.0)).is_none());
    }
}
