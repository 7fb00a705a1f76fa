//! Axis-aligned overlap tests
//!
//! Every gameplay entity is an axis-aligned square anchored at its top-left corner.

use glam::Vec2;

/// An axis-aligned square hit-box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    /// Top-left corner
    pub pos: Vec2,
    /// Side length
    pub size: f32,
}

impl Square {
    pub const fn new(pos: Vec2, size: f32) -> Self {
        Self { pos, size }
    }

    /// Bottom-right corner
    pub fn max(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size)
    }
}

/// True when both the x-ranges and the y-ranges of the squares intersect.
///
/// Ranges are half-open, so squares that only share an edge do not overlap.
pub fn overlaps(a: &Square, b: &Square) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    a.pos.x < b_max.x && a_max.x > b.pos.x && a.pos.y < b_max.y && a_max.y > b.pos.y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(x: f32, y: f32, size: f32) -> Square {
        Square::new(Vec2::new(x, y), size)
    }

    #[test]
    fn test_disjoint_squares_miss() {
        assert!(!overlaps(&sq(0.0, 0.0, 40.0), &sq(100.0, 0.0, 40.0)));
        assert!(!overlaps(&sq(0.0, 0.0, 40.0), &sq(0.0, 100.0, 40.0)));
        // Overlapping on x only
        assert!(!overlaps(&sq(0.0, 0.0, 40.0), &sq(20.0, 60.0, 40.0)));
    }

    #[test]
    fn test_edge_touching_is_not_a_hit() {
        assert!(!overlaps(&sq(0.0, 0.0, 40.0), &sq(40.0, 0.0, 40.0)));
        assert!(!overlaps(&sq(0.0, 0.0, 40.0), &sq(0.0, 40.0, 40.0)));
        assert!(!overlaps(&sq(0.0, 0.0, 40.0), &sq(40.0, 40.0, 40.0)));
    }

    #[test]
    fn test_partial_overlap_hits() {
        assert!(overlaps(&sq(0.0, 0.0, 40.0), &sq(39.0, 39.0, 40.0)));
        assert!(overlaps(&sq(39.0, 39.0, 40.0), &sq(0.0, 0.0, 40.0)));
    }

    #[test]
    fn test_contained_square_hits() {
        let outer = sq(0.0, 0.0, 100.0);
        let inner = sq(30.0, 30.0, 10.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_identical_squares_hit() {
        assert!(overlaps(&sq(5.0, 5.0, 40.0), &sq(5.0, 5.0, 40.0)));
    }
}
