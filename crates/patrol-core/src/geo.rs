//! Planar coordinate type and movement helpers.
//!
//! The inspection network lives in a flat Cartesian plane (survey coordinates,
//! not lat/lon), so `Point2` uses `f64` components and plain Euclidean
//! distance.  Edge lengths, battery budgets, and per-tick travel all use the
//! same unit, whatever the survey chose.

/// A point in the planar survey coordinate system.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point2) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Move up to `max_step` units toward `target`, never overshooting.
    ///
    /// If `self` already coincides with `target` (zero direction vector) the
    /// point is returned unchanged rather than producing NaN components.
    pub fn step_toward(self, target: Point2, max_step: f64) -> Point2 {
        let d = self.distance(target);
        if d <= max_step || d == 0.0 {
            return target;
        }
        let scale = max_step / d;
        Point2 {
            x: self.x + (target.x - self.x) * scale,
            y: self.y + (target.y - self.y) * scale,
        }
    }
}

impl std::fmt::Display for Point2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
