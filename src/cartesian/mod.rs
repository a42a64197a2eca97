//! Cartesian (scatter/line) chart: series data, auto-framing camera and point selection.

pub mod series;
pub mod state;

use bevy_color::Srgba;
use glam::Vec2;

pub use series::{AxisStats, GraphPoint, GraphSeries, SeriesType};
pub use state::CartesianGraphState;

/// Axis-aligned rectangle, `min` <= `max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle spanned by two opposite corners, in any order.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Inclusive of the edges.
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// A shaded area of the chart, in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphRegion {
    pub bounds: Rect,
    pub color: Srgba,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_normalized() {
        let rect = Rect::from_corners(Vec2::new(2.0, -1.0), Vec2::new(-2.0, 3.0));
        assert_eq!(rect.min, Vec2::new(-2.0, -1.0));
        assert_eq!(rect.max, Vec2::new(2.0, 3.0));
        assert_eq!(rect.center(), Vec2::new(0.0, 1.0));
        assert!(rect.contains(Vec2::new(2.0, 3.0)));
        assert!(!rect.contains(Vec2::new(2.1, 0.0)));
    }
}
