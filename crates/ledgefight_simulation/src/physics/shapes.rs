//! Query shapes + geometry collaborator trait.

use bevy::math::bounding::{Aabb2d, BoundingCircle, BoundingVolume, IntersectsVolume};
use bevy::prelude::*;

use super::LayerMask;

/// Shape used for overlap queries (ground probes, hit windows).
#[derive(Debug, Clone, Copy)]
pub enum Shape2d {
    Circle(BoundingCircle),
    Box(Aabb2d),
}

impl Shape2d {
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Shape2d::Circle(BoundingCircle::new(center, radius))
    }

    /// Axis-aligned box from centre and full size.
    pub fn rect(center: Vec2, size: Vec2) -> Self {
        Shape2d::Box(Aabb2d::new(center, size * 0.5))
    }

    pub fn center(&self) -> Vec2 {
        match self {
            Shape2d::Circle(circle) => circle.center(),
            Shape2d::Box(aabb) => aabb.center(),
        }
    }

    /// Touching edges count as overlap.
    pub fn intersects_aabb(&self, other: &Aabb2d) -> bool {
        match self {
            Shape2d::Circle(circle) => circle.intersects(other),
            Shape2d::Box(aabb) => aabb.intersects(other),
        }
    }
}

/// Geometry collaborator: `overlap_shape(shape, layer_filter) -> hits`.
///
/// Pure query. Implementations return hits in a stable order so that
/// callers stay deterministic.
pub trait OverlapQuery {
    type Hit;

    fn overlap_shape(&self, shape: &Shape2d, filter: LayerMask) -> Vec<Self::Hit>;

    fn overlaps_any(&self, shape: &Shape2d, filter: LayerMask) -> bool {
        !self.overlap_shape(shape, filter).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vs_box() {
        let target = Aabb2d::new(Vec2::new(1.0, 0.0), Vec2::splat(0.5));
        assert!(Shape2d::circle(Vec2::ZERO, 0.6).intersects_aabb(&target));
        assert!(!Shape2d::circle(Vec2::ZERO, 0.4).intersects_aabb(&target));
    }

    #[test]
    fn test_rect_touching_counts() {
        let target = Aabb2d::new(Vec2::new(1.0, 0.0), Vec2::splat(0.5));
        // правый край rect ровно на x = 0.5
        assert!(Shape2d::rect(Vec2::ZERO, Vec2::splat(1.0)).intersects_aabb(&target));
        assert!(!Shape2d::rect(Vec2::new(-0.1, 0.0), Vec2::splat(1.0)).intersects_aabb(&target));
    }
}
