//! Stage geometry resource (платформы сцены).

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

use super::{LayerMask, OverlapQuery, Shape2d};

/// Static collider of the stage.
#[derive(Debug, Clone, Copy)]
pub struct StageCollider {
    pub bounds: Aabb2d,
    pub layers: LayerMask,
}

impl StageCollider {
    pub fn platform(center: Vec2, size: Vec2) -> Self {
        Self {
            bounds: Aabb2d::new(center, size * 0.5),
            layers: LayerMask::GROUND,
        }
    }

    pub fn top(&self) -> f32 {
        self.bounds.max.y
    }

    /// Horizontal overlap with the open interval (min_x, max_x).
    pub fn spans(&self, min_x: f32, max_x: f32) -> bool {
        min_x < self.bounds.max.x && max_x > self.bounds.min.x
    }
}

/// Static stage geometry. Hits are collider indices.
#[derive(Resource, Debug, Clone, Default)]
pub struct StageGeometry {
    colliders: Vec<StageCollider>,
}

impl StageGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single main platform whose top surface sits at y = 0.
    pub fn flat(width: f32) -> Self {
        Self::new().with_platform(Vec2::new(0.0, -0.5), Vec2::new(width, 1.0))
    }

    pub fn with_platform(mut self, center: Vec2, size: Vec2) -> Self {
        self.colliders.push(StageCollider::platform(center, size));
        self
    }

    pub fn colliders(&self) -> &[StageCollider] {
        &self.colliders
    }

    /// Highest ground surface under `x` within `max_distance` below `from_y`.
    pub fn ground_top_below(&self, x: f32, from_y: f32, max_distance: f32) -> Option<f32> {
        self.colliders
            .iter()
            .filter(|c| c.layers.intersects(LayerMask::GROUND))
            .filter(|c| x >= c.bounds.min.x && x <= c.bounds.max.x)
            .map(StageCollider::top)
            .filter(|top| *top <= from_y && from_y - *top <= max_distance)
            .fold(None, |best: Option<f32>, top| Some(best.map_or(top, |b| b.max(top))))
    }
}

impl OverlapQuery for StageGeometry {
    type Hit = usize;

    fn overlap_shape(&self, shape: &Shape2d, filter: LayerMask) -> Vec<usize> {
        self.colliders
            .iter()
            .enumerate()
            .filter(|(_, c)| c.layers.intersects(filter) && shape.intersects_aabb(&c.bounds))
            .map(|(index, _)| index)
            .collect()
    }
}
