//! Ground probe (point circle или auto box под коллайдером).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::{LayerMask, OverlapQuery, Shape2d};

/// Body collider of a fighter: box centred on `FighterBody::position`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BodyCollider {
    pub half_extents: Vec2,
}

impl Default for BodyCollider {
    fn default() -> Self {
        Self {
            half_extents: Vec2::new(0.4, 0.5),
        }
    }
}

impl BodyCollider {
    pub fn bottom(&self, position: Vec2) -> f32 {
        position.y - self.half_extents.y
    }
}

/// Probe geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeMode {
    /// Circle at `position + offset`
    Point { offset: Vec2, radius: f32 },
    /// Thin box right under the collider bottom edge
    AutoBox { skin: f32, width_multiplier: f32 },
}

impl Default for ProbeMode {
    fn default() -> Self {
        ProbeMode::AutoBox {
            skin: 0.04,
            width_multiplier: 0.9,
        }
    }
}

/// Ground probe component. Stateless: grounded = overlap(shape, layer).
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct GroundProbe {
    pub mode: ProbeMode,
    pub layer: LayerMask,
}

impl GroundProbe {
    pub fn new(mode: ProbeMode) -> Self {
        Self {
            mode,
            layer: LayerMask::GROUND,
        }
    }

    pub fn shape(&self, position: Vec2, collider: &BodyCollider) -> Shape2d {
        match self.mode {
            ProbeMode::Point { offset, radius } => Shape2d::circle(position + offset, radius),
            ProbeMode::AutoBox {
                skin,
                width_multiplier,
            } => {
                let width = collider.half_extents.x * 2.0 * width_multiplier.clamp(0.5, 1.2);
                let center = Vec2::new(position.x, collider.bottom(position) - skin * 0.5);
                Shape2d::rect(center, Vec2::new(width, skin))
            }
        }
    }

    /// Half width of the area the probe can stand on (used when snapping onto platforms).
    pub fn support_half_width(&self, collider: &BodyCollider) -> f32 {
        match self.mode {
            ProbeMode::Point { offset, radius } => (offset.x.abs() + radius).min(collider.half_extents.x),
            ProbeMode::AutoBox { width_multiplier, .. } => {
                collider.half_extents.x * width_multiplier.clamp(0.5, 1.2)
            }
        }
    }

    pub fn is_grounded<Q: OverlapQuery>(&self, position: Vec2, collider: &BodyCollider, query: &Q) -> bool {
        query.overlaps_any(&self.shape(position, collider), self.layer)
    }
}
