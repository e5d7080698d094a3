//! Hurtboxes + per-tick hurtbox snapshot (geometry collaborator for hits).
//!
//! Hit detection читает snapshot, снятый в конце ПРЕДЫДУЩЕГО тика, поэтому
//! результат не зависит от порядка обработки бойцов.

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

use crate::movement::FighterBody;
use crate::physics::{LayerMask, OverlapQuery, Shape2d};

/// Vulnerable region of a fighter (box relative to `FighterBody::position`).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Hurtbox {
    pub offset: Vec2,
    pub half_extents: Vec2,
}

impl Default for Hurtbox {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            half_extents: Vec2::new(0.4, 0.5),
        }
    }
}

impl Hurtbox {
    pub fn bounds(&self, position: Vec2) -> Aabb2d {
        Aabb2d::new(position + self.offset, self.half_extents)
    }
}

/// Hurtbox bounds of every fighter, sorted by entity.
#[derive(Resource, Debug, Clone, Default)]
pub struct HurtboxSnapshot {
    entries: Vec<(Entity, Aabb2d)>,
}

impl HurtboxSnapshot {
    pub fn from_entries(mut entries: Vec<(Entity, Aabb2d)>) -> Self {
        entries.sort_by_key(|(entity, _)| *entity);
        Self { entries }
    }

    pub fn entries(&self) -> &[(Entity, Aabb2d)] {
        &self.entries
    }
}

impl OverlapQuery for HurtboxSnapshot {
    type Hit = Entity;

    fn overlap_shape(&self, shape: &Shape2d, filter: LayerMask) -> Vec<Entity> {
        if !filter.intersects(LayerMask::HURTBOX) {
            return Vec::new();
        }

        self.entries
            .iter()
            .filter(|(_, bounds)| shape.intersects_aabb(bounds))
            .map(|(entity, _)| *entity)
            .collect()
    }
}

/// System: rebuild the hurtbox snapshot (last geometry system of the tick).
pub fn snapshot_hurtboxes(
    mut snapshot: ResMut<HurtboxSnapshot>,
    fighters: Query<(Entity, &FighterBody, &Hurtbox)>,
) {
    let entries = fighters
        .iter()
        .map(|(entity, body, hurtbox)| (entity, hurtbox.bounds(body.position)))
        .collect();

    *snapshot = HurtboxSnapshot::from_entries(entries);
}
