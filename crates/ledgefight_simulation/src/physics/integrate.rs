//! Kinematic integration: gravity, position, посадка на платформы.
//!
//! Работает ПОСЛЕ controller и hit resolution: velocity этого тика уже
//! финальная, здесь только интегрируем.

use bevy::prelude::*;

use crate::fighter::FighterLoadout;
use crate::movement::FighterBody;
use crate::shared::SimClock;

use super::{BodyCollider, GroundProbe, LayerMask, StageGeometry};

/// Base gravity (m/s²), scaled per fighter by `gravity_scale`.
pub const GRAVITY: f32 = -9.81;

/// One integration step for a single body.
///
/// Gravity only while airborne. A falling body whose bottom edge crosses a
/// platform top this tick is put on that top with velocity.y = 0.
pub fn integrate_body(
    body: &mut FighterBody,
    collider: &BodyCollider,
    support_half_width: f32,
    gravity_scale: f32,
    stage: &StageGeometry,
    dt: f32,
) {
    if !body.grounded {
        body.velocity.y += GRAVITY * gravity_scale * dt;
    }

    let prev_bottom = collider.bottom(body.position);
    body.position += body.velocity * dt;

    if body.velocity.y > 0.0 {
        return;
    }

    let bottom = collider.bottom(body.position);
    let min_x = body.position.x - support_half_width;
    let max_x = body.position.x + support_half_width;

    let landing_top = stage
        .colliders()
        .iter()
        .filter(|c| c.layers.intersects(LayerMask::GROUND) && c.spans(min_x, max_x))
        .map(|c| c.top())
        .filter(|top| *top <= prev_bottom && *top >= bottom)
        .fold(None, |best: Option<f32>, top| Some(best.map_or(top, |b| b.max(top))));

    if let Some(top) = landing_top {
        body.position.y = top + collider.half_extents.y;
        body.velocity.y = 0.0;
    }
}

/// System: integrate every fighter (gravity + position + ground snap).
pub fn integrate_fighters(
    clock: Res<SimClock>,
    stage: Res<StageGeometry>,
    mut fighters: Query<(&FighterLoadout, &BodyCollider, &GroundProbe, &mut FighterBody)>,
) {
    let dt = clock.dt();

    for (loadout, collider, probe, mut body) in fighters.iter_mut() {
        let support = probe.support_half_width(collider);
        integrate_body(&mut body, collider, support, loadout.stats.gravity_scale, &stage, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::Facing;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_airborne_body_falls_and_lands_on_top() {
        let stage = StageGeometry::flat(20.0);
        let collider = BodyCollider::default();
        let mut body = FighterBody::new(Vec2::new(0.0, 1.5), Facing::Right, 2);

        for _ in 0..120 {
            integrate_body(&mut body, &collider, 0.36, 3.5, &stage, DT);
        }

        assert!((body.position.y - 0.5).abs() < 1e-5);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_grounded_body_ignores_gravity() {
        let stage = StageGeometry::flat(20.0);
        let collider = BodyCollider::default();
        let mut body = FighterBody::new(Vec2::new(0.0, 0.5), Facing::Right, 2);
        body.grounded = true;
        body.velocity.x = 6.0;

        integrate_body(&mut body, &collider, 0.36, 3.5, &stage, DT);

        assert_eq!(body.velocity.y, 0.0);
        assert!((body.position.x - 0.1).abs() < 1e-6);
        assert!((body.position.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rising_body_passes_through_platform() {
        // one-way платформы: снизу проходим насквозь
        let stage = StageGeometry::new().with_platform(Vec2::new(0.0, 1.0), Vec2::new(4.0, 0.2));
        let collider = BodyCollider::default();
        let mut body = FighterBody::new(Vec2::new(0.0, 0.5), Facing::Right, 2);
        body.velocity.y = 30.0;

        integrate_body(&mut body, &collider, 0.36, 3.5, &stage, DT);

        assert!(body.velocity.y > 0.0);
        assert!(body.position.y > 0.5);
    }

    #[test]
    fn test_falls_off_ledge() {
        let stage = StageGeometry::flat(4.0);
        let collider = BodyCollider::default();
        let mut body = FighterBody::new(Vec2::new(5.0, 0.5), Facing::Right, 2);

        for _ in 0..30 {
            integrate_body(&mut body, &collider, 0.36, 3.5, &stage, DT);
        }

        assert!(body.position.y < 0.0);
    }
}
