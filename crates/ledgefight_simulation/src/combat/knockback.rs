//! Knockback resolver: hit window + target state → launch vector + hitstun.

use bevy::prelude::*;

use crate::actor::ActorState;
use crate::config::ActorTuning;
use crate::movement::{Facing, FighterBody};

use super::{AngleMode, HitWindow};

/// Launch direction (unit vector).
///
/// Priority: Sakurai → Degrees → legacy Vector. Для angle-режимов на
/// grounded цели facing-relative угол поднимается до min_up_degrees_on_ground.
pub fn resolve_direction(window: &HitWindow, attacker_facing: Facing, target_grounded: bool) -> Vec2 {
    let face = attacker_facing.sign();

    let (degrees, relative) = match window.angle {
        AngleMode::Sakurai { ground_deg, air_deg } => {
            (if target_grounded { ground_deg } else { air_deg }, true)
        }
        AngleMode::Degrees { deg, relative_to_facing } => (deg, relative_to_facing),
        AngleMode::Vector { x, y } => {
            // legacy: без ground clamp
            let legacy = Vec2::new(x * face, y);
            return legacy.try_normalize().unwrap_or(Vec2::new(face, 0.0));
        }
    };

    let facing_sign = if relative { face } else { 1.0 };
    let mut dir = direction_from_angle(degrees, facing_sign);

    if target_grounded && window.min_up_degrees_on_ground > 0.0 {
        // угол в forward-relative системе: x разворачиваем обратно
        let relative_deg = dir.y.atan2(dir.x * facing_sign).to_degrees();
        if relative_deg < window.min_up_degrees_on_ground {
            dir = direction_from_angle(window.min_up_degrees_on_ground, facing_sign);
        }
    }

    dir
}

/// Unit vector for `degrees`, x mirrored by `facing_sign`.
pub fn direction_from_angle(degrees: f32, facing_sign: f32) -> Vec2 {
    let rad = degrees.to_radians();
    let dir = Vec2::new(rad.cos() * facing_sign, rad.sin());
    dir.try_normalize().unwrap_or(Vec2::new(facing_sign, 0.0))
}

/// (base + percent·growth)·scale. Percent must already include this hit's damage.
pub fn knockback_magnitude(base: f32, growth: f32, percent: f32, scale: f32) -> f32 {
    (base + percent * growth) * scale
}

/// magnitude·seconds_per_kb clamped to [min, max]; max = 0 → no upper clamp.
pub fn hitstun_seconds(magnitude: f32, tuning: &ActorTuning) -> f32 {
    let raw = magnitude * tuning.hitstun_seconds_per_kb;
    let clamped = raw.max(tuning.min_hitstun);
    if tuning.max_hitstun > 0.0 {
        clamped.min(tuning.max_hitstun)
    } else {
        clamped
    }
}

/// Result of one applied knockback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnockbackOutcome {
    pub velocity: Vec2,
    pub magnitude: f32,
    pub hitstun_seconds: f32,
}

/// Replace the target velocity with `dir · magnitude` and start hitstun.
///
/// `dir` is normalised here; zero direction → no launch, hitstun still applies.
pub fn apply_knockback(
    body: &mut FighterBody,
    actor: &mut ActorState,
    dir: Vec2,
    base: f32,
    growth: f32,
    tuning: &ActorTuning,
) -> KnockbackOutcome {
    let magnitude = knockback_magnitude(base, growth, actor.percent(), tuning.knockback_scale);

    body.velocity = dir.normalize_or_zero() * magnitude;
    if body.locks.hard_locked() {
        body.velocity.x = 0.0;
    }

    let hitstun = hitstun_seconds(magnitude, tuning);
    actor.set_hitstun(hitstun);

    KnockbackOutcome {
        velocity: body.velocity,
        magnitude,
        hitstun_seconds: hitstun,
    }
}

/// Full hit on a target: damage first, then direction + knockback.
pub fn resolve_hit(
    window: &HitWindow,
    attacker_facing: Facing,
    body: &mut FighterBody,
    actor: &mut ActorState,
    tuning: &ActorTuning,
) -> KnockbackOutcome {
    actor.add_damage(window.damage);

    let dir = resolve_direction(window, attacker_facing, body.grounded);
    apply_knockback(body, actor, dir, window.base_knockback, window.growth, tuning)
}
