//! Per-fighter tunables (carry, landing transfer, facing, hit shapes, hitstun).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::physics::ProbeMode;

/// How horizontal speed is handed over on touchdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandingMode {
    #[default]
    ClampOnly,
    BlendToTarget,
}

/// Controller tunables: momentum carry, facing, landing transfer, air control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerTuning {
    // Momentum carry (decaying nudge after takeoff)
    pub inherit_factor: f32,
    pub use_decaying_carry: bool,
    pub carry_duration: f32,
    pub carry_end_factor: f32,
    pub clamp_inherited_to_air_max: bool,
    pub carry_after_apex_time: f32,

    // Jump carry window (hard pin)
    pub preserve_run_speed_during_jump: bool,
    pub release_carry_on_apex: bool,
    pub carry_min_time: f32,
    pub carry_max_time: f32,
    /// 0 → cap at run speed
    pub jump_carry_max_x: f32,

    // Facing
    pub allow_air_facing_flips: bool,
    pub face_by_velocity_when_idle: bool,

    // Landing transfer
    pub enable_landing_transfer: bool,
    pub landing_mode: LandingMode,
    pub landing_blend_time: f32,
    pub landing_clamp_to_ground_max: bool,

    // Air control
    pub air_accel: f32,
    pub air_decel: f32,
}

impl Default for ControllerTuning {
    fn default() -> Self {
        Self {
            inherit_factor: 1.0,
            use_decaying_carry: false,
            carry_duration: 0.12,
            carry_end_factor: 0.0,
            clamp_inherited_to_air_max: false,
            carry_after_apex_time: 0.10,
            preserve_run_speed_during_jump: true,
            release_carry_on_apex: true,
            carry_min_time: 0.04,
            carry_max_time: 0.22,
            jump_carry_max_x: 0.0,
            allow_air_facing_flips: false,
            face_by_velocity_when_idle: true,
            enable_landing_transfer: true,
            landing_mode: LandingMode::ClampOnly,
            landing_blend_time: 0.08,
            landing_clamp_to_ground_max: true,
            air_accel: 35.0,
            air_decel: 35.0,
        }
    }
}

/// Attack executor tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Circles (hit bubbles) instead of boxes
    pub use_hit_bubbles: bool,
    /// Bubble radius = max(w, h) / 2, otherwise (w + h) / 4
    pub bubble_radius_from_max_axis: bool,
    /// Aerials stop their active frames on touchdown and go to landing lag
    pub aerial_ends_on_landing: bool,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            use_hit_bubbles: true,
            bubble_radius_from_max_axis: true,
            aerial_ends_on_landing: true,
        }
    }
}

/// Target-side knockback + hitstun tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorTuning {
    pub knockback_scale: f32,
    pub hitstun_seconds_per_kb: f32,
    pub min_hitstun: f32,
    /// 0 disables the upper clamp
    pub max_hitstun: f32,
}

impl Default for ActorTuning {
    fn default() -> Self {
        Self {
            knockback_scale: 1.0,
            hitstun_seconds_per_kb: 0.05,
            min_hitstun: 0.1,
            max_hitstun: 2.0,
        }
    }
}

/// Body collider + ground probe setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub half_extents: Vec2,
    pub probe: ProbeMode,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            half_extents: Vec2::new(0.4, 0.5),
            probe: ProbeMode::default(),
        }
    }
}
