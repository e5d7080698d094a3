//! Character stats (immutable, shared read-only between fighters of one character).

use serde::{Deserialize, Serialize};

/// Locomotion + combat stats of a character.
///
/// Frame counts assume the 60Hz simulation tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FighterStats {
    // Movement
    pub walk_speed: f32,
    pub air_speed: f32,

    // Jumping
    pub jump_force: f32,
    pub double_jump_force: f32,
    /// Used when jump is released during jump squat
    pub short_hop_force: f32,
    pub jump_squat_frames: u32,
    pub max_jumps: u32,

    // Run / Dash
    pub dash_speed: f32,
    pub dash_frames: u32,
    pub run_speed: f32,
    pub run_accel: f32,
    pub run_decel: f32,

    // Combat
    /// Higher = heavier. Carried for presentation/balancing tools; launch
    /// scaling goes through `ActorTuning::knockback_scale`.
    pub weight: f32,
    pub gravity_scale: f32,
}

impl Default for FighterStats {
    fn default() -> Self {
        Self {
            walk_speed: 3.5,
            air_speed: 2.8,
            jump_force: 8.0,
            double_jump_force: 7.0,
            short_hop_force: 5.0,
            jump_squat_frames: 4,
            max_jumps: 2,
            dash_speed: 8.0,
            dash_frames: 10,
            run_speed: 6.5,
            run_accel: 40.0,
            run_decel: 50.0,
            weight: 100.0,
            gravity_scale: 3.5,
        }
    }
}

impl FighterStats {
    /// Minimal stats used when a character has no stats table.
    pub fn fallback() -> Self {
        Self {
            max_jumps: 1,
            ..Self::default()
        }
    }

    /// Negative speeds/forces make no sense for any character.
    pub fn validate(&self) -> Result<(), String> {
        let non_negative = [
            ("walk_speed", self.walk_speed),
            ("air_speed", self.air_speed),
            ("jump_force", self.jump_force),
            ("double_jump_force", self.double_jump_force),
            ("short_hop_force", self.short_hop_force),
            ("dash_speed", self.dash_speed),
            ("run_speed", self.run_speed),
            ("run_accel", self.run_accel),
            ("run_decel", self.run_decel),
            ("weight", self.weight),
            ("gravity_scale", self.gravity_scale),
        ];

        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a finite non-negative number (got {})", name, value));
            }
        }

        Ok(())
    }
}
