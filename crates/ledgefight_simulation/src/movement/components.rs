//! Movement components.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::locks::MovementLocks;

/// Facing direction (±1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// Negative → Left, anything else → Right.
    pub fn from_sign(value: f32) -> Self {
        if value < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

/// Ground locomotion states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum MoveState {
    #[default]
    Idle,
    Walk,
    InitialDash,
    Run,
}

/// Subsystem that owned velocity.x on the last tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum VelocityGovernor {
    HardLock,
    LandingLag,
    Hitstun,
    JumpCarry,
    #[default]
    Movement,
}

/// Jump squat bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct JumpState {
    /// Ticks until takeoff (0 = no pending squat)
    pub squat_frames_left: u32,
    pub short_hop_queued: bool,
}

impl JumpState {
    pub fn squat_pending(&self) -> bool {
        self.squat_frames_left > 0
    }

    pub fn clear(&mut self) {
        self.squat_frames_left = 0;
        self.short_hop_queued = false;
    }
}

/// Momentum carry state (snapshot at takeoff).
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct CarryState {
    /// velocity.x right before takeoff (v0)
    pub pre_jump_vx: f32,

    // Hard carry: velocity.x pinned to `pinned_vx`
    pub active: bool,
    pub pinned_vx: f32,
    pub elapsed: f32,
    pub apex_elapsed: f32,

    // Decaying carry window
    pub decay_active: bool,
    pub decay_elapsed: f32,
}

/// Landing transfer blend (BlendToTarget mode).
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct LandingBlend {
    pub active: bool,
    pub elapsed: f32,
    pub start_vx: f32,
}

/// Mutable per-fighter movement state.
///
/// Инварианты:
/// - 0 ≤ jumps_left ≤ max_jumps
/// - все countdown'ы ≥ 0 (u32 + saturating_sub)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct FighterBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub grounded: bool,

    pub move_state: MoveState,
    pub run_mode: bool,
    pub dash_frames_left: u32,

    pub jumps_left: u32,
    pub jump: JumpState,
    pub carry: CarryState,
    pub landing_blend: LandingBlend,

    pub locks: MovementLocks,
    pub governor: VelocityGovernor,
}

impl FighterBody {
    pub fn new(position: Vec2, facing: Facing, max_jumps: u32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing,
            grounded: false,
            move_state: MoveState::Idle,
            run_mode: false,
            dash_frames_left: 0,
            jumps_left: max_jumps,
            jump: JumpState::default(),
            carry: CarryState::default(),
            landing_blend: LandingBlend::default(),
            locks: MovementLocks::default(),
            governor: VelocityGovernor::Movement,
        }
    }

    pub fn facing_sign(&self) -> f32 {
        self.facing.sign()
    }

    /// Hard lock or landing lag active (blocks new attacks).
    pub fn movement_locked(&self) -> bool {
        self.locks.any_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_sign_roundtrip() {
        assert_eq!(Facing::from_sign(-0.3), Facing::Left);
        assert_eq!(Facing::from_sign(0.0), Facing::Right);
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::Left.flipped(), Facing::Right);
    }

    #[test]
    fn test_new_body_has_full_jumps() {
        let body = FighterBody::new(Vec2::ZERO, Facing::Left, 2);
        assert_eq!(body.jumps_left, 2);
        assert_eq!(body.move_state, MoveState::Idle);
        assert!(!body.movement_locked());
    }
}
