//! Movement domain: locomotion state machine, jump/carry model, movement locks
//!
//! Содержит:
//! - FighterBody (единое mutable состояние движения бойца)
//! - locomotion: Idle/Walk/InitialDash/Run + facing
//! - jump: jump squat, short hop, double jump, carry, landing transfer, air control
//! - locks: LandingLag / HardLock
//! - controller: оркестрация одного тика + Bevy система
//!
//! Velocity.x пишется РОВНО одним владельцем за тик:
//! HardLock > LandingLag > Hitstun > JumpCarry > Movement.

pub mod components;
pub mod controller;
pub mod events;
pub mod jump;
pub mod locks;
pub mod locomotion;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod controller_tests;
#[cfg(test)]
mod locomotion_tests;

pub use components::*;
pub use controller::*;
pub use events::*;
pub use locks::*;

use bevy::prelude::*;

use crate::physics::integrate_fighters;
use crate::SimSet;

/// Movement Plugin
///
/// FixedUpdate:
/// 1. fighter_controller (SimSet::Movement): probe + state machine + velocity.x
/// 2. integrate_fighters (SimSet::Integrate): gravity + position + ground snap
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FighterCueEvent>().add_systems(
            FixedUpdate,
            (
                fighter_controller.in_set(SimSet::Movement),
                integrate_fighters.in_set(SimSet::Integrate),
            ),
        );
    }
}
