//! Combat events.

use bevy::prelude::*;

use crate::movement::Facing;

use super::{HitWindow, MoveSlot};

/// Raw hit detection: window of `attacker` overlapped `target` this tick.
///
/// Resolved in a separate system, sorted by (attacker, target, window_index).
#[derive(Event, Debug, Clone)]
pub struct HitLanded {
    pub attacker: Entity,
    pub target: Entity,
    pub slot: MoveSlot,
    pub window_index: usize,
    pub window: HitWindow,
    /// Attacker facing at detection time
    pub attacker_facing: Facing,
}

/// Resolved hit (damage + launch applied to the target).
#[derive(Event, Debug, Clone, PartialEq)]
pub struct FighterHit {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: f32,
    /// Launch velocity written to the target
    pub knockback: Vec2,
    pub hitstun_seconds: f32,
    pub percent_after: f32,
}

/// Why an attack edge did not start an attack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    NoMoveset,
    EmptySlot(MoveSlot),
}

/// Diagnostic: attack input with nothing to play.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AttackRejected {
    pub fighter: Entity,
    pub reason: RejectReason,
}
