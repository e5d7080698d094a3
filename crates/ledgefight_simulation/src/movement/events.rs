//! Presentation cues (core → animation/tint/audio collaborators)
//!
//! Ядро только эмитит cue на точной границе тика; презентация
//! реагирует асинхронно и никогда не блокирует симуляцию.

use bevy::prelude::*;

/// Named trigger for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum FighterCue {
    /// Jump squat started (windup before takeoff)
    JumpSquat,
    /// Left the ground / air jump
    Takeoff { double_jump: bool },
    DashStart,
    /// Airborne → grounded transition
    Touchdown,
    /// Landing lag lock started
    LandingStart,
    /// Landing lag lock finished
    LandingDone,
    /// Attack started: animator trigger name from the clip
    AttackTrigger(String),
    /// Lag tint on/off (landing lag, hard lock)
    LagTint(bool),
}

/// Event: cue for a fighter.
#[derive(Event, Debug, Clone)]
pub struct FighterCueEvent {
    pub fighter: Entity,
    pub cue: FighterCue,
}
