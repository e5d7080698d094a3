//! Input snapshot (per-tick, written by the input collaborator).
//!
//! Edge flags (`*_pressed`) живут ровно один тик: `clear_input_edges`
//! сбрасывает их в конце каждого тика симуляции.

use bevy::prelude::*;

/// Per-tick controller snapshot of one fighter.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct FighterInput {
    pub move_x: f32,
    pub move_y: f32,

    // One-tick edges
    pub jump_pressed: bool,
    pub attack_pressed: bool,
    pub special_pressed: bool,
    pub smash_pressed: bool,
    pub grab_pressed: bool,
    pub run_toggle_pressed: bool,

    // Levels
    pub jump_held: bool,

    /// Minimum stick deflection counted as Up/Down/Side for move selection
    pub directional_threshold: f32,
    /// Stick deflection that turns a grounded attack press into a smash
    pub smash_threshold: f32,
}

impl Default for FighterInput {
    fn default() -> Self {
        Self {
            move_x: 0.0,
            move_y: 0.0,
            jump_pressed: false,
            attack_pressed: false,
            special_pressed: false,
            smash_pressed: false,
            grab_pressed: false,
            run_toggle_pressed: false,
            jump_held: false,
            directional_threshold: 0.5,
            smash_threshold: 0.75,
        }
    }
}

impl FighterInput {
    pub fn with_stick(mut self, x: f32, y: f32) -> Self {
        self.move_x = x;
        self.move_y = y;
        self
    }

    /// Any edge that may start an attack.
    pub fn any_attack_edge(&self) -> bool {
        self.attack_pressed || self.special_pressed || self.smash_pressed || self.grab_pressed
    }

    pub fn clear_edges(&mut self) {
        self.jump_pressed = false;
        self.attack_pressed = false;
        self.special_pressed = false;
        self.smash_pressed = false;
        self.grab_pressed = false;
        self.run_toggle_pressed = false;
    }

    /// No stick, no buttons; thresholds kept.
    pub fn release_all(&mut self) {
        *self = Self {
            directional_threshold: self.directional_threshold,
            smash_threshold: self.smash_threshold,
            ..Self::default()
        };
    }
}

/// System: clear one-tick edges (last system of the tick).
pub fn clear_input_edges(mut inputs: Query<&mut FighterInput>) {
    for mut input in inputs.iter_mut() {
        input.clear_edges();
    }
}
