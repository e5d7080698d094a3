//! Moveset (attack set) + move selection from the input snapshot.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::input::FighterInput;
use crate::movement::Facing;

use super::AttackDefinition;

/// Move slot of an attack set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveSlot {
    // Ground
    Tilt,
    UpTilt,
    DownTilt,
    // Air
    Nair,
    Fair,
    Bair,
    UpAir,
    Dair,
    // Specials
    Special,
    UpSpecial,
    DownSpecial,
    // Smash attacks
    Fsmash,
    UpSmash,
    Dsmash,
    Grab,
}

/// Attack edge that triggered selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackButton {
    Attack,
    Special,
    Smash,
    Grab,
}

impl AttackButton {
    /// Highest-priority edge of this tick: Smash > Special > Grab > Attack.
    pub fn from_input(input: &FighterInput) -> Option<Self> {
        if input.smash_pressed {
            Some(AttackButton::Smash)
        } else if input.special_pressed {
            Some(AttackButton::Special)
        } else if input.grab_pressed {
            Some(AttackButton::Grab)
        } else if input.attack_pressed {
            Some(AttackButton::Attack)
        } else {
            None
        }
    }
}

/// Stick direction relative to facing, using the directional threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StickDir {
    Up,
    Down,
    Forward,
    Back,
    Neutral,
}

fn stick_dir(input: &FighterInput, facing: Facing) -> StickDir {
    let threshold = input.directional_threshold;
    let (x, y) = (input.move_x, input.move_y);

    if y > threshold {
        StickDir::Up
    } else if y < -threshold {
        StickDir::Down
    } else if x.abs() > threshold {
        if (x > 0.0) == (facing == Facing::Right) {
            StickDir::Forward
        } else {
            StickDir::Back
        }
    } else {
        StickDir::Neutral
    }
}

fn aerial_slot(dir: StickDir) -> MoveSlot {
    match dir {
        StickDir::Up => MoveSlot::UpAir,
        StickDir::Down => MoveSlot::Dair,
        StickDir::Forward => MoveSlot::Fair,
        StickDir::Back => MoveSlot::Bair,
        StickDir::Neutral => MoveSlot::Nair,
    }
}

fn smash_slot(dir: StickDir) -> MoveSlot {
    match dir {
        StickDir::Up => MoveSlot::UpSmash,
        StickDir::Down => MoveSlot::Dsmash,
        _ => MoveSlot::Fsmash,
    }
}

/// Maps an attack edge + stick + grounded/facing onto a move slot.
///
/// Airborne smash и attack одинаково выбирают aerial. Grounded attack со
/// стиком ≥ smash_threshold считается smash'ем.
pub fn select_slot(button: AttackButton, input: &FighterInput, grounded: bool, facing: Facing) -> MoveSlot {
    let dir = stick_dir(input, facing);

    match button {
        AttackButton::Grab => MoveSlot::Grab,
        AttackButton::Special => match dir {
            StickDir::Up => MoveSlot::UpSpecial,
            StickDir::Down => MoveSlot::DownSpecial,
            _ => MoveSlot::Special,
        },
        _ if !grounded => aerial_slot(dir),
        AttackButton::Smash => smash_slot(dir),
        AttackButton::Attack => {
            let deflection = input.move_x.abs().max(input.move_y.abs());
            if deflection >= input.smash_threshold {
                smash_slot(dir)
            } else {
                match dir {
                    StickDir::Up => MoveSlot::UpTilt,
                    StickDir::Down => MoveSlot::DownTilt,
                    _ => MoveSlot::Tilt,
                }
            }
        }
    }
}

/// Attack set of a character (immutable, shared between its fighters).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Moveset {
    moves: BTreeMap<MoveSlot, Arc<AttackDefinition>>,
}

impl Moveset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, slot: MoveSlot, attack: AttackDefinition) -> Self {
        self.insert(slot, attack);
        self
    }

    pub fn insert(&mut self, slot: MoveSlot, attack: AttackDefinition) {
        self.moves.insert(slot, Arc::new(attack));
    }

    pub fn get(&self, slot: MoveSlot) -> Option<&Arc<AttackDefinition>> {
        self.moves.get(&slot)
    }

    /// Clip for a slot. Empty Fair falls back to Nair.
    pub fn resolve(&self, slot: MoveSlot) -> Option<(MoveSlot, Arc<AttackDefinition>)> {
        if let Some(clip) = self.get(slot) {
            return Some((slot, clip.clone()));
        }
        match slot {
            MoveSlot::Fair => self.get(MoveSlot::Nair).map(|clip| (MoveSlot::Nair, clip.clone())),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stick(x: f32, y: f32) -> FighterInput {
        FighterInput::default().with_stick(x, y)
    }

    #[test]
    fn test_button_priority() {
        let input = FighterInput {
            attack_pressed: true,
            special_pressed: true,
            smash_pressed: true,
            ..Default::default()
        };
        assert_eq!(AttackButton::from_input(&input), Some(AttackButton::Smash));
        assert_eq!(AttackButton::from_input(&FighterInput::default()), None);
    }

    #[test]
    fn test_grounded_selection() {
        let attack = AttackButton::Attack;
        assert_eq!(select_slot(attack, &stick(0.0, 0.0), true, Facing::Right), MoveSlot::Tilt);
        assert_eq!(select_slot(attack, &stick(0.0, 0.6), true, Facing::Right), MoveSlot::UpTilt);
        assert_eq!(select_slot(attack, &stick(0.0, -0.6), true, Facing::Right), MoveSlot::DownTilt);
        // full deflection → smash
        assert_eq!(select_slot(attack, &stick(0.0, 0.9), true, Facing::Right), MoveSlot::UpSmash);
        assert_eq!(select_slot(attack, &stick(-1.0, 0.0), true, Facing::Right), MoveSlot::Fsmash);
        assert_eq!(
            select_slot(AttackButton::Smash, &stick(0.0, -0.6), true, Facing::Left),
            MoveSlot::Dsmash
        );
    }

    #[test]
    fn test_aerial_selection_relative_to_facing() {
        let attack = AttackButton::Attack;
        assert_eq!(select_slot(attack, &stick(0.0, 0.0), false, Facing::Right), MoveSlot::Nair);
        assert_eq!(select_slot(attack, &stick(0.8, 0.0), false, Facing::Right), MoveSlot::Fair);
        assert_eq!(select_slot(attack, &stick(0.8, 0.0), false, Facing::Left), MoveSlot::Bair);
        assert_eq!(select_slot(attack, &stick(0.0, 0.8), false, Facing::Left), MoveSlot::UpAir);
        assert_eq!(select_slot(AttackButton::Smash, &stick(0.0, -0.8), false, Facing::Left), MoveSlot::Dair);
    }

    #[test]
    fn test_special_and_grab_selection() {
        let special = AttackButton::Special;
        assert_eq!(select_slot(special, &stick(0.0, 0.7), false, Facing::Right), MoveSlot::UpSpecial);
        assert_eq!(select_slot(special, &stick(0.0, -0.7), true, Facing::Right), MoveSlot::DownSpecial);
        assert_eq!(select_slot(special, &stick(1.0, 0.0), true, Facing::Right), MoveSlot::Special);
        assert_eq!(select_slot(AttackButton::Grab, &stick(0.0, 1.0), true, Facing::Right), MoveSlot::Grab);
    }

    #[test]
    fn test_fair_falls_back_to_nair() {
        let moveset = Moveset::new().with(MoveSlot::Nair, AttackDefinition::default());

        let (slot, _) = moveset.resolve(MoveSlot::Fair).unwrap();
        assert_eq!(slot, MoveSlot::Nair);
        assert!(moveset.resolve(MoveSlot::Bair).is_none());
    }
}
