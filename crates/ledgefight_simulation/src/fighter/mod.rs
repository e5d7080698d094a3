//! Fighter domain: entity composition
//!
//! Fighter = FighterBody (движение) + ActorState (percent/hitstun) +
//! AttackExecutor + FighterInput + Hurtbox + ground probe/collider +
//! FighterLoadout (иммутабельный конфиг персонажа).

use std::sync::Arc;

use bevy::prelude::*;

use crate::actor::ActorState;
use crate::combat::{AttackExecutor, Hurtbox, Moveset};
use crate::config::{ActorTuning, BodyConfig, CombatTuning, ControllerTuning, FighterStats, LoadedCharacter};
use crate::input::FighterInput;
use crate::movement::{Facing, FighterBody};
use crate::physics::{BodyCollider, GroundProbe};

/// Fighter marker + display name.
///
/// Автоматически добавляет input, actor state, attack executor и hurtbox
/// через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(FighterInput, ActorState, AttackExecutor, Hurtbox)]
pub struct Fighter {
    pub name: String,
}

/// Marker: fighter driven by the local player (not a CPU).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Immutable per-fighter configuration.
///
/// `stats` и `moveset` шарятся между бойцами одного персонажа.
#[derive(Component, Debug, Clone)]
pub struct FighterLoadout {
    pub stats: Arc<FighterStats>,
    pub controller: ControllerTuning,
    pub combat: CombatTuning,
    pub actor: ActorTuning,
    pub body: BodyConfig,
    /// `None` → every attack input is rejected
    pub moveset: Option<Arc<Moveset>>,
}

impl Default for FighterLoadout {
    fn default() -> Self {
        Self {
            stats: Arc::new(FighterStats::default()),
            controller: ControllerTuning::default(),
            combat: CombatTuning::default(),
            actor: ActorTuning::default(),
            body: BodyConfig::default(),
            moveset: None,
        }
    }
}

impl FighterLoadout {
    pub fn with_moveset(mut self, moveset: Moveset) -> Self {
        self.moveset = Some(Arc::new(moveset));
        self
    }
}

impl From<&LoadedCharacter> for FighterLoadout {
    fn from(character: &LoadedCharacter) -> Self {
        Self {
            stats: Arc::clone(&character.stats),
            controller: character.controller.clone(),
            combat: character.combat.clone(),
            actor: character.actor.clone(),
            body: character.body.clone(),
            moveset: character.moveset.clone(),
        }
    }
}

/// Components of a freshly spawned fighter (the rest comes from `#[require]`).
pub fn fighter_bundle(name: impl Into<String>, loadout: FighterLoadout, position: Vec2, facing: Facing) -> impl Bundle {
    let body = FighterBody::new(position, facing, loadout.stats.max_jumps);
    let collider = BodyCollider {
        half_extents: loadout.body.half_extents,
    };
    let probe = GroundProbe::new(loadout.body.probe);
    // hurtbox совпадает с коллайдером тела
    let hurtbox = Hurtbox {
        offset: Vec2::ZERO,
        half_extents: loadout.body.half_extents,
    };

    (Fighter { name: name.into() }, body, collider, probe, hurtbox, loadout)
}

/// Spawn a fighter directly into the world (tests, headless runner).
pub fn spawn_fighter(
    world: &mut World,
    name: impl Into<String>,
    loadout: FighterLoadout,
    position: Vec2,
    facing: Facing,
) -> Entity {
    let name = name.into();
    let entity = world.spawn(fighter_bundle(name.clone(), loadout, position, facing)).id();

    crate::logger::log(&format!("🧍 Spawned fighter {} ({:?}) at {:?}", name, entity, position));
    entity
}
