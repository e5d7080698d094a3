//! Config domain: character roster (TOML)
//!
//! Загружается ОДИН раз при старте; после `resolve()` всё неизменяемо
//! и шарится через `Arc` (stats, moveset).
//!
//! ```toml
//! [characters.brawler.stats]
//! run_speed = 6.5
//!
//! [characters.brawler.moves.tilt]
//! startup_frames = 3
//!
//! [[characters.brawler.moves.tilt.windows]]
//! start_frame = 1
//! active_frames = 2
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::de::value::StrDeserializer;
use serde::de::IntoDeserializer;
use serde::Deserialize;
use thiserror::Error;

use crate::combat::{AttackDefinition, MoveSlot, Moveset};

pub mod stats;
pub mod tuning;

pub use stats::*;
pub use tuning::*;

/// Config loading / validation error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read roster file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse roster: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("character '{character}': invalid stats: {reason}")]
    InvalidStats { character: String, reason: String },

    #[error("character '{character}': unknown move slot '{slot}'")]
    UnknownSlot { character: String, slot: String },

    #[error("character '{character}', move '{slot}': {reason}")]
    InvalidClip {
        character: String,
        slot: String,
        reason: String,
    },

    #[error("unknown character '{0}'")]
    UnknownCharacter(String),
}

/// One `[characters.<name>]` table, as written in the file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// `None` → `FighterStats::fallback()` (single jump)
    pub stats: Option<FighterStats>,
    pub controller: ControllerTuning,
    pub combat: CombatTuning,
    pub actor: ActorTuning,
    pub body: BodyConfig,
    /// Keys are move slot names (`tilt`, `up_air`, `fsmash`, ...)
    pub moves: BTreeMap<String, AttackDefinition>,
}

/// Validated, immutable character data.
#[derive(Debug, Clone)]
pub struct LoadedCharacter {
    pub name: String,
    pub stats: Arc<FighterStats>,
    pub controller: ControllerTuning,
    pub combat: CombatTuning,
    pub actor: ActorTuning,
    pub body: BodyConfig,
    /// `None` when the character declares no moves
    pub moveset: Option<Arc<Moveset>>,
}

/// Roster file: `[characters.<name>]` tables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FighterRoster {
    pub characters: BTreeMap<String, CharacterConfig>,
}

impl FighterRoster {
    /// Parse + validate every character.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let roster: FighterRoster = toml::from_str(text)?;
        roster.validate()?;
        Ok(roster)
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let roster = Self::from_toml_str(&text)?;

        crate::logger::log_info(&format!(
            "📋 Roster loaded from {}: {} characters",
            path.display(),
            roster.characters.len()
        ));
        Ok(roster)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.characters.keys().map(String::as_str)
    }

    /// Load-time checks: stats ranges, slot names, clip/window ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, character) in &self.characters {
            if let Some(stats) = &character.stats {
                stats.validate().map_err(|reason| ConfigError::InvalidStats {
                    character: name.clone(),
                    reason,
                })?;
            }

            for (slot_name, clip) in &character.moves {
                parse_slot(name, slot_name)?;
                clip.validate().map_err(|reason| ConfigError::InvalidClip {
                    character: name.clone(),
                    slot: slot_name.clone(),
                    reason,
                })?;
            }
        }
        Ok(())
    }

    /// Build the immutable runtime data of one character.
    pub fn resolve(&self, name: &str) -> Result<LoadedCharacter, ConfigError> {
        let character = self
            .characters
            .get(name)
            .ok_or_else(|| ConfigError::UnknownCharacter(name.to_string()))?;

        let stats = match &character.stats {
            Some(stats) => stats.clone(),
            None => {
                crate::logger::log_warning(&format!(
                    "⚠️ Character '{}' has no stats table, using fallback (max_jumps = 1)",
                    name
                ));
                FighterStats::fallback()
            }
        };

        let moveset = if character.moves.is_empty() {
            None
        } else {
            let mut moveset = Moveset::new();
            for (slot_name, clip) in &character.moves {
                moveset.insert(parse_slot(name, slot_name)?, clip.clone());
            }
            Some(Arc::new(moveset))
        };

        Ok(LoadedCharacter {
            name: name.to_string(),
            stats: Arc::new(stats),
            controller: character.controller.clone(),
            combat: character.combat.clone(),
            actor: character.actor.clone(),
            body: character.body.clone(),
            moveset,
        })
    }
}

fn parse_slot(character: &str, slot: &str) -> Result<MoveSlot, ConfigError> {
    let deserializer: StrDeserializer<serde::de::value::Error> = slot.into_deserializer();
    MoveSlot::deserialize(deserializer).map_err(|_| ConfigError::UnknownSlot {
        character: character.to_string(),
        slot: slot.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{AngleMode, HitKind};
    use crate::physics::ProbeMode;

    const ROSTER: &str = r#"
[characters.brawler.stats]
walk_speed = 3.0
run_speed = 7.0
max_jumps = 3

[characters.brawler.controller]
landing_mode = "blend_to_target"
jump_carry_max_x = 5.0

[characters.brawler.actor]
max_hitstun = 0.0

[characters.brawler.body]
half_extents = [0.3, 0.6]

[characters.brawler.body.probe]
kind = "point"
offset = [0.0, -0.6]
radius = 0.05

[characters.brawler.moves.tilt]
startup_frames = 3
endlag_frames = 8
animator_trigger = "Tilt"

[[characters.brawler.moves.tilt.windows]]
start_frame = 1
active_frames = 2
damage = 6.0
angle = { mode = "sakurai", ground_deg = 0.0, air_deg = 45.0 }

[characters.brawler.moves.nair]
landing_lag = 6

[[characters.brawler.moves.nair.windows]]
start_frame = 2
active_frames = 10
hit_kind = "multi"
multi_hit_interval = 0.1

[characters.dummy]
"#;

    #[test]
    fn test_parse_full_character() {
        let roster = FighterRoster::from_toml_str(ROSTER).expect("roster should parse");
        assert_eq!(roster.names().collect::<Vec<_>>(), vec!["brawler", "dummy"]);

        let brawler = roster.resolve("brawler").expect("brawler resolves");
        assert_eq!(brawler.stats.walk_speed, 3.0);
        assert_eq!(brawler.stats.max_jumps, 3);
        // не указано в таблице → default
        assert_eq!(brawler.stats.dash_frames, 10);
        assert_eq!(brawler.controller.landing_mode, LandingMode::BlendToTarget);
        assert_eq!(brawler.controller.jump_carry_max_x, 5.0);
        assert_eq!(brawler.actor.max_hitstun, 0.0);
        assert_eq!(brawler.body.half_extents.x, 0.3);
        assert!(matches!(brawler.body.probe, ProbeMode::Point { radius, .. } if radius == 0.05));

        let moveset = brawler.moveset.expect("brawler has moves");
        assert_eq!(moveset.len(), 2);

        let tilt = moveset.get(MoveSlot::Tilt).expect("tilt");
        assert_eq!(tilt.animator_trigger.as_deref(), Some("Tilt"));
        assert_eq!(tilt.windows[0].damage, 6.0);
        assert_eq!(
            tilt.windows[0].angle,
            AngleMode::Sakurai {
                ground_deg: 0.0,
                air_deg: 45.0
            }
        );

        let nair = moveset.get(MoveSlot::Nair).expect("nair");
        assert_eq!(nair.landing_lag, 6);
        assert_eq!(nair.windows[0].hit_kind, HitKind::Multi);
    }

    #[test]
    fn test_missing_stats_fall_back_to_single_jump() {
        let roster = FighterRoster::from_toml_str(ROSTER).expect("roster should parse");
        let dummy = roster.resolve("dummy").expect("dummy resolves");

        assert_eq!(dummy.stats.max_jumps, 1);
        assert!(dummy.moveset.is_none());
        assert_eq!(dummy.controller, ControllerTuning::default());
    }

    #[test]
    fn test_unknown_character() {
        let roster = FighterRoster::from_toml_str(ROSTER).expect("roster should parse");
        assert!(matches!(roster.resolve("nobody"), Err(ConfigError::UnknownCharacter(_))));
    }

    #[test]
    fn test_invalid_stats_rejected() {
        let text = "[characters.broken.stats]\nrun_speed = -2.0\n";
        assert!(matches!(
            FighterRoster::from_toml_str(text),
            Err(ConfigError::InvalidStats { .. })
        ));
    }

    #[test]
    fn test_unknown_slot_rejected() {
        let text = "[characters.broken.moves.super_move]\nstartup_frames = 3\n";
        let err = FighterRoster::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSlot { ref slot, .. } if slot == "super_move"));
    }

    #[test]
    fn test_invalid_window_rejected() {
        let text = r#"
[characters.broken.moves.up_smash]
startup_frames = 10

[[characters.broken.moves.up_smash.windows]]
start_frame = 1
active_frames = 0
"#;
        let err = FighterRoster::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidClip { ref slot, .. } if slot == "up_smash"));
        assert!(err.to_string().contains("up_smash"));
    }

    #[test]
    fn test_parse_error_surfaces() {
        assert!(matches!(
            FighterRoster::from_toml_str("[characters.x\n"),
            Err(ConfigError::Parse(_))
        ));
    }
}
