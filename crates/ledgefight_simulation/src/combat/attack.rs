//! Attack definitions (immutable, shared via Arc) + hit windows.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::CombatTuning;
use crate::movement::Facing;
use crate::physics::Shape2d;

/// Valid range for any knockback angle (degrees).
pub const MAX_ANGLE_DEG: f32 = 179.0;
/// Valid range for `min_up_degrees_on_ground`.
pub const MAX_MIN_UP_DEG: f32 = 15.0;

const DEFAULT_MULTI_HIT_INTERVAL: f32 = 0.10;
const MIN_MULTI_HIT_INTERVAL: f32 = 0.01;

/// How the launch direction of a window is computed.
///
/// Angles: 0° = forward (или world +X для absolute), 90° = up, -90° = down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AngleMode {
    /// Legacy XY direction; x mirrored by attacker facing
    Vector { x: f32, y: f32 },
    Degrees {
        deg: f32,
        #[serde(default = "default_relative")]
        relative_to_facing: bool,
    },
    /// Distinct angles for grounded / airborne targets (always facing-relative)
    Sakurai { ground_deg: f32, air_deg: f32 },
}

fn default_relative() -> bool {
    true
}

impl Default for AngleMode {
    fn default() -> Self {
        AngleMode::Degrees {
            deg: 45.0,
            relative_to_facing: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitKind {
    /// Each opponent at most once per attack
    #[default]
    Single,
    /// Re-hits the same opponent every `multi_hit_interval` seconds
    Multi,
}

/// One active-damage region of an attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitWindow {
    // Timing (1-based, relative to the end of startup)
    pub start_frame: u32,
    pub active_frames: u32,

    // Shape (local space, x flips by facing)
    pub offset: Vec2,
    pub size: Vec2,

    // On-hit
    pub damage: f32,
    pub base_knockback: f32,
    pub growth: f32,
    pub angle: AngleMode,
    pub min_up_degrees_on_ground: f32,

    pub hit_kind: HitKind,
    /// Single windows: a hit ends testing of all later windows
    pub consume_on_hit: bool,
    pub multi_hit_interval: f32,
}

impl Default for HitWindow {
    fn default() -> Self {
        Self {
            start_frame: 1,
            active_frames: 2,
            offset: Vec2::new(0.2, 0.1),
            size: Vec2::new(0.3, 0.3),
            damage: 8.0,
            base_knockback: 3.0,
            growth: 0.06,
            angle: AngleMode::default(),
            min_up_degrees_on_ground: 0.0,
            hit_kind: HitKind::Single,
            consume_on_hit: true,
            multi_hit_interval: DEFAULT_MULTI_HIT_INTERVAL,
        }
    }
}

impl HitWindow {
    /// Last active frame (inclusive).
    pub fn last_frame(&self) -> u32 {
        (self.start_frame + self.active_frames).saturating_sub(1)
    }

    /// Frame in [start_frame, start_frame + active_frames).
    pub fn is_active_on(&self, frame: u32) -> bool {
        frame >= self.start_frame && frame < self.start_frame + self.active_frames
    }

    /// Re-hit interval: ≤0 → 0.1s, floor 0.01s.
    pub fn multi_hit_interval_secs(&self) -> f32 {
        let interval = if self.multi_hit_interval <= 0.0 {
            DEFAULT_MULTI_HIT_INTERVAL
        } else {
            self.multi_hit_interval
        };
        interval.max(MIN_MULTI_HIT_INTERVAL)
    }

    /// World-space hit shape for an attacker at `position` facing `facing`.
    pub fn shape(&self, position: Vec2, facing: Facing, tuning: &CombatTuning) -> Shape2d {
        let center = position + Vec2::new(self.offset.x * facing.sign(), self.offset.y);

        if tuning.use_hit_bubbles {
            let radius = if tuning.bubble_radius_from_max_axis {
                self.size.x.max(self.size.y) * 0.5
            } else {
                (self.size.x + self.size.y) * 0.25
            };
            Shape2d::circle(center, radius)
        } else {
            Shape2d::rect(center, self.size)
        }
    }

    /// Load-time consistency check.
    pub fn validate(&self) -> Result<(), String> {
        if self.start_frame == 0 {
            return Err("start_frame is 1-based (got 0)".to_string());
        }
        if self.active_frames == 0 {
            return Err("active_frames must be positive".to_string());
        }
        if !(self.size.x > 0.0 && self.size.y > 0.0 && self.size.is_finite()) {
            return Err(format!("size must be positive (got {:?})", self.size));
        }
        if self.multi_hit_interval < 0.0 {
            return Err(format!("multi_hit_interval must not be negative (got {})", self.multi_hit_interval));
        }
        if !(0.0..=MAX_MIN_UP_DEG).contains(&self.min_up_degrees_on_ground) {
            return Err(format!(
                "min_up_degrees_on_ground must be in [0, {}] (got {})",
                MAX_MIN_UP_DEG, self.min_up_degrees_on_ground
            ));
        }

        let angles = match self.angle {
            AngleMode::Vector { .. } => vec![],
            AngleMode::Degrees { deg, .. } => vec![deg],
            AngleMode::Sakurai { ground_deg, air_deg } => vec![ground_deg, air_deg],
        };
        for angle in angles {
            if !(-MAX_ANGLE_DEG..=MAX_ANGLE_DEG).contains(&angle) {
                return Err(format!("angle must be in [-179, 179] degrees (got {})", angle));
            }
        }

        Ok(())
    }
}

/// Immutable attack clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackDefinition {
    pub startup_frames: u32,
    pub endlag_frames: u32,
    /// Applied when an aerial lands during startup/active
    pub landing_lag: u32,
    pub animator_trigger: Option<String>,
    /// Declared active-phase length; windows must fit inside it
    pub length_frames: Option<u32>,
    /// Tested in order every active frame
    pub windows: Vec<HitWindow>,
}

impl Default for AttackDefinition {
    fn default() -> Self {
        Self {
            startup_frames: 3,
            endlag_frames: 10,
            landing_lag: 0,
            animator_trigger: None,
            length_frames: None,
            windows: Vec::new(),
        }
    }
}

impl AttackDefinition {
    /// Number of Active ticks: max(start_frame + active_frames - 1) over windows.
    pub fn max_active_frame(&self) -> u32 {
        self.windows.iter().map(HitWindow::last_frame).max().unwrap_or(0)
    }

    pub fn validate(&self) -> Result<(), String> {
        for (index, window) in self.windows.iter().enumerate() {
            window.validate().map_err(|reason| format!("window {}: {}", index, reason))?;

            if let Some(length) = self.length_frames {
                if window.last_frame() > length {
                    return Err(format!(
                        "window {}: ends on frame {} past declared length {}",
                        index,
                        window.last_frame(),
                        length
                    ));
                }
            }
        }
        Ok(())
    }
}
