//! LandingLag / HardLock: два независимых countdown'а.
//!
//! Приоритет: HardLock > LandingLag. Оба обнуляют velocity.x,
//! гравитация при этом продолжает работать.

use bevy::prelude::*;

use super::{FighterBody, FighterCue};

/// Movement lock countdowns (ticks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub struct MovementLocks {
    pub landing_lag_frames: u32,
    pub hard_lock_frames: u32,
}

impl MovementLocks {
    pub fn hard_locked(&self) -> bool {
        self.hard_lock_frames > 0
    }

    pub fn in_landing_lag(&self) -> bool {
        self.landing_lag_frames > 0
    }

    pub fn any_active(&self) -> bool {
        self.hard_locked() || self.in_landing_lag()
    }

    /// One hard-lock tick. Tint goes off on the last tick.
    pub fn tick_hard_lock(&mut self, cues: &mut Vec<FighterCue>) {
        if self.hard_lock_frames == 0 {
            return;
        }
        self.hard_lock_frames -= 1;
        if self.hard_lock_frames == 0 {
            cues.push(FighterCue::LagTint(false));
        }
    }

    /// One landing-lag tick. Emits `LandingDone` on the last tick.
    pub fn tick_landing_lag(&mut self, cues: &mut Vec<FighterCue>) {
        if self.landing_lag_frames == 0 {
            return;
        }
        self.landing_lag_frames -= 1;
        if self.landing_lag_frames == 0 {
            cues.push(FighterCue::LagTint(false));
            cues.push(FighterCue::LandingDone);
        }
    }
}

impl FighterBody {
    /// Start landing lag (called by the attack executor).
    ///
    /// Cancels pending jump squat, short hop and hard carry.
    pub fn begin_landing_lag(&mut self, frames: u32, cues: &mut Vec<FighterCue>) {
        if frames == 0 {
            return;
        }

        self.locks.landing_lag_frames = frames;
        self.jump.clear();
        self.carry.active = false;

        cues.push(FighterCue::LandingStart);
        cues.push(FighterCue::LagTint(true));
    }

    /// Start (or extend) a hard lock. Keeps the longer of current and requested.
    pub fn start_hard_lock(&mut self, frames: u32, cues: &mut Vec<FighterCue>) {
        if frames == 0 {
            return;
        }

        if !self.locks.hard_locked() {
            cues.push(FighterCue::LagTint(true));
        }
        self.locks.hard_lock_frames = self.locks.hard_lock_frames.max(frames);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::Facing;

    #[test]
    fn test_landing_lag_countdown_emits_done_once() {
        let mut locks = MovementLocks {
            landing_lag_frames: 2,
            hard_lock_frames: 0,
        };
        let mut cues = Vec::new();

        locks.tick_landing_lag(&mut cues);
        assert!(cues.is_empty());
        assert!(locks.in_landing_lag());

        locks.tick_landing_lag(&mut cues);
        assert_eq!(cues, vec![FighterCue::LagTint(false), FighterCue::LandingDone]);
        assert!(!locks.in_landing_lag());

        // over-decrement clamps at 0, no extra cue
        locks.tick_landing_lag(&mut cues);
        assert_eq!(locks.landing_lag_frames, 0);
        assert_eq!(cues.len(), 2);
    }

    #[test]
    fn test_hard_lock_keeps_max() {
        let mut body = FighterBody::new(Vec2::ZERO, Facing::Right, 2);
        let mut cues = Vec::new();

        body.start_hard_lock(10, &mut cues);
        body.start_hard_lock(4, &mut cues);
        assert_eq!(body.locks.hard_lock_frames, 10);
        assert_eq!(cues, vec![FighterCue::LagTint(true)]);

        body.start_hard_lock(0, &mut cues);
        assert_eq!(body.locks.hard_lock_frames, 10);
    }

    #[test]
    fn test_begin_landing_lag_clears_jump_and_carry() {
        let mut body = FighterBody::new(Vec2::ZERO, Facing::Right, 2);
        body.jump.squat_frames_left = 3;
        body.jump.short_hop_queued = true;
        body.carry.active = true;
        let mut cues = Vec::new();

        body.begin_landing_lag(12, &mut cues);

        assert_eq!(body.locks.landing_lag_frames, 12);
        assert!(!body.jump.squat_pending());
        assert!(!body.jump.short_hop_queued);
        assert!(!body.carry.active);
        assert_eq!(cues, vec![FighterCue::LandingStart, FighterCue::LagTint(true)]);
    }
}
