//! Tests for controller tick ordering and velocity.x ownership.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::config::{ControllerTuning, FighterStats};
    use crate::input::FighterInput;
    use crate::movement::{step_fighter, Facing, FighterBody, FighterCue, StepContext, VelocityGovernor};

    const DT: f32 = 1.0 / 60.0;

    fn tick_with(
        body: &mut FighterBody,
        input: &FighterInput,
        grounded_now: bool,
        in_hitstun: bool,
    ) -> (VelocityGovernor, Vec<FighterCue>) {
        let stats = FighterStats::default();
        let tuning = ControllerTuning::default();
        let ctx = StepContext {
            stats: &stats,
            tuning: &tuning,
            input,
            grounded_now,
            in_hitstun,
            dt: DT,
        };
        let mut cues = Vec::new();
        let governor = step_fighter(body, &ctx, &mut cues);
        (governor, cues)
    }

    fn grounded_body() -> FighterBody {
        let mut body = FighterBody::new(Vec2::new(0.0, 0.5), Facing::Right, 2);
        body.grounded = true;
        body
    }

    #[test]
    fn test_hard_lock_freezes_horizontal_only() {
        let mut body = FighterBody::new(Vec2::new(0.0, 2.0), Facing::Right, 2);
        body.velocity = Vec2::new(5.0, 2.0);
        let mut cues = Vec::new();
        body.start_hard_lock(3, &mut cues);

        let input = FighterInput::default().with_stick(1.0, 0.0);
        for _ in 0..2 {
            let (governor, cues) = tick_with(&mut body, &input, true, false);
            assert_eq!(governor, VelocityGovernor::HardLock);
            assert!(cues.is_empty());
        }
        assert_eq!(body.velocity, Vec2::new(0.0, 2.0));
        // probe пропущен во время lock
        assert!(!body.grounded);

        let (governor, cues) = tick_with(&mut body, &input, true, false);
        assert_eq!(governor, VelocityGovernor::HardLock);
        assert_eq!(cues, vec![FighterCue::LagTint(false)]);

        // после разморозки: landing + обычное движение
        let (governor, cues) = tick_with(&mut body, &input, true, false);
        assert_eq!(governor, VelocityGovernor::Movement);
        assert!(cues.contains(&FighterCue::Touchdown));
        assert_eq!(body.velocity.x, 3.5);
    }

    #[test]
    fn test_landing_lag_blocks_movement_and_jump() {
        let mut body = grounded_body();
        let mut cues = Vec::new();
        body.begin_landing_lag(2, &mut cues);

        let press = FighterInput {
            jump_pressed: true,
            jump_held: true,
            ..FighterInput::default().with_stick(1.0, 0.0)
        };

        let (governor, cues) = tick_with(&mut body, &press, true, false);
        assert_eq!(governor, VelocityGovernor::LandingLag);
        assert!(cues.is_empty());
        assert!(!body.jump.squat_pending());
        assert_eq!(body.velocity.x, 0.0);

        let (governor, cues) = tick_with(&mut body, &press, true, false);
        assert_eq!(governor, VelocityGovernor::LandingLag);
        assert_eq!(cues, vec![FighterCue::LagTint(false), FighterCue::LandingDone]);

        let (governor, cues) = tick_with(&mut body, &press, true, false);
        assert_eq!(governor, VelocityGovernor::Movement);
        assert!(cues.contains(&FighterCue::JumpSquat));
    }

    #[test]
    fn test_hard_lock_outranks_landing_lag() {
        let mut body = grounded_body();
        let mut cues = Vec::new();
        body.begin_landing_lag(5, &mut cues);
        body.start_hard_lock(2, &mut cues);

        let (governor, _) = tick_with(&mut body, &FighterInput::default(), true, false);

        assert_eq!(governor, VelocityGovernor::HardLock);
        // landing lag не тикает под hard lock
        assert_eq!(body.locks.landing_lag_frames, 5);
        assert_eq!(body.locks.hard_lock_frames, 1);
    }

    #[test]
    fn test_hitstun_does_not_write_velocity() {
        let mut body = grounded_body();
        body.velocity = Vec2::new(-4.0, 3.0);

        let input = FighterInput::default().with_stick(1.0, 0.0);
        let (governor, _) = tick_with(&mut body, &input, true, true);

        assert_eq!(governor, VelocityGovernor::Hitstun);
        assert_eq!(body.velocity.x, -4.0);
        assert_eq!(body.governor, VelocityGovernor::Hitstun);
    }

    #[test]
    fn test_exactly_one_governor_per_tick() {
        let mut body = grounded_body();
        body.velocity.x = 6.5;
        let mut lock_cues = Vec::new();

        let press = FighterInput {
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        };
        let mut governors = Vec::new();

        // squat (4) → carry → hitstun → hard lock → movement
        let stats = FighterStats::default();
        for tick in 0..10 {
            let input = if tick == 0 { press } else { FighterInput::default() };
            let grounded_now = tick < 4;
            let in_hitstun = tick == 6;
            if tick == 7 {
                body.start_hard_lock(1, &mut lock_cues);
            }
            let (governor, _) = tick_with(&mut body, &input, grounded_now, in_hitstun);
            assert_eq!(governor, body.governor);
            governors.push(governor);
            assert!(body.jumps_left <= stats.max_jumps);
        }

        assert_eq!(governors[3], VelocityGovernor::JumpCarry);
        assert_eq!(governors[6], VelocityGovernor::Hitstun);
        assert_eq!(governors[7], VelocityGovernor::HardLock);
        assert_eq!(governors[8], VelocityGovernor::JumpCarry);
    }
}
