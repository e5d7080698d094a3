//! Tests for ground locomotion (walk, dash → run, facing).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::config::{ControllerTuning, FighterStats};
    use crate::input::FighterInput;
    use crate::movement::{step_fighter, Facing, FighterBody, FighterCue, MoveState, StepContext};

    const DT: f32 = 1.0 / 60.0;

    fn grounded_body() -> FighterBody {
        let mut body = FighterBody::new(Vec2::new(0.0, 0.5), Facing::Right, 2);
        body.grounded = true;
        body
    }

    fn tick(body: &mut FighterBody, input: &FighterInput, grounded_now: bool) -> Vec<FighterCue> {
        let stats = FighterStats::default();
        let tuning = ControllerTuning::default();
        let ctx = StepContext {
            stats: &stats,
            tuning: &tuning,
            input,
            grounded_now,
            in_hitstun: false,
            dt: DT,
        };
        let mut cues = Vec::new();
        step_fighter(body, &ctx, &mut cues);
        cues
    }

    #[test]
    fn test_walk_velocity_follows_stick() {
        let mut body = grounded_body();
        let input = FighterInput::default().with_stick(0.5, 0.0);

        tick(&mut body, &input, true);

        assert_eq!(body.velocity.x, 1.75); // 0.5 * walk_speed 3.5
        assert_eq!(body.move_state, MoveState::Walk);
        assert_eq!(body.facing, Facing::Right);

        // Tiny stick → Idle (0.01 * 3.5 < 0.05)
        let input = FighterInput::default().with_stick(0.01, 0.0);
        tick(&mut body, &input, true);
        assert_eq!(body.move_state, MoveState::Idle);
    }

    #[test]
    fn test_dash_then_run() {
        let mut body = grounded_body();
        let toggle = FighterInput {
            run_toggle_pressed: true,
            ..FighterInput::default().with_stick(1.0, 0.0)
        };
        let hold = FighterInput::default().with_stick(1.0, 0.0);

        let cues = tick(&mut body, &toggle, true);
        assert!(body.run_mode);
        assert_eq!(body.move_state, MoveState::InitialDash);
        assert!(cues.contains(&FighterCue::DashStart));
        assert_eq!(body.velocity.x, 8.0);

        // dash_frames = 10: первый тик уже посчитан
        for _ in 1..10 {
            tick(&mut body, &hold, true);
        }
        assert_eq!(body.move_state, MoveState::Run);
        assert_eq!(body.velocity.x, 8.0);

        // 8.0 → 6.5 тормозит run_decel (50/s): 2 тика
        tick(&mut body, &hold, true);
        assert!((body.velocity.x - (8.0 - 50.0 * DT)).abs() < 1e-4);
        tick(&mut body, &hold, true);
        assert_eq!(body.velocity.x, 6.5);
        assert_eq!(body.move_state, MoveState::Run);
    }

    #[test]
    fn test_late_dash_trigger() {
        let mut body = grounded_body();
        let toggle = FighterInput {
            run_toggle_pressed: true,
            ..Default::default()
        };

        tick(&mut body, &toggle, true);
        assert!(body.run_mode);
        assert_eq!(body.move_state, MoveState::Idle);

        // стик пришёл позже toggle
        let cues = tick(&mut body, &FighterInput::default().with_stick(-1.0, 0.0), true);
        assert_eq!(body.move_state, MoveState::InitialDash);
        assert!(cues.contains(&FighterCue::DashStart));
        assert_eq!(body.facing, Facing::Left);
        assert_eq!(body.velocity.x, -8.0);
    }

    #[test]
    fn test_toggle_off_cancels_dash() {
        let mut body = grounded_body();
        let toggle = FighterInput {
            run_toggle_pressed: true,
            ..FighterInput::default().with_stick(1.0, 0.0)
        };

        tick(&mut body, &toggle, true);
        assert_eq!(body.move_state, MoveState::InitialDash);

        tick(&mut body, &toggle, true);
        assert!(!body.run_mode);
        // Idle → walk branch в том же тике
        assert_eq!(body.move_state, MoveState::Walk);
        assert_eq!(body.velocity.x, 3.5);
    }

    #[test]
    fn test_run_decelerates_to_idle() {
        let mut body = grounded_body();
        body.run_mode = true;
        body.move_state = MoveState::Run;
        body.velocity.x = 6.5;

        let neutral = FighterInput::default();
        for _ in 0..7 {
            tick(&mut body, &neutral, true);
            assert_eq!(body.move_state, MoveState::Run);
        }
        assert!(body.velocity.x > 0.0);

        tick(&mut body, &neutral, true);
        assert_eq!(body.velocity.x, 0.0);
        assert_eq!(body.move_state, MoveState::Idle);
    }

    #[test]
    fn test_face_by_velocity_when_idle() {
        let mut body = grounded_body();
        body.velocity.x = -1.0;

        tick(&mut body, &FighterInput::default(), true);

        assert_eq!(body.facing, Facing::Left);
        assert_eq!(body.velocity.x, 0.0);
    }

    #[test]
    fn test_no_air_facing_flip_by_default() {
        let mut body = FighterBody::new(Vec2::new(0.0, 3.0), Facing::Right, 2);

        tick(&mut body, &FighterInput::default().with_stick(-1.0, 0.0), false);

        assert_eq!(body.facing, Facing::Right);
        // air control всё равно работает
        assert!(body.velocity.x < 0.0);
    }
}
