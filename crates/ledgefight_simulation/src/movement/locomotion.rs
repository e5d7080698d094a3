//! Ground locomotion: Idle/Walk/InitialDash/Run + facing.

use crate::shared::{move_towards, sign_or_zero};

use super::controller::StepContext;
use super::{Facing, FighterBody, FighterCue, MoveState};

/// Stick deflection that starts a dash / keeps running.
pub const RUN_STICK_THRESHOLD: f32 = 0.1;
/// Below this |velocity.x| a decelerating runner becomes Idle.
pub const RUN_STOP_SPEED: f32 = 0.02;
/// Walk vs Idle split on the walk target.
pub const WALK_THRESHOLD: f32 = 0.05;

const FACE_INPUT_THRESHOLD: f32 = 0.01;
const FACE_VELOCITY_THRESHOLD: f32 = 0.05;

/// Facing rules:
/// - stick (grounded, или в воздухе с allow_air_facing_flips) → sign(input)
/// - grounded без стика + face_by_velocity → sign(velocity.x)
pub fn update_facing(body: &mut FighterBody, ctx: &StepContext) {
    let input_x = ctx.input.move_x;

    if (body.grounded || ctx.tuning.allow_air_facing_flips) && input_x.abs() > FACE_INPUT_THRESHOLD {
        body.facing = Facing::from_sign(input_x);
    } else if body.grounded && ctx.tuning.face_by_velocity_when_idle {
        let vx = body.velocity.x;
        if vx.abs() > FACE_VELOCITY_THRESHOLD {
            body.facing = Facing::from_sign(vx);
        }
    }
}

/// Run toggle edge + late dash trigger.
///
/// Dash condition re-checked every tick while run mode is on, so a stick
/// pushed after the toggle still starts the dash.
pub fn handle_run_toggle(body: &mut FighterBody, ctx: &StepContext, cues: &mut Vec<FighterCue>) {
    if ctx.input.run_toggle_pressed {
        body.run_mode = !body.run_mode;
        if !body.run_mode && body.move_state == MoveState::InitialDash {
            body.move_state = MoveState::Idle;
            body.dash_frames_left = 0;
        }
    }

    if body.run_mode {
        try_begin_dash(body, ctx, cues);
    }
}

fn try_begin_dash(body: &mut FighterBody, ctx: &StepContext, cues: &mut Vec<FighterCue>) {
    let can_dash = matches!(body.move_state, MoveState::Idle | MoveState::Walk);
    if !body.grounded || !can_dash || ctx.input.move_x.abs() <= RUN_STICK_THRESHOLD {
        return;
    }

    body.move_state = MoveState::InitialDash;
    body.dash_frames_left = ctx.stats.dash_frames.max(1);
    cues.push(FighterCue::DashStart);
}

/// Grounded horizontal velocity for this tick. Returns the ground target
/// (used by the landing blend).
pub fn ground_velocity(body: &mut FighterBody, ctx: &StepContext, vx: &mut f32) -> f32 {
    let stats = ctx.stats;
    let input_x = ctx.input.move_x;

    match body.move_state {
        MoveState::InitialDash => {
            let target = stats.dash_speed * body.facing_sign();
            *vx = target;
            body.dash_frames_left = body.dash_frames_left.saturating_sub(1);
            if body.dash_frames_left == 0 {
                body.move_state = MoveState::Run;
            }
            target
        }
        MoveState::Run => {
            let want = if body.run_mode && input_x.abs() > RUN_STICK_THRESHOLD {
                sign_or_zero(input_x) * stats.run_speed
            } else {
                0.0
            };

            let rate = if speeding_up(*vx, want) { stats.run_accel } else { stats.run_decel };
            *vx = move_towards(*vx, want, rate * ctx.dt);

            if vx.abs() < RUN_STOP_SPEED && want == 0.0 {
                body.move_state = MoveState::Idle;
            }
            want
        }
        MoveState::Idle | MoveState::Walk => {
            let target = input_x * stats.walk_speed;
            *vx = target;
            body.move_state = if target.abs() > WALK_THRESHOLD {
                MoveState::Walk
            } else {
                MoveState::Idle
            };
            target
        }
    }
}

/// Accelerate only when |v| grows toward a non-zero target on the same side.
/// Turnarounds brake with decel first.
fn speeding_up(current: f32, want: f32) -> bool {
    if want == 0.0 || want.abs() <= current.abs() {
        return false;
    }
    current == 0.0 || sign_or_zero(current) == sign_or_zero(want)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speeding_up_rules() {
        assert!(speeding_up(0.0, 6.5));
        assert!(speeding_up(3.0, 6.5));
        assert!(!speeding_up(3.0, -6.5));
        assert!(!speeding_up(6.5, 0.0));
        assert!(!speeding_up(7.0, 6.5));
    }
}
