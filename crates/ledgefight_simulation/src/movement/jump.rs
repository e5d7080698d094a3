//! Jump model: jump squat, short hop, double jump, momentum carry,
//! landing transfer, air control.
//!
//! Impulses пишутся прямо в velocity.y (unit mass). Horizontal speed
//! идёт через локальный `vx`, который controller коммитит один раз за тик.

use crate::config::LandingMode;
use crate::shared::{lerp, move_towards};

use super::controller::StepContext;
use super::{FighterBody, FighterCue};

const AIR_INPUT_THRESHOLD: f32 = 0.01;
const MIN_WINDOW_SECS: f32 = 0.0001;

/// Airborne → grounded transition.
pub fn on_landed(body: &mut FighterBody, ctx: &StepContext, vx: &mut f32, cues: &mut Vec<FighterCue>) {
    body.jumps_left = ctx.stats.max_jumps;
    body.jump.clear();
    body.carry.active = false;
    cues.push(FighterCue::Touchdown);

    let tuning = ctx.tuning;
    if !tuning.enable_landing_transfer {
        return;
    }

    if tuning.landing_clamp_to_ground_max {
        let cap = ctx.stats.run_speed;
        *vx = vx.clamp(-cap, cap);
    }

    if tuning.landing_mode == LandingMode::BlendToTarget {
        body.landing_blend.start_vx = *vx;
        body.landing_blend.elapsed = 0.0;
        body.landing_blend.active = tuning.landing_blend_time > 0.0;
    }
}

/// Jump press / release handling (grounded squat, airborne double jump).
pub fn handle_jump_input(body: &mut FighterBody, ctx: &StepContext, vx: &mut f32, cues: &mut Vec<FighterCue>) {
    let input = ctx.input;

    if body.grounded {
        if input.jump_pressed && !body.jump.squat_pending() {
            body.jump.short_hop_queued = false;
            body.jump.squat_frames_left = ctx.stats.jump_squat_frames;

            if body.jump.squat_pending() {
                cues.push(FighterCue::JumpSquat);
            } else {
                // 0 squat frames: takeoff on the press tick
                take_off(body, ctx, vx, cues);
                return;
            }
        }

        if body.jump.squat_pending() && !input.jump_held {
            body.jump.short_hop_queued = true;
        }
    } else if input.jump_pressed && body.jumps_left > 0 && !body.jump.squat_pending() {
        body.velocity.y = ctx.stats.double_jump_force;
        body.jumps_left -= 1;
        apply_carry(body, ctx, vx);
        cues.push(FighterCue::Takeoff { double_jump: true });
    }
}

/// One squat tick; takes off when the counter reaches 0.
pub fn tick_jump_squat(body: &mut FighterBody, ctx: &StepContext, vx: &mut f32, cues: &mut Vec<FighterCue>) {
    if !body.jump.squat_pending() {
        return;
    }

    body.jump.squat_frames_left -= 1;
    if body.jump.squat_frames_left == 0 {
        take_off(body, ctx, vx, cues);
    }
}

/// Grounded takeoff: short hop or full jump, then carry snapshot.
/// The fighter is airborne for the rest of the tick.
pub fn take_off(body: &mut FighterBody, ctx: &StepContext, vx: &mut f32, cues: &mut Vec<FighterCue>) {
    let force = if body.jump.short_hop_queued {
        ctx.stats.short_hop_force
    } else {
        ctx.stats.jump_force
    };

    body.jump.clear();
    body.velocity.y = force;
    body.jumps_left = body.jumps_left.saturating_sub(1);
    apply_carry(body, ctx, vx);
    body.grounded = false;

    cues.push(FighterCue::Takeoff { double_jump: false });
}

/// Carry snapshot at takeoff (ground jump и double jump).
pub fn apply_carry(body: &mut FighterBody, ctx: &StepContext, vx: &mut f32) {
    let tuning = ctx.tuning;
    let stats = ctx.stats;

    let v0 = *vx;
    let mut target = v0 * tuning.inherit_factor;

    if tuning.preserve_run_speed_during_jump {
        let cap = if tuning.jump_carry_max_x > 0.0 {
            tuning.jump_carry_max_x
        } else {
            stats.run_speed
        };
        body.carry.pinned_vx = target.clamp(-cap, cap);
        body.carry.active = true;
        body.carry.elapsed = 0.0;
        body.carry.apex_elapsed = 0.0;
    }

    body.carry.decay_active = tuning.use_decaying_carry && tuning.carry_duration > 0.0;
    body.carry.decay_elapsed = 0.0;

    if tuning.clamp_inherited_to_air_max {
        target = target.clamp(-stats.air_speed, stats.air_speed);
    }

    *vx = target;
    body.carry.pre_jump_vx = v0;
    body.landing_blend.active = false;
}

/// Decaying-carry window timer (runs every unlocked tick).
pub fn tick_decay_window(body: &mut FighterBody, ctx: &StepContext) {
    if !body.carry.decay_active {
        return;
    }

    body.carry.decay_elapsed += ctx.dt;
    if body.carry.decay_elapsed >= ctx.tuning.carry_duration {
        body.carry.decay_active = false;
    }
}

/// Airborne horizontal velocity: hard carry pin, otherwise air control.
pub fn air_velocity(body: &mut FighterBody, ctx: &StepContext, vx: &mut f32) {
    let tuning = ctx.tuning;
    let air_speed = ctx.stats.air_speed;

    if body.carry.active {
        *vx = body.carry.pinned_vx;
        body.carry.elapsed += ctx.dt;

        let past_min = body.carry.elapsed >= tuning.carry_min_time;
        let falling = body.velocity.y <= 0.0;

        let mut release = false;
        if tuning.release_carry_on_apex && past_min && falling {
            body.carry.apex_elapsed += ctx.dt;
            release = body.carry.apex_elapsed >= tuning.carry_after_apex_time;
        }
        if body.carry.elapsed >= tuning.carry_max_time {
            release = true;
        }

        if release {
            body.carry.active = false;
            *vx = vx.clamp(-air_speed, air_speed);
        }
        return;
    }

    let desired = ctx.input.move_x * air_speed;
    let rate = if desired.abs() > AIR_INPUT_THRESHOLD {
        tuning.air_accel
    } else {
        tuning.air_decel
    };
    *vx = move_towards(*vx, desired, rate * ctx.dt);

    if body.carry.decay_active {
        let t = (body.carry.decay_elapsed / tuning.carry_duration.max(MIN_WINDOW_SECS)).clamp(0.0, 1.0);
        let carry_target = body.carry.pre_jump_vx * lerp(tuning.inherit_factor, tuning.carry_end_factor, t);
        *vx = move_towards(*vx, carry_target, rate * 0.5 * ctx.dt);
    }

    *vx = vx.clamp(-air_speed, air_speed);
}

/// BlendToTarget landing transfer. `Some(vx)` overrides the ground branch
/// while the blend runs.
pub fn apply_landing_blend(body: &mut FighterBody, ctx: &StepContext, ground_target: f32) -> Option<f32> {
    let tuning = ctx.tuning;
    if !body.landing_blend.active
        || !tuning.enable_landing_transfer
        || tuning.landing_mode != LandingMode::BlendToTarget
    {
        return None;
    }

    body.landing_blend.elapsed += ctx.dt;
    let t = (body.landing_blend.elapsed / tuning.landing_blend_time.max(MIN_WINDOW_SECS)).clamp(0.0, 1.0);
    let blended = lerp(body.landing_blend.start_vx, ground_target, t);
    let vx = move_towards(blended, ground_target, ctx.stats.run_accel * ctx.dt);

    if t >= 1.0 {
        body.landing_blend.active = false;
    }
    Some(vx)
}
