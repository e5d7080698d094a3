//! Fighter controller: один тик движения бойца.
//!
//! Порядок внутри тика:
//! 1. HardLock (skip всего, кроме countdown'а)
//! 2. Ground probe + landing transition
//! 3. LandingLag (skip всего, кроме countdown'а)
//! 4. Facing → run toggle → jump input → carry window → jump squat
//! 5. Ground branch (+ landing blend) или air branch
//! 6. Commit velocity.x (кроме hitstun)

use bevy::prelude::*;

use crate::actor::ActorState;
use crate::config::{ControllerTuning, FighterStats};
use crate::fighter::FighterLoadout;
use crate::input::FighterInput;
use crate::physics::{BodyCollider, GroundProbe, StageGeometry};
use crate::shared::SimClock;

use super::jump::{
    air_velocity, apply_landing_blend, handle_jump_input, on_landed, tick_decay_window, tick_jump_squat,
};
use super::locomotion::{ground_velocity, handle_run_toggle, update_facing};
use super::{FighterBody, FighterCue, FighterCueEvent, VelocityGovernor};

/// Read-only inputs of one controller tick.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub stats: &'a FighterStats,
    pub tuning: &'a ControllerTuning,
    pub input: &'a FighterInput,
    /// Ground probe result for this tick
    pub grounded_now: bool,
    pub in_hitstun: bool,
    pub dt: f32,
}

/// Advance one fighter by one tick. Returns the velocity.x governor.
pub fn step_fighter(body: &mut FighterBody, ctx: &StepContext, cues: &mut Vec<FighterCue>) -> VelocityGovernor {
    // HardLock: probe тоже пропускаем, landing заметим после разморозки
    if body.locks.hard_locked() {
        body.locks.tick_hard_lock(cues);
        body.velocity.x = 0.0;
        body.governor = VelocityGovernor::HardLock;
        return body.governor;
    }

    let mut vx = body.velocity.x;

    let was_grounded = body.grounded;
    body.grounded = ctx.grounded_now;
    if body.grounded && !was_grounded {
        on_landed(body, ctx, &mut vx, cues);
    }

    if body.locks.in_landing_lag() {
        body.locks.tick_landing_lag(cues);
        body.velocity.x = 0.0;
        body.governor = VelocityGovernor::LandingLag;
        return body.governor;
    }

    update_facing(body, ctx);
    handle_run_toggle(body, ctx, cues);
    handle_jump_input(body, ctx, &mut vx, cues);
    tick_decay_window(body, ctx);
    tick_jump_squat(body, ctx, &mut vx, cues);

    if body.grounded {
        let target = ground_velocity(body, ctx, &mut vx);
        if let Some(blended) = apply_landing_blend(body, ctx, target) {
            vx = blended;
        }
    } else {
        air_velocity(body, ctx, &mut vx);
    }

    body.governor = if ctx.in_hitstun {
        VelocityGovernor::Hitstun
    } else {
        body.velocity.x = vx;
        if body.carry.active {
            VelocityGovernor::JumpCarry
        } else {
            VelocityGovernor::Movement
        }
    };
    body.governor
}

/// System: ground probe + controller tick for every fighter.
pub fn fighter_controller(
    clock: Res<SimClock>,
    stage: Res<StageGeometry>,
    mut fighters: Query<(
        Entity,
        &FighterLoadout,
        &FighterInput,
        &GroundProbe,
        &BodyCollider,
        &ActorState,
        &mut FighterBody,
    )>,
    mut cue_events: EventWriter<FighterCueEvent>,
) {
    let mut cues = Vec::new();

    for (entity, loadout, input, probe, collider, actor, mut body) in fighters.iter_mut() {
        let ctx = StepContext {
            stats: &loadout.stats,
            tuning: &loadout.controller,
            input,
            grounded_now: probe.is_grounded(body.position, collider, &*stage),
            in_hitstun: actor.in_hitstun(),
            dt: clock.dt(),
        };

        step_fighter(&mut body, &ctx, &mut cues);

        for cue in cues.drain(..) {
            cue_events.write(FighterCueEvent { fighter: entity, cue });
        }
    }
}
