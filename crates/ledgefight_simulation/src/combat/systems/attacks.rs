//! Attack executor systems: start on input edges, advance sessions.

use bevy::prelude::*;

use crate::combat::{
    select_slot, AttackButton, AttackExecutor, AttackRejected, AttackSession, HitLanded, HurtboxSnapshot,
    RejectReason, SessionTick,
};
use crate::fighter::{Fighter, FighterLoadout};
use crate::input::FighterInput;
use crate::movement::{FighterBody, FighterCue, FighterCueEvent};
use crate::shared::SimClock;

/// System: start attacks from this tick's input edges.
///
/// Rejected silently while a session runs or a movement lock is active.
/// Missing moveset / empty slot → `AttackRejected` + warning.
pub fn start_attacks(
    mut fighters: Query<(
        Entity,
        &Fighter,
        &FighterLoadout,
        &FighterInput,
        &FighterBody,
        &mut AttackExecutor,
    )>,
    mut cue_events: EventWriter<FighterCueEvent>,
    mut rejected_events: EventWriter<AttackRejected>,
) {
    for (entity, fighter, loadout, input, body, mut executor) in fighters.iter_mut() {
        let Some(button) = AttackButton::from_input(input) else {
            continue;
        };

        if executor.is_busy() || body.movement_locked() {
            continue;
        }

        let wanted = select_slot(button, input, body.grounded, body.facing);

        let Some(moveset) = loadout.moveset.as_ref() else {
            crate::logger::log_warning(&format!(
                "⚠️ {} ({:?}): attack input but no moveset assigned",
                fighter.name, entity
            ));
            rejected_events.write(AttackRejected {
                fighter: entity,
                reason: RejectReason::NoMoveset,
            });
            continue;
        };

        let Some((slot, clip)) = moveset.resolve(wanted) else {
            crate::logger::log_warning(&format!(
                "⚠️ {} ({:?}): no attack in slot {:?}",
                fighter.name, entity, wanted
            ));
            rejected_events.write(AttackRejected {
                fighter: entity,
                reason: RejectReason::EmptySlot(wanted),
            });
            continue;
        };

        if let Some(trigger) = clip.animator_trigger.as_ref().filter(|t| !t.is_empty()) {
            cue_events.write(FighterCueEvent {
                fighter: entity,
                cue: FighterCue::AttackTrigger(trigger.clone()),
            });
        }

        crate::logger::log(&format!(
            "⚔️ {} ({:?}): {:?} started (startup {}, active {}, endlag {})",
            fighter.name,
            entity,
            slot,
            clip.startup_frames,
            clip.max_active_frame(),
            clip.endlag_frames
        ));

        executor.session = Some(AttackSession::new(slot, clip, !body.grounded));
    }
}

/// System: advance every running session by one tick.
///
/// Hits are tested against the previous-tick hurtbox snapshot and only
/// reported (`HitLanded`); `resolve_hits` applies them.
pub fn advance_attack_sessions(
    clock: Res<SimClock>,
    hurtboxes: Res<HurtboxSnapshot>,
    mut fighters: Query<(Entity, &Fighter, &FighterLoadout, &mut FighterBody, &mut AttackExecutor)>,
    mut cue_events: EventWriter<FighterCueEvent>,
    mut hit_events: EventWriter<HitLanded>,
) {
    let mut cues = Vec::new();
    let mut hits = Vec::new();

    for (entity, fighter, loadout, mut body, mut executor) in fighters.iter_mut() {
        let Some(session) = executor.session.as_mut() else {
            continue;
        };

        let ctx = SessionTick {
            attacker: entity,
            tick: clock.tick,
            clock: &clock,
            tuning: &loadout.combat,
        };
        session.advance(&ctx, &mut body, &*hurtboxes, &mut cues, &mut hits);

        if session.is_finished() {
            crate::logger::log(&format!(
                "✅ {} ({:?}): {:?} finished after {} ticks",
                fighter.name, entity, session.slot, session.ticks
            ));
            executor.session = None;
        }

        for cue in cues.drain(..) {
            cue_events.write(FighterCueEvent { fighter: entity, cue });
        }
    }

    hit_events.write_batch(hits);
}
