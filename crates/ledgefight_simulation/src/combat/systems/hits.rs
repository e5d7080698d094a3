//! Hit resolution system.

use bevy::prelude::*;

use crate::actor::ActorState;
use crate::combat::{resolve_hit, FighterHit, HitLanded};
use crate::fighter::FighterLoadout;
use crate::movement::FighterBody;

/// System: apply this tick's hits in (attacker, target, window) order.
///
/// Damage первым, потом knockback (magnitude учитывает новый percent).
pub fn resolve_hits(
    mut hit_events: EventReader<HitLanded>,
    mut targets: Query<(&FighterLoadout, &mut FighterBody, &mut ActorState)>,
    mut resolved_events: EventWriter<FighterHit>,
) {
    let mut hits: Vec<&HitLanded> = hit_events.read().collect();
    hits.sort_by_key(|hit| (hit.attacker, hit.target, hit.window_index));

    for hit in hits {
        let Ok((loadout, mut body, mut actor)) = targets.get_mut(hit.target) else {
            continue;
        };

        let outcome = resolve_hit(&hit.window, hit.attacker_facing, &mut body, &mut actor, &loadout.actor);

        crate::logger::log(&format!(
            "💥 {:?} → {:?}: {:?} window {} ({:.1}% → kb {:.2}, hitstun {:.2}s)",
            hit.attacker,
            hit.target,
            hit.slot,
            hit.window_index,
            actor.percent(),
            outcome.magnitude,
            outcome.hitstun_seconds
        ));

        resolved_events.write(FighterHit {
            attacker: hit.attacker,
            target: hit.target,
            damage: hit.window.damage,
            knockback: outcome.velocity,
            hitstun_seconds: outcome.hitstun_seconds,
            percent_after: actor.percent(),
        });
    }
}
