//! Combat domain: frame-exact attack execution + knockback
//!
//! ECS ответственность:
//! - AttackExecutor: ≤1 AttackSession на бойца (Startup → Active → Endlag/LandingLag)
//! - Hit detection: окна атаки против HurtboxSnapshot предыдущего тика
//! - KnockbackResolver: damage → launch vector → hitstun
//!
//! Presentation (анимации, tint, HUD) получает только события:
//! FighterCueEvent, HitLanded, FighterHit, AttackRejected.

use bevy::prelude::*;

pub mod attack;
pub mod events;
pub mod hitbox;
pub mod knockback;
pub mod moveset;
pub mod session;
pub mod systems;


// Re-export основных типов
pub use attack::{AngleMode, AttackDefinition, HitKind, HitWindow};
pub use events::{AttackRejected, FighterHit, HitLanded, RejectReason};
pub use hitbox::{snapshot_hurtboxes, Hurtbox, HurtboxSnapshot};
pub use knockback::{
    apply_knockback, direction_from_angle, hitstun_seconds, knockback_magnitude, resolve_direction, resolve_hit,
    KnockbackOutcome,
};
pub use moveset::{select_slot, AttackButton, MoveSlot, Moveset};
pub use session::{AttackPhase, AttackSession, SessionTick};
pub use systems::*;

use crate::SimSet;

/// Attack executor of a fighter. Session presence = busy.
#[derive(Component, Debug, Clone, Default)]
pub struct AttackExecutor {
    pub session: Option<AttackSession>,
}

impl AttackExecutor {
    pub fn is_busy(&self) -> bool {
        self.session.is_some()
    }

    pub fn phase(&self) -> Option<AttackPhase> {
        self.session.as_ref().map(|session| session.phase)
    }
}

/// Combat Plugin
///
/// Регистрирует combat события и системы в FixedUpdate:
/// 1. start_attacks: input edges → AttackSession
/// 2. advance_attack_sessions: фазы + hit detection (HitLanded)
/// 3. resolve_hits: damage + knockback + hitstun (FighterHit)
/// 4. snapshot_hurtboxes: hurtboxes для следующего тика
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HitLanded>()
            .add_event::<FighterHit>()
            .add_event::<AttackRejected>()
            .init_resource::<HurtboxSnapshot>();

        app.add_systems(
            FixedUpdate,
            (
                start_attacks.in_set(SimSet::AttackStart),
                advance_attack_sessions.in_set(SimSet::AttackAdvance),
                resolve_hits.in_set(SimSet::HitResolve),
                snapshot_hurtboxes.in_set(SimSet::Snapshot),
            ),
        );
    }
}
