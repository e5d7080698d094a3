//! Attack session: polled state machine одной атаки.
//!
//! Startup → Active → {Endlag | LandingLag} → Finished
//!
//! `advance()` вызывается ровно один раз за тик, начиная с тика создания
//! (он же первый тик startup). Переходы применяются сразу: фаза нулевой
//! длины пропускается, следующая фаза начинается со следующего тика.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use bevy::prelude::*;

use crate::config::CombatTuning;
use crate::movement::{FighterBody, FighterCue};
use crate::physics::{LayerMask, OverlapQuery};
use crate::shared::SimClock;

use super::{AttackDefinition, HitKind, HitLanded, MoveSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPhase {
    Startup { remaining: u32 },
    /// 1-based active frame processed on the next advance
    Active { frame: u32 },
    Endlag { remaining: u32 },
    /// Waiting for the movement landing-lag lock to finish
    LandingLag,
    Finished,
}

/// Per-tick read-only view of the attacker.
#[derive(Debug, Clone, Copy)]
pub struct SessionTick<'a> {
    pub attacker: Entity,
    pub tick: u64,
    pub clock: &'a SimClock,
    pub tuning: &'a CombatTuning,
}

/// Ephemeral per-attack state (≤1 per fighter).
#[derive(Debug, Clone)]
pub struct AttackSession {
    pub slot: MoveSlot,
    pub clip: Arc<AttackDefinition>,
    pub phase: AttackPhase,
    /// Ticks advanced so far
    pub ticks: u32,
    pub started_airborne: bool,
    /// A consuming Single window hit: no more window tests
    pub consumed: bool,
    hit_once: HashSet<Entity>,
    last_multi_hit: HashMap<(Entity, usize), u64>,
}

impl AttackSession {
    pub fn new(slot: MoveSlot, clip: Arc<AttackDefinition>, started_airborne: bool) -> Self {
        let phase = if clip.startup_frames > 0 {
            AttackPhase::Startup {
                remaining: clip.startup_frames,
            }
        } else {
            after_startup(&clip)
        };

        Self {
            slot,
            clip,
            phase,
            ticks: 0,
            started_airborne,
            consumed: false,
            hit_once: HashSet::new(),
            last_multi_hit: HashMap::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == AttackPhase::Finished
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, AttackPhase::Active { .. })
    }

    /// Advance one tick. Detected hits are pushed into `hits`.
    pub fn advance<Q>(
        &mut self,
        ctx: &SessionTick,
        body: &mut FighterBody,
        hurtboxes: &Q,
        cues: &mut Vec<FighterCue>,
        hits: &mut Vec<HitLanded>,
    ) where
        Q: OverlapQuery<Hit = Entity>,
    {
        self.ticks += 1;

        match self.phase {
            AttackPhase::Startup { remaining } => {
                if self.landed(body, ctx.tuning) {
                    self.cut_on_landing(body, cues);
                    return;
                }

                let remaining = remaining.saturating_sub(1);
                self.phase = if remaining == 0 {
                    after_startup(&self.clip)
                } else {
                    AttackPhase::Startup { remaining }
                };
            }
            AttackPhase::Active { frame } => {
                if self.landed(body, ctx.tuning) {
                    self.cut_on_landing(body, cues);
                    return;
                }

                if !self.consumed {
                    self.test_windows(frame, ctx, body, hurtboxes, hits);
                }

                self.phase = if frame >= self.clip.max_active_frame() {
                    endlag_or_finished(&self.clip)
                } else {
                    AttackPhase::Active { frame: frame + 1 }
                };
            }
            AttackPhase::Endlag { remaining } => {
                let remaining = remaining.saturating_sub(1);
                self.phase = if remaining == 0 {
                    AttackPhase::Finished
                } else {
                    AttackPhase::Endlag { remaining }
                };
            }
            AttackPhase::LandingLag => {
                if !body.locks.in_landing_lag() {
                    self.phase = AttackPhase::Finished;
                }
            }
            AttackPhase::Finished => {}
        }
    }

    /// Aerial-ends-on-landing policy.
    fn landed(&self, body: &FighterBody, tuning: &CombatTuning) -> bool {
        tuning.aerial_ends_on_landing && self.started_airborne && body.grounded
    }

    fn cut_on_landing(&mut self, body: &mut FighterBody, cues: &mut Vec<FighterCue>) {
        if self.clip.landing_lag > 0 {
            body.begin_landing_lag(self.clip.landing_lag, cues);
            self.phase = AttackPhase::LandingLag;
        } else {
            self.phase = endlag_or_finished(&self.clip);
        }
    }

    fn test_windows<Q>(
        &mut self,
        frame: u32,
        ctx: &SessionTick,
        body: &FighterBody,
        hurtboxes: &Q,
        hits: &mut Vec<HitLanded>,
    ) where
        Q: OverlapQuery<Hit = Entity>,
    {
        let clip = Arc::clone(&self.clip);

        for (index, window) in clip.windows.iter().enumerate() {
            if !window.is_active_on(frame) {
                continue;
            }

            let shape = window.shape(body.position, body.facing, ctx.tuning);
            let mut window_hit = false;

            for target in hurtboxes.overlap_shape(&shape, LayerMask::HURTBOX) {
                if target == ctx.attacker {
                    continue;
                }

                let allowed = match window.hit_kind {
                    HitKind::Single => self.hit_once.insert(target),
                    HitKind::Multi => {
                        let interval = ctx.clock.secs_to_ticks(window.multi_hit_interval_secs());
                        let key = (target, index);
                        let ready = self
                            .last_multi_hit
                            .get(&key)
                            .is_none_or(|last| ctx.tick.saturating_sub(*last) >= interval);
                        if ready {
                            self.last_multi_hit.insert(key, ctx.tick);
                        }
                        ready
                    }
                };

                if allowed {
                    window_hit = true;
                    hits.push(HitLanded {
                        attacker: ctx.attacker,
                        target,
                        slot: self.slot,
                        window_index: index,
                        window: window.clone(),
                        attacker_facing: body.facing,
                    });
                }
            }

            if window_hit && window.hit_kind == HitKind::Single && window.consume_on_hit {
                self.consumed = true;
                break;
            }
        }
    }
}

fn after_startup(clip: &AttackDefinition) -> AttackPhase {
    if clip.max_active_frame() > 0 {
        AttackPhase::Active { frame: 1 }
    } else {
        endlag_or_finished(clip)
    }
}

fn endlag_or_finished(clip: &AttackDefinition) -> AttackPhase {
    if clip.endlag_frames > 0 {
        AttackPhase::Endlag {
            remaining: clip.endlag_frames,
        }
    } else {
        AttackPhase::Finished
    }
}
