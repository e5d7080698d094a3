//! Actor domain: damage percent + hitstun
//!
//! ActorState живёт отдельно от FighterBody: knockback resolver пишет
//! сюда, controller только читает `in_hitstun()`.

use bevy::prelude::*;

use crate::shared::SimClock;

/// Per-fighter damage percent and hitstun countdown.
///
/// Percent только растёт; сбрасывается лишь явным `reset()`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct ActorState {
    damage_percent: f32,
    hitstun_seconds_left: f32,
}

impl ActorState {
    /// Negative / non-finite amounts are ignored.
    pub fn add_damage(&mut self, amount: f32) {
        if amount.is_finite() && amount > 0.0 {
            self.damage_percent += amount;
        }
    }

    pub fn percent(&self) -> f32 {
        self.damage_percent
    }

    pub fn reset(&mut self) {
        self.damage_percent = 0.0;
        self.hitstun_seconds_left = 0.0;
    }

    pub fn in_hitstun(&self) -> bool {
        self.hitstun_seconds_left > 0.0
    }

    pub fn hitstun_seconds_left(&self) -> f32 {
        self.hitstun_seconds_left
    }

    /// Replaces the current hitstun (a fresh hit restarts the countdown).
    pub fn set_hitstun(&mut self, seconds: f32) {
        self.hitstun_seconds_left = seconds.max(0.0);
    }

    pub fn tick(&mut self, dt: f32) {
        self.hitstun_seconds_left = (self.hitstun_seconds_left - dt).max(0.0);
    }
}

/// Percent for HUD: rounded to whole number, optional "%" suffix.
pub fn display_percent(percent: f32, with_suffix: bool) -> String {
    let rounded = percent.max(0.0).round() as u32;
    if with_suffix {
        format!("{}%", rounded)
    } else {
        rounded.to_string()
    }
}

/// System: hitstun countdown.
pub fn tick_hitstun(clock: Res<SimClock>, mut actors: Query<&mut ActorState>) {
    let dt = clock.dt();
    for mut actor in actors.iter_mut() {
        if actor.in_hitstun() {
            actor.tick(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_only_grows() {
        let mut actor = ActorState::default();
        actor.add_damage(12.0);
        actor.add_damage(-5.0);
        actor.add_damage(f32::NAN);
        assert_eq!(actor.percent(), 12.0);

        actor.reset();
        assert_eq!(actor.percent(), 0.0);
    }

    #[test]
    fn test_hitstun_clamps_at_zero() {
        let mut actor = ActorState::default();
        actor.set_hitstun(0.03);
        assert!(actor.in_hitstun());

        actor.tick(1.0 / 60.0);
        assert!(actor.in_hitstun());
        actor.tick(1.0 / 60.0);
        assert!(!actor.in_hitstun());
        assert_eq!(actor.hitstun_seconds_left(), 0.0);
    }

    #[test]
    fn test_display_percent() {
        assert_eq!(display_percent(42.6, true), "43%");
        assert_eq!(display_percent(0.4, false), "0");
    }
}
