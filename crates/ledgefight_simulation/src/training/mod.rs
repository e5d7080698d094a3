//! Training mode: pause / single-step, CPU dummy, reposition helper
//!
//! Pause пропускает ЦЕЛЫЕ тики: gate считается один раз в начале тика,
//! все остальные SimSet'ы читают результат через `simulation_should_tick`.

use bevy::prelude::*;

use crate::fighter::Player;
use crate::input::FighterInput;
use crate::movement::{FighterBody, MoveState};
use crate::physics::{BodyCollider, StageGeometry};
use crate::SimSet;

/// Gap between player and CPU after repositioning.
pub const REPOSITION_SPACING: f32 = 0.2;
/// Ground search distance above/below the target point.
pub const REPOSITION_SNAP_DISTANCE: f32 = 3.0;
const REPOSITION_LIFT: f32 = 0.001;

/// Pause / step state of the simulation.
#[derive(Resource, Debug, Clone, Default)]
pub struct TrainingControl {
    pub paused: bool,
    /// One pending single-step (only meaningful while paused)
    pub step_requested: bool,
    tick_active: bool,
}

impl TrainingControl {
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        crate::logger::log_info(&format!("⏸️ Simulation {}", if self.paused { "paused" } else { "resumed" }));
    }

    /// Run exactly one tick while paused. Ignored when running.
    pub fn request_step(&mut self) {
        if self.paused {
            self.step_requested = true;
        }
    }

    /// Whether the current tick runs (valid after `gate_simulation_tick`).
    pub fn tick_active(&self) -> bool {
        self.tick_active
    }
}

/// System: decide once per tick whether the simulation advances.
pub fn gate_simulation_tick(mut control: ResMut<TrainingControl>) {
    let step = std::mem::take(&mut control.step_requested);
    control.tick_active = !control.paused || step;
}

/// Run condition for every simulation set.
pub fn simulation_should_tick(control: Res<TrainingControl>) -> bool {
    control.tick_active()
}

/// CPU opponent level. Level 0 = dummy: no inputs at all.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct CpuLevel(pub u8);

impl CpuLevel {
    pub fn is_dummy(&self) -> bool {
        self.0 == 0
    }
}

/// System: dummies never act, whatever was written into their input.
pub fn silence_cpu_dummies(mut cpus: Query<(&CpuLevel, &mut FighterInput)>) {
    for (level, mut input) in cpus.iter_mut() {
        if level.is_dummy() {
            input.release_all();
        }
    }
}

/// Event: put every CPU right in front of the player.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RepositionCpu;

/// Place `cpu` in front of `player` (player facing), snapped onto the ground
/// under the target point if there is one, facing the player, at rest.
pub fn reposition_in_front(
    player: &FighterBody,
    player_collider: &BodyCollider,
    cpu: &mut FighterBody,
    cpu_collider: &BodyCollider,
    stage: &StageGeometry,
) {
    let dir = player.facing_sign();
    let target_x =
        player.position.x + dir * (player_collider.half_extents.x + cpu_collider.half_extents.x + REPOSITION_SPACING);

    let target_y = stage
        .ground_top_below(
            target_x,
            player.position.y + REPOSITION_SNAP_DISTANCE,
            REPOSITION_SNAP_DISTANCE * 2.0,
        )
        .map_or(player.position.y, |top| top + cpu_collider.half_extents.y + REPOSITION_LIFT);

    cpu.position = Vec2::new(target_x, target_y);
    cpu.velocity = Vec2::ZERO;
    cpu.facing = player.facing.flipped();

    // сброс momentum-состояния, чтобы dummy не "уехал"
    cpu.move_state = MoveState::Idle;
    cpu.dash_frames_left = 0;
    cpu.jump.clear();
    cpu.carry = Default::default();
    cpu.landing_blend = Default::default();
}

/// System: handle `RepositionCpu` requests (runs even while paused).
pub fn handle_reposition_requests(
    mut requests: EventReader<RepositionCpu>,
    stage: Res<StageGeometry>,
    players: Query<(&FighterBody, &BodyCollider), (With<Player>, Without<CpuLevel>)>,
    mut cpus: Query<(Entity, &mut FighterBody, &BodyCollider), (With<CpuLevel>, Without<Player>)>,
) {
    if requests.read().count() == 0 {
        return;
    }

    let Ok((player, player_collider)) = players.single() else {
        crate::logger::log_warning("⚠️ RepositionCpu: expected exactly one Player fighter");
        return;
    };

    for (entity, mut cpu, cpu_collider) in cpus.iter_mut() {
        reposition_in_front(player, player_collider, &mut cpu, cpu_collider, &stage);
        crate::logger::log(&format!("📍 CPU {:?} repositioned to {:?}", entity, cpu.position));
    }
}

/// Training Plugin
///
/// SimSet::Training (не гейтится паузой): gate + reposition.
/// SimSet::Input: dummy silence.
pub struct TrainingPlugin;

impl Plugin for TrainingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrainingControl>()
            .add_event::<RepositionCpu>()
            .add_systems(
                FixedUpdate,
                (
                    (gate_simulation_tick, handle_reposition_requests)
                        .chain()
                        .in_set(SimSet::Training),
                    silence_cpu_dummies.in_set(SimSet::Input),
                ),
            );
    }
}
