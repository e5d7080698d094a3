//! LEDGEFIGHT Simulation Core
//!
//! Детерминированное ядро 2D platform fighter на Bevy 0.16 (headless ECS):
//! locomotion + jump/carry + frame-exact атаки + knockback/hitstun.
//!
//! Презентация (анимации, tint, HUD, камера) живёт снаружи и получает
//! только события: FighterCueEvent, HitLanded, FighterHit, AttackRejected.
//!
//! Один fixed тик (60Hz, `SimClock`) = один прогон `FixedUpdate`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod actor;
pub mod combat;
pub mod config;
pub mod fighter;
pub mod input;
pub mod logger;
pub mod movement;
pub mod physics;
pub mod shared;
pub mod training;

// Re-export базовых типов для удобства
pub use actor::{display_percent, ActorState};
pub use combat::{
    AttackDefinition, AttackExecutor, AttackPhase, AttackRejected, CombatPlugin, FighterHit, HitLanded, HitWindow,
    MoveSlot, Moveset,
};
pub use config::{ConfigError, FighterRoster, LoadedCharacter};
pub use fighter::{fighter_bundle, spawn_fighter, Fighter, FighterLoadout, Player};
pub use input::FighterInput;
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use movement::{Facing, FighterBody, FighterCue, FighterCueEvent, MoveState, MovementPlugin, VelocityGovernor};
pub use physics::StageGeometry;
pub use shared::SimClock;
pub use training::{CpuLevel, RepositionCpu, TrainingControl, TrainingPlugin};

/// Порядок систем внутри одного тика (FixedUpdate), строго цепочкой.
///
/// Всё кроме `Training` пропускается целиком, пока симуляция на паузе.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Pause gate + training tools
    Training,
    Clock,
    /// CPU input overrides
    Input,
    Hitstun,
    Movement,
    AttackStart,
    AttackAdvance,
    HitResolve,
    Integrate,
    /// Hurtboxes for the next tick
    Snapshot,
    Cleanup,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimClock>();
        // FixedUpdate под host'ом (app.update) идёт с той же частотой, что и SimClock
        let hz = app.world().resource::<SimClock>().hz;

        app.insert_resource(Time::<Fixed>::from_hz(hz as f64))
            .init_resource::<StageGeometry>()
            .configure_sets(
                FixedUpdate,
                (
                    SimSet::Training,
                    SimSet::Clock,
                    SimSet::Input,
                    SimSet::Hitstun,
                    SimSet::Movement,
                    SimSet::AttackStart,
                    SimSet::AttackAdvance,
                    SimSet::HitResolve,
                    SimSet::Integrate,
                    SimSet::Snapshot,
                    SimSet::Cleanup,
                )
                    .chain(),
            )
            .configure_sets(
                FixedUpdate,
                (
                    SimSet::Clock,
                    SimSet::Input,
                    SimSet::Hitstun,
                    SimSet::Movement,
                    SimSet::AttackStart,
                    SimSet::AttackAdvance,
                    SimSet::HitResolve,
                    SimSet::Integrate,
                    SimSet::Snapshot,
                    SimSet::Cleanup,
                )
                    .distributive_run_if(training::simulation_should_tick),
            )
            .add_systems(
                FixedUpdate,
                (
                    shared::advance_clock.in_set(SimSet::Clock),
                    actor::tick_hitstun.in_set(SimSet::Hitstun),
                    input::clear_input_edges.in_set(SimSet::Cleanup),
                ),
            )
            // Подсистемы
            .add_plugins((TrainingPlugin, MovementPlugin, CombatPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(shared::DEFAULT_TICK_HZ as f64)); // 60Hz FixedUpdate

    app
}

/// Headless App с полной симуляцией и заданной сценой
pub fn create_simulation_app(seed: u64, stage: StageGeometry) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(stage).add_plugins(SimulationPlugin);
    app.finish();
    app.cleanup();

    app
}

/// Прогоняет ровно один тик симуляции (минуя wall-clock `Time<Fixed>`).
///
/// `First` здесь не запускается, поэтому event буферы свапаются вручную в
/// конце тика: событие тика N читаемо после тика N и до конца тика N+1.
pub fn step_tick(app: &mut App) {
    let world = app.world_mut();
    world.run_schedule(FixedUpdate);
    update_sim_events(world);
}

/// Double-buffer swap для всех событий симуляции.
fn update_sim_events(world: &mut World) {
    update_events::<FighterCueEvent>(world);
    update_events::<HitLanded>(world);
    update_events::<FighterHit>(world);
    update_events::<AttackRejected>(world);
    update_events::<RepositionCpu>(world);
}

fn update_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

pub fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        step_tick(app);
    }
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_timestep_matches_sim_clock() {
        let app = create_simulation_app(1, StageGeometry::flat(10.0));
        let timestep = app.world().resource::<Time<Fixed>>().timestep().as_secs_f32();
        let dt = app.world().resource::<SimClock>().dt();
        assert!((timestep - dt).abs() < 1e-6, "Time<Fixed> {} vs SimClock {}", timestep, dt);
    }

    #[test]
    fn test_step_tick_drops_stale_events() {
        let mut app = create_simulation_app(1, StageGeometry::flat(20.0));
        let fighter = spawn_fighter(
            app.world_mut(),
            "Runner",
            FighterLoadout::default(),
            Vec2::new(0.0, 0.5),
            Facing::Right,
        );

        let mut cues = app.world().resource::<Events<FighterCueEvent>>().get_cursor();
        let mut dashes = 0;

        // run toggle туда-обратно: DashStart cue каждые 4 тика, направление
        // меняется каждые 8, чтобы не уехать со сцены
        for tick in 0..600 {
            if let Some(mut input) = app.world_mut().get_mut::<FighterInput>(fighter) {
                input.move_x = if (tick / 8) % 2 == 0 { 1.0 } else { -1.0 };
                input.run_toggle_pressed = tick % 2 == 0;
            }
            step_tick(&mut app);

            let events = app.world().resource::<Events<FighterCueEvent>>();
            dashes += cues.read(events).filter(|event| event.cue == FighterCue::DashStart).count();
        }

        assert!(dashes >= 100, "only {} dash cues", dashes);
        // в буферах максимум два последних тика
        assert!(app.world().resource::<Events<FighterCueEvent>>().len() <= 4);
    }
}
