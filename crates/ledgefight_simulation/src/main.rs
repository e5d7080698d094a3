//! Headless симуляция LEDGEFIGHT
//!
//! Soak run: игрок (случайный seeded input) против CPU dummy на плоской сцене.
//! Использование: `ledgefight_simulation [seed] [roster.toml]`

use bevy::prelude::*;
use rand::Rng;

use ledgefight_simulation::{
    create_simulation_app, log_error, run_ticks, spawn_fighter, ActorState, CpuLevel, DeterministicRng, Facing,
    FighterBody, FighterHit, FighterInput, FighterLoadout, FighterRoster, Player, SimClock, StageGeometry,
};

const DEFAULT_ROSTER: &str = include_str!("../roster.toml");
const TICKS: usize = 3600;

/// Случайный, но воспроизводимый input игрока на один тик.
fn drive_player(app: &mut App, player: Entity) {
    let world = app.world_mut();
    let next = {
        let mut seeded = world.resource_mut::<DeterministicRng>();
        let rng = &mut seeded.rng;
        FighterInput {
            move_x: rng.gen_range(-1.0..=1.0),
            move_y: rng.gen_range(-1.0..=1.0),
            jump_pressed: rng.gen_bool(0.05),
            jump_held: rng.gen_bool(0.5),
            attack_pressed: rng.gen_bool(0.08),
            special_pressed: rng.gen_bool(0.02),
            smash_pressed: rng.gen_bool(0.02),
            grab_pressed: rng.gen_bool(0.01),
            run_toggle_pressed: rng.gen_bool(0.01),
            ..Default::default()
        }
    };

    if let Some(mut input) = world.get_mut::<FighterInput>(player) {
        *input = next;
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(42);

    let roster = match args.next() {
        Some(path) => FighterRoster::load_file(path),
        None => FighterRoster::from_toml_str(DEFAULT_ROSTER),
    };
    let roster = match roster {
        Ok(roster) => roster,
        Err(err) => {
            log_error(&format!("❌ {}", err));
            std::process::exit(1);
        }
    };

    let (brawler, dummy) = match (roster.resolve("brawler"), roster.resolve("dummy")) {
        (Ok(brawler), Ok(dummy)) => (brawler, dummy),
        (Err(err), _) | (_, Err(err)) => {
            log_error(&format!("❌ {}", err));
            std::process::exit(1);
        }
    };

    println!("Starting LEDGEFIGHT headless simulation (seed: {})", seed);

    let mut app = create_simulation_app(seed, StageGeometry::flat(24.0));

    let player = spawn_fighter(
        app.world_mut(),
        "Player",
        FighterLoadout::from(&brawler),
        Vec2::new(-2.0, 0.5),
        Facing::Right,
    );
    app.world_mut().entity_mut(player).insert(Player);

    let cpu = spawn_fighter(
        app.world_mut(),
        "Dummy",
        FighterLoadout::from(&dummy),
        Vec2::new(2.0, 0.5),
        Facing::Left,
    );
    app.world_mut().entity_mut(cpu).insert(CpuLevel(0));

    let mut hit_cursor = app.world().resource::<Events<FighterHit>>().get_cursor();
    let mut hits = 0usize;

    for tick in 0..TICKS {
        drive_player(&mut app, player);
        run_ticks(&mut app, 1);

        let events = app.world().resource::<Events<FighterHit>>();
        hits += hit_cursor.read(events).count();

        if tick % 600 == 0 {
            let world = app.world();
            let clock = world.resource::<SimClock>();
            let (Some(body), Some(actor)) = (world.get::<FighterBody>(cpu), world.get::<ActorState>(cpu)) else {
                continue;
            };
            println!(
                "Tick {}: dummy at ({:.2}, {:.2}), {}, {} hits so far",
                clock.tick,
                body.position.x,
                body.position.y,
                ledgefight_simulation::display_percent(actor.percent(), true),
                hits
            );
        }
    }

    println!("Simulation complete! {} hits in {} ticks", hits, TICKS);
}
