use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hecs::{Entity, World};

use ledge::actors::{Boar, Player};
use ledge::config::GameConfig;
use ledge::engine::input::{Action, InputState};
use ledge::engine::time::FixedStep;
use ledge::events::{EventLog, GameEvent};
use ledge::scene::test_scene::load_test_scene;
use ledge::systems::{activation_system, simulation_step};

/// Scripted input: `(step, action, pressed)`. Steps are at the physics rate.
const SCRIPT: &[(u32, Action, bool)] = &[
    (0, Action::Right, true),
    (40, Action::Jump, true),
    (46, Action::Jump, false),
    (90, Action::Right, false),
    (92, Action::Attack, true),
    (93, Action::Attack, false),
    (100, Action::Attack, true),
    (101, Action::Attack, false),
    (140, Action::Left, true),
    (170, Action::Slide, true),
    (171, Action::Slide, false),
    (330, Action::Left, false),
    (335, Action::Interact, true),
    (336, Action::Interact, false),
];

#[derive(Parser)]
#[command(name = "ledge", about = "Headless platformer simulation")]
struct Args {
    /// TOML file overriding the built-in tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of simulation steps to run
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Render frame rate feeding the fixed-step accumulator
    #[arg(long, default_value_t = 144.0)]
    fps: f32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let mut world = World::new();
    let (_level, player) = load_test_scene(&mut world, &config);
    activation_system(&mut world).context("activating actors")?;

    let mut clock = FixedStep::new(config.physics.dt());
    let mut input = InputState::new();
    let mut log = EventLog::new();
    let frame_dt = 1.0 / args.fps.max(1.0);
    let mut tick = 0;

    while tick < args.ticks {
        for _ in 0..clock.advance(frame_dt) {
            if tick >= args.ticks {
                break;
            }
            apply_script(&mut input, tick);
            simulation_step(&mut world, &input, &mut log, clock.step())
                .with_context(|| format!("simulation step {tick}"))?;
            input.end_step();
            tick += 1;
        }

        for record in log.take() {
            report(tick, record.entity, &record.event);
        }
    }

    let player = world
        .get::<&Player>(player)
        .context("player entity missing after simulation")?;
    tracing::info!(
        ticks = tick,
        state = ?player.state(),
        health = player.stats().health(),
        energy = player.stats().energy(),
        position = ?player.body().position,
        boars = world.query::<&Boar>().iter().count(),
        "simulation finished"
    );
    Ok(())
}

fn apply_script(input: &mut InputState, tick: u32) {
    for &(_, action, pressed) in SCRIPT.iter().filter(|(at, ..)| *at == tick) {
        if pressed {
            input.press(action);
        } else {
            input.release(action);
        }
    }
}

fn report(tick: u32, entity: Entity, event: &GameEvent) {
    match event {
        GameEvent::HealthChanged { health, max_health } => {
            tracing::info!(tick, ?entity, health, max_health, "health changed")
        }
        GameEvent::Died => tracing::info!(tick, ?entity, "died"),
        GameEvent::SaveRequested => tracing::info!(tick, ?entity, "save requested"),
        GameEvent::SceneChangeRequested { scene, entry_point } => {
            tracing::info!(tick, ?entity, %scene, %entry_point, "scene change requested")
        }
        other => tracing::debug!(tick, ?entity, event = ?other, "event"),
    }
}
