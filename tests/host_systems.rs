use std::sync::Arc;

use glam::Vec2;
use hecs::{Entity, World};

use ledge::actors::{Boar, Player, PlayerState};
use ledge::components::{Aabb, Facing, InteractKind, Interactable};
use ledge::config::GameConfig;
use ledge::engine::input::{Action, InputState};
use ledge::error::FsmError;
use ledge::events::{EventLog, GameEvent};
use ledge::scene::Level;
use ledge::systems::{activation_system, simulation_step};

const DT: f32 = 1.0 / 60.0;

struct Host {
    world: World,
    config: GameConfig,
    level: Arc<Level>,
    log: EventLog,
    player: Entity,
}

impl Host {
    fn new(config: GameConfig) -> Self {
        let level = Arc::new(Level::new(vec![Aabb::from_corners(
            Vec2::new(-500.0, -40.0),
            Vec2::new(500.0, 0.0),
        )]));
        let mut world = World::new();
        let player = world.spawn((Player::new(
            &config.player,
            &config.physics,
            Arc::clone(&level),
            Vec2::new(0.0, 16.0),
        ),));
        Self {
            world,
            config,
            level,
            log: EventLog::new(),
            player,
        }
    }

    fn spawn_boar(&mut self, x: f32) -> Entity {
        let mut boar = Boar::new(
            &self.config.boar,
            &self.config.physics,
            Arc::clone(&self.level),
            Vec2::new(x, 12.0),
        );
        boar.body_mut().facing = Facing::Left;
        self.world.spawn((boar,))
    }

    fn step(&mut self, input: &InputState) {
        simulation_step(&mut self.world, input, &mut self.log, DT).unwrap();
    }

    fn idle(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step(&InputState::new());
        }
    }

    fn tap(&mut self, action: Action) {
        let mut input = InputState::new();
        input.press(action);
        self.step(&input);
    }

    fn logged(&self, entity: Entity, event: &GameEvent) -> bool {
        self.log
            .records()
            .iter()
            .any(|r| r.entity == entity && r.event == *event)
    }
}

#[test]
fn stepping_before_activation_fails() {
    let mut host = Host::new(GameConfig::default());
    let err = simulation_step(&mut host.world, &InputState::new(), &mut host.log, DT).unwrap_err();
    assert!(matches!(err, FsmError::Inactive { .. }));
}

#[test]
fn a_swing_lands_once() {
    let mut host = Host::new(GameConfig::default());
    let boar = host.spawn_boar(40.0);
    activation_system(&mut host.world).unwrap();

    host.tap(Action::Attack);
    host.idle(14);

    let boar = host.world.get::<&Boar>(boar).unwrap();
    assert_eq!(boar.stats().health(), 2);
}

#[test]
fn boar_contact_hurts_once_per_invincibility_window() {
    let mut host = Host::new(GameConfig::default());
    host.spawn_boar(20.0);
    activation_system(&mut host.world).unwrap();

    host.idle(2);
    {
        let player = host.world.get::<&Player>(host.player).unwrap();
        assert_eq!(player.state(), Some(PlayerState::Hurt));
    }
    host.idle(20);

    let player = host.world.get::<&Player>(host.player).unwrap();
    assert_eq!(player.stats().health(), 4);
    assert!(host.logged(
        host.player,
        &GameEvent::HealthChanged {
            health: 4,
            max_health: 5
        }
    ));
}

#[test]
fn interacting_with_a_save_stone_requests_a_save() {
    let mut host = Host::new(GameConfig::default());
    let stone = host.world.spawn((Interactable::new(
        Vec2::new(0.0, 24.0),
        Vec2::new(12.0, 24.0),
        InteractKind::SaveStone,
    ),));
    activation_system(&mut host.world).unwrap();

    host.idle(1);
    host.tap(Action::Interact);

    assert!(host.logged(host.player, &GameEvent::Interacted { target: stone }));
    assert!(host.logged(host.player, &GameEvent::SaveRequested));
}

#[test]
fn nearest_teleporter_requests_a_scene_change() {
    let mut host = Host::new(GameConfig::default());
    host.world.spawn((Interactable::new(
        Vec2::new(-14.0, 24.0),
        Vec2::new(16.0, 24.0),
        InteractKind::SaveStone,
    ),));
    let gate = host.world.spawn((Interactable::new(
        Vec2::new(4.0, 24.0),
        Vec2::new(16.0, 24.0),
        InteractKind::Teleporter {
            scene: "forest".to_owned(),
            entry_point: "left".to_owned(),
        },
    ),));
    activation_system(&mut host.world).unwrap();

    host.idle(1);
    host.tap(Action::Interact);

    assert!(host.logged(host.player, &GameEvent::Interacted { target: gate }));
    assert!(host.logged(
        host.player,
        &GameEvent::SceneChangeRequested {
            scene: "forest".to_owned(),
            entry_point: "left".to_owned(),
        }
    ));
    assert!(!host.logged(host.player, &GameEvent::SaveRequested));
}

#[test]
fn dead_boars_are_despawned() {
    let mut config = GameConfig::default();
    config.boar.max_health = 1;
    let mut host = Host::new(config);
    let boar = host.spawn_boar(40.0);
    activation_system(&mut host.world).unwrap();

    host.tap(Action::Attack);
    host.idle(60);

    assert!(!host.world.contains(boar));
    assert!(host.logged(boar, &GameEvent::Died));
}
