use std::sync::Arc;

use glam::Vec2;
use hecs::{Entity, World};

use crate::actors::{Boar, Player};
use crate::components::{Aabb, InteractKind, Interactable};
use crate::config::GameConfig;
use crate::scene::Level;

/// Solid boxes as `(min, max)` corners. The floor's top surface is y = 0.
const SOLIDS: &[([f32; 2], [f32; 2])] = &[
    // Floor and boundary walls
    ([-400.0, -40.0], [1200.0, 0.0]),
    ([-440.0, -40.0], [-400.0, 400.0]),
    ([1200.0, -40.0], [1240.0, 400.0]),
    // Floating platform
    ([200.0, 80.0], [320.0, 96.0]),
    // Tall column: wall-slide practice, and a long drop back down
    ([700.0, 0.0], [760.0, 200.0]),
];

const PLAYER_SPAWN: Vec2 = Vec2::new(0.0, 16.0);
const BOAR_SPAWNS: &[Vec2] = &[Vec2::new(420.0, 12.0), Vec2::new(950.0, 12.0)];

/// Build the demo level and populate it.
/// Returns the shared level geometry and the player entity. Actors still need
/// [`activation_system`](crate::systems::activation_system) before stepping.
pub fn load_test_scene(world: &mut World, config: &GameConfig) -> (Arc<Level>, Entity) {
    let level = Arc::new(Level::new(
        SOLIDS
            .iter()
            .map(|&(min, max)| Aabb::from_corners(Vec2::from(min), Vec2::from(max)))
            .collect(),
    ));

    let player = world.spawn((Player::new(
        &config.player,
        &config.physics,
        Arc::clone(&level),
        PLAYER_SPAWN,
    ),));

    for &spawn in BOAR_SPAWNS {
        world.spawn((Boar::new(&config.boar, &config.physics, Arc::clone(&level), spawn),));
    }

    world.spawn((Interactable::new(
        Vec2::new(-200.0, 24.0),
        Vec2::new(12.0, 24.0),
        InteractKind::SaveStone,
    ),));
    world.spawn((Interactable::new(
        Vec2::new(1150.0, 32.0),
        Vec2::new(16.0, 32.0),
        InteractKind::Teleporter {
            scene: "forest".to_owned(),
            entry_point: "left".to_owned(),
        },
    ),));

    tracing::info!(
        solids = level.solids().len(),
        boars = BOAR_SPAWNS.len(),
        "test scene loaded"
    );
    (level, player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::PlayerState;
    use crate::systems::activation_system;

    #[test]
    fn scene_spawns_grounded_actors() {
        let mut world = World::new();
        let (level, player) = load_test_scene(&mut world, &GameConfig::default());
        activation_system(&mut world).unwrap();

        assert_eq!(level.solids().len(), SOLIDS.len());
        let player = world.get::<&Player>(player).unwrap();
        assert_eq!(player.state(), Some(PlayerState::Idle));
        assert!(player.body().on_floor);

        assert_eq!(world.query::<&Boar>().iter().count(), BOAR_SPAWNS.len());
        assert!(world.query::<&Boar>().iter().all(|(_, boar)| boar.body().on_floor));
        assert_eq!(world.query::<&Interactable>().iter().count(), 2);
    }
}
