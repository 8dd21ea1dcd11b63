use glam::Vec2;
use hecs::{Entity, World};

use crate::actors::{Boar, Player};
use crate::components::{Aabb, Damage};

struct Attacker {
    entity: Entity,
    body: Aabb,
    swing: Option<Aabb>,
    origin: Vec2,
    damage: i32,
}

struct Enemy {
    entity: Entity,
    body: Aabb,
    hitbox: Option<Aabb>,
    origin: Vec2,
    damage: i32,
}

/// Player swings against boar bodies (each swing lands once per boar) and
/// boar bodies against the player. Hits are posted as pending damage and take
/// effect on the receiver's next state-machine step.
pub fn combat_system(world: &mut World) {
    let players: Vec<Attacker> = world
        .query::<&Player>()
        .iter()
        .map(|(entity, player)| Attacker {
            entity,
            body: player.body().aabb(),
            swing: player.attack_box(),
            origin: player.body().position,
            damage: player.attack_damage(),
        })
        .collect();
    let boars: Vec<Enemy> = world
        .query::<&Boar>()
        .iter()
        .map(|(entity, boar)| Enemy {
            entity,
            body: boar.body().aabb(),
            hitbox: boar.hitbox(),
            origin: boar.body().position,
            damage: boar.contact_damage(),
        })
        .collect();

    for player in &players {
        if let Some(swing) = player.swing {
            for boar in boars.iter().filter(|boar| swing.overlaps(&boar.body)) {
                let first_hit = world
                    .get::<&mut Player>(player.entity)
                    .map(|mut p| p.record_hit(boar.entity))
                    .unwrap_or(false);
                if !first_hit {
                    continue;
                }
                if let Ok(mut target) = world.get::<&mut Boar>(boar.entity) {
                    let hit = Damage::new(Some(player.entity), player.origin, player.damage);
                    if target.receive_damage(hit) {
                        tracing::debug!(boar = ?boar.entity, "swing connects");
                    }
                }
            }
        }

        for boar in &boars {
            if !boar.hitbox.is_some_and(|hitbox| hitbox.overlaps(&player.body)) {
                continue;
            }
            if let Ok(mut target) = world.get::<&mut Player>(player.entity) {
                let hit = Damage::new(Some(boar.entity), boar.origin, boar.damage);
                if target.receive_damage(hit) {
                    tracing::debug!(boar = ?boar.entity, "player takes contact damage");
                }
            }
        }
    }
}
