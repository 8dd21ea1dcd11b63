use hecs::{Entity, World};

use crate::actors::Player;
use crate::components::{Aabb, InteractKind, Interactable};
use crate::events::GameEvent;

/// Keep each player's interactable list in sync with the areas it stands in,
/// and turn this step's `Interacted` events into the request the target
/// stands for.
pub fn interaction_system(world: &mut World) {
    let areas: Vec<(Entity, Aabb, InteractKind)> = world
        .query::<&Interactable>()
        .iter()
        .map(|(entity, interactable)| (entity, interactable.area, interactable.kind.clone()))
        .collect();

    for (_, player) in world.query_mut::<&mut Player>() {
        let body = player.body().aabb();
        for (entity, area, _) in &areas {
            if body.overlaps(area) {
                if player.register_interactable(*entity, area.center) {
                    tracing::debug!(interactable = ?entity, "in range");
                }
            } else if player.unregister_interactable(*entity) {
                tracing::debug!(interactable = ?entity, "out of range");
            }
        }

        let targets: Vec<Entity> = player
            .outbox()
            .iter()
            .filter_map(|event| match event {
                GameEvent::Interacted { target } => Some(*target),
                _ => None,
            })
            .collect();
        for target in targets {
            let Some((_, _, kind)) = areas.iter().find(|(entity, ..)| *entity == target) else {
                tracing::warn!(?target, "interacted with an entity that is not interactable");
                continue;
            };
            let request = match kind {
                InteractKind::SaveStone => GameEvent::SaveRequested,
                InteractKind::Teleporter { scene, entry_point } => GameEvent::SceneChangeRequested {
                    scene: scene.clone(),
                    entry_point: entry_point.clone(),
                },
            };
            player.outbox_mut().push(request);
        }
    }
}
