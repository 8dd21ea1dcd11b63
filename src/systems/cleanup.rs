use hecs::World;

use crate::actors::{Boar, Player};
use crate::events::EventLog;

/// Drain every actor's outbox into `log` and despawn boars whose death clip
/// has played out.
pub fn cleanup_system(world: &mut World, log: &mut EventLog) {
    for (entity, player) in world.query_mut::<&mut Player>() {
        for event in player.outbox_mut().drain() {
            log.record(entity, event);
        }
    }

    let mut finished = Vec::new();
    for (entity, boar) in world.query_mut::<&mut Boar>() {
        for event in boar.outbox_mut().drain() {
            log.record(entity, event);
        }
        if boar.is_finished() {
            finished.push(entity);
        }
    }

    for entity in finished {
        if world.despawn(entity).is_ok() {
            tracing::info!(?entity, "boar despawned");
        }
    }
}
