pub mod collision;
pub mod raycast;

mod actor;
mod cleanup;
mod combat;
mod interaction;

use hecs::World;

pub use actor::{activation_system, actor_state_system, input_system, sensing_system, timer_system};
pub use cleanup::cleanup_system;
pub use combat::combat_system;
pub use interaction::interaction_system;

use crate::engine::input::InputState;
use crate::error::FsmError;
use crate::events::EventLog;

/// Run one fixed simulation step over every system, in order.
pub fn simulation_step(
    world: &mut World,
    input: &InputState,
    log: &mut EventLog,
    dt: f32,
) -> Result<(), FsmError> {
    sensing_system(world);
    input_system(world, input);
    timer_system(world, dt);
    actor_state_system(world, dt)?;
    combat_system(world);
    interaction_system(world);
    cleanup_system(world, log);
    Ok(())
}
