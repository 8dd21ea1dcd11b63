use hecs::{Component, World};

use crate::actors::{Boar, Player};
use crate::engine::input::InputState;
use crate::error::FsmError;
use crate::fsm::{self, Actor};

/// Assign the initial state to every actor that has not been activated yet.
/// Run once the scene is fully built, and again after spawning mid-game.
pub fn activation_system(world: &mut World) -> Result<(), FsmError> {
    activate_all::<Player>(world)?;
    activate_all::<Boar>(world)?;
    Ok(())
}

/// Hand every boar the living player's box as its target.
pub fn sensing_system(world: &mut World) {
    let target = world
        .query::<&Player>()
        .iter()
        .find(|(_, player)| !player.is_dying())
        .map(|(_, player)| player.body().aabb());

    for (_, boar) in world.query_mut::<&mut Boar>() {
        boar.set_target(target);
    }
}

pub fn input_system(world: &mut World, input: &InputState) {
    for (_, player) in world.query_mut::<&mut Player>() {
        player.handle_input(input);
    }
}

/// Advance countdowns, animations and energy regeneration. Runs before the
/// state machines so they read this step's timer values.
pub fn timer_system(world: &mut World, dt: f32) {
    for (_, player) in world.query_mut::<&mut Player>() {
        player.advance_timers(dt);
    }
    for (_, boar) in world.query_mut::<&mut Boar>() {
        boar.advance_timers(dt);
    }
}

/// One driver step for every active actor.
pub fn actor_state_system(world: &mut World, dt: f32) -> Result<(), FsmError> {
    step_all::<Player>(world, dt)?;
    step_all::<Boar>(world, dt)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn activate_all<A: Actor + Component>(world: &mut World) -> Result<(), FsmError> {
    for (_, actor) in world.query_mut::<&mut A>() {
        if !actor.machine().is_active() {
            fsm::activate(actor)?;
        }
    }
    Ok(())
}

fn step_all<A: Actor + Component>(world: &mut World, dt: f32) -> Result<(), FsmError> {
    for (_, actor) in world.query_mut::<&mut A>() {
        fsm::step(actor, dt)?;
    }
    Ok(())
}
