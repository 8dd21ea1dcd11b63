//! Fixed-step state-machine driver for 2D platformer actors, with a player
//! and a boar enemy built on top of it.

pub mod actors;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod fsm;
pub mod scene;
pub mod systems;

pub use error::{Error, Result};
