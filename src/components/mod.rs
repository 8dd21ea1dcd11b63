mod character;
mod interact;
mod physics;

pub use character::{Damage, Stats};
pub use interact::{InteractKind, Interactable};
pub use physics::{Aabb, Body, Facing};
