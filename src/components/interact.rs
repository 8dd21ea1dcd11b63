use glam::Vec2;

use super::Aabb;

/// What happens when the player interacts with something.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractKind {
    /// Persist the session (save/load itself lives outside the simulation).
    SaveStone,
    /// Move to another scene, arriving at a named entry point.
    Teleporter { scene: String, entry_point: String },
}

/// A trigger area the player can interact with while standing inside it.
#[derive(Debug, Clone)]
pub struct Interactable {
    pub area: Aabb,
    pub kind: InteractKind,
}

impl Interactable {
    pub fn new(center: Vec2, half: Vec2, kind: InteractKind) -> Self {
        Self {
            area: Aabb::new(center, half),
            kind,
        }
    }
}
