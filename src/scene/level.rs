use glam::Vec2;

use crate::components::Aabb;
use crate::systems::raycast::raycast_boxes;

/// Static level geometry: a flat list of solid boxes.
#[derive(Debug, Clone, Default)]
pub struct Level {
    solids: Vec<Aabb>,
}

impl Level {
    pub fn new(solids: Vec<Aabb>) -> Self {
        Self { solids }
    }

    pub fn solids(&self) -> &[Aabb] {
        &self.solids
    }

    /// Nearest solid hit along `direction` within `max_distance`.
    pub fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<f32> {
        raycast_boxes(&self.solids, origin, direction, max_distance)
    }
}
