use std::collections::HashSet;

/// Abstract game actions. Engine-level key polling maps onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Jump,
    Attack,
    Slide,
    Interact,
}

/// Held actions plus the press/release edges of the current simulation step.
pub struct InputState {
    held: HashSet<Action>,
    pressed: HashSet<Action>,
    released: HashSet<Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            pressed: HashSet::new(),
            released: HashSet::new(),
        }
    }

    pub fn press(&mut self, action: Action) {
        if self.held.insert(action) {
            self.pressed.insert(action);
        }
    }

    pub fn release(&mut self, action: Action) {
        if self.held.remove(&action) {
            self.released.insert(action);
        }
    }

    /// Clear this step's edges. Call once per simulation step, **after** the
    /// step ran, so a frame with no steps keeps its edges for the next one.
    pub fn end_step(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    pub fn just_released(&self, action: Action) -> bool {
        self.released.contains(&action)
    }

    /// Horizontal axis in [-1, 1].
    pub fn axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.is_held(Action::Left) {
            axis -= 1.0;
        }
        if self.is_held(Action::Right) {
            axis += 1.0;
        }
        axis
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_last_one_step() {
        let mut input = InputState::new();
        input.press(Action::Jump);
        assert!(input.just_pressed(Action::Jump));
        assert!(input.is_held(Action::Jump));

        input.end_step();
        assert!(!input.just_pressed(Action::Jump));
        assert!(input.is_held(Action::Jump));

        input.release(Action::Jump);
        assert!(input.just_released(Action::Jump));
        assert!(!input.is_held(Action::Jump));
    }

    #[test]
    fn repeated_press_is_not_a_new_edge() {
        let mut input = InputState::new();
        input.press(Action::Attack);
        input.end_step();
        input.press(Action::Attack);
        assert!(!input.just_pressed(Action::Attack));
    }

    #[test]
    fn opposing_directions_cancel() {
        let mut input = InputState::new();
        input.press(Action::Left);
        assert_eq!(input.axis(), -1.0);
        input.press(Action::Right);
        assert_eq!(input.axis(), 0.0);
    }
}
