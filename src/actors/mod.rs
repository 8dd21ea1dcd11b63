//! The two actors that run on the [`fsm`](crate::fsm) driver.

pub mod boar;
pub mod player;

pub use boar::{Boar, BoarSnapshot, BoarState};
pub use player::{Player, PlayerSnapshot, PlayerState, PlayerTimers};

const ZERO_EPSILON: f32 = 1e-4;

/// Step `from` toward `to` by at most `delta`, never overshooting.
pub(crate) fn move_toward(from: f32, to: f32, delta: f32) -> f32 {
    if (to - from).abs() <= delta {
        to
    } else {
        from + (to - from).signum() * delta
    }
}

pub(crate) fn is_zero_approx(value: f32) -> bool {
    value.abs() < ZERO_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_toward_clamps_at_target() {
        assert_eq!(move_toward(0.0, 10.0, 4.0), 4.0);
        assert_eq!(move_toward(8.0, 10.0, 4.0), 10.0);
        assert_eq!(move_toward(0.0, -10.0, 4.0), -4.0);
        assert_eq!(move_toward(3.0, 3.0, 0.0), 3.0);
    }
}
