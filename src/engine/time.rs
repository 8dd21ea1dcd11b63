/// Fixed-timestep accumulator.
///
/// Render frames arrive at whatever rate the host manages; the simulation
/// only ever advances in whole `step` increments. Leftover time carries over
/// to the next frame.
pub struct FixedStep {
    step: f32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame's worth of time and return how many simulation steps are
    /// now due. May be zero when frames are shorter than a step.
    pub fn advance(&mut self, frame_dt: f32) -> usize {
        self.accumulator += frame_dt;
        let mut due = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            due += 1;
        }
        due
    }

    /// How far into the next step the current frame falls (0..1).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}

/// A one-shot countdown used as a timed condition: input buffers, grace
/// periods, invulnerability and combo windows.
///
/// Counts down only when the owner calls [`advance`](Self::advance); starting
/// and stopping are always explicit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    wait_time: f32,
    remaining: f32,
}

impl Countdown {
    pub fn new(wait_time: f32) -> Self {
        Self {
            wait_time: wait_time.max(0.0),
            remaining: 0.0,
        }
    }

    /// (Re)arm the full window.
    pub fn start(&mut self) {
        self.remaining = self.wait_time;
    }

    pub fn stop(&mut self) {
        self.remaining = 0.0;
    }

    pub fn advance(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn time_remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_stopped(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn wait_time(&self) -> f32 {
        self.wait_time
    }

    /// Fraction of the window already used: 0.0 right after `start`, 1.0 once
    /// it has run out (or was never started).
    pub fn progress(&self) -> f32 {
        if self.wait_time <= 0.0 {
            return 1.0;
        }
        1.0 - self.remaining / self.wait_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_runs_out_and_saturates() {
        let mut timer = Countdown::new(0.3);
        assert!(timer.is_stopped());

        timer.start();
        timer.advance(0.1);
        assert!((timer.time_remaining() - 0.2).abs() < 1e-6);
        assert!(!timer.is_stopped());

        timer.advance(1.0);
        assert_eq!(timer.time_remaining(), 0.0);
        assert!(timer.is_stopped());
    }

    #[test]
    fn countdown_stop_is_immediate() {
        let mut timer = Countdown::new(2.0);
        timer.start();
        timer.stop();
        assert!(timer.is_stopped());
        assert_eq!(timer.progress(), 1.0);
    }

    #[test]
    fn countdown_progress_tracks_window() {
        let mut timer = Countdown::new(2.0);
        timer.start();
        assert_eq!(timer.progress(), 0.0);
        timer.advance(0.5);
        assert!((timer.progress() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn fixed_step_carries_remainder() {
        let mut clock = FixedStep::new(0.25);
        assert_eq!(clock.advance(0.1), 0);
        assert_eq!(clock.advance(0.2), 1);
        assert!((clock.alpha() - 0.2).abs() < 1e-5);
        assert_eq!(clock.advance(0.5), 2);
    }
}
