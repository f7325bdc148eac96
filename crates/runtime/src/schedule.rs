//! Fixed-timestep accumulator.
use tracing::debug;

/// Turns variable frame deltas into a whole number of fixed steps.
#[derive(Clone, Debug)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedTimestep {
    /// Frames slower than this many steps drop the excess time.
    pub const DEFAULT_MAX_STEPS: u32 = 8;

    pub fn new(step: f32) -> Self {
        Self {
            step: if step.is_finite() && step > 0.0 { step } else { 1.0 / 60.0 },
            accumulator: 0.0,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Adds `frame_dt` and returns how many steps to simulate now.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }

        if self.accumulator >= self.step {
            debug!(
                target: "skill::schedule",
                dropped = self.accumulator,
                "Frame too slow, dropping accumulated time"
            );
            self.accumulator %= self.step;
        }
        steps
    }

    /// Fraction of a step left in the accumulator, for interpolation.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_partial_frames() {
        let mut clock = FixedTimestep::new(0.25);

        assert_eq!(clock.advance(0.125), 0);
        assert_eq!(clock.advance(0.125), 1);
        assert_eq!(clock.advance(0.5), 2);
        assert_eq!(clock.alpha(), 0.0);
    }

    #[test]
    fn slow_frames_are_capped() {
        let mut clock = FixedTimestep::new(0.25).with_max_steps(2);

        assert_eq!(clock.advance(2.0), 2);
        assert!(clock.alpha() < 1.0);
        assert_eq!(clock.advance(f32::NAN), 0);
    }
}
