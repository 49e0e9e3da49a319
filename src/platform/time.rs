//! Fixed-step frame clock
//!
//! Converts variable frame deltas into a whole number of simulation ticks.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};

#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Seconds per tick
    step: f32,
    accumulator: f32,
}

impl FrameClock {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            step: 1.0 / tick_rate.max(1) as f32,
            accumulator: 0.0,
        }
    }

    /// Feed elapsed wall time and return how many ticks to run
    ///
    /// Long stalls are clamped so the game never tries to catch up more than
    /// `MAX_SUBSTEPS` ticks in one frame.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(self.step);
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = FrameClock::new(60);
        assert_eq!(clock.advance(0.01), 0);
        assert_eq!(clock.advance(0.01), 1);
        assert_eq!(clock.advance(1.0 / 30.0), 2);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = FrameClock::new(60);
        // 0.1s at 60Hz is about 6 ticks
        let ticks = clock.advance(5.0);
        assert!((5..=6).contains(&ticks));

        let mut fast = FrameClock::new(240);
        assert_eq!(fast.advance(0.1), MAX_SUBSTEPS);
        assert!(fast.advance(0.0) <= 1);
    }

    #[test]
    fn test_negative_elapsed_ignored() {
        let mut clock = FrameClock::new(60);
        assert_eq!(clock.advance(-1.0), 0);
    }
}
