//! Frame-rate independent stepping.
//!
//! The host calls [`Stepper::advance`] once per frame callback with a
//! monotonic timestamp. Each processed frame consumes a whole number of
//! target ticks and hands that count back as the multiplier; the sub-tick
//! remainder stays on the clock for the next callback, so simulated time
//! never runs ahead of or behind the wall clock.

use crate::config::GameConfig;

#[derive(Debug, Clone)]
pub struct Stepper {
    tick_ms: f64,
    max_multiplier: f64,
    // Timestamp up to which time has been consumed.
    last_ms: Option<f64>,
}

impl Stepper {
    pub fn new(tick_ms: f64, max_multiplier: f64) -> Self {
        Self {
            tick_ms: tick_ms.max(1e-3),
            max_multiplier: max_multiplier.max(1.0).floor(),
            last_ms: None,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.tick_ms, config.max_multiplier)
    }

    /// Feed a frame timestamp (milliseconds). Returns the multiplier when
    /// the frame should be processed, `None` when it should be skipped.
    ///
    /// The first timestamp only primes the reference point.
    pub fn advance(&mut self, now_ms: f64) -> Option<f64> {
        let Some(last) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return None;
        };

        let elapsed = now_ms - last;
        if !(elapsed >= self.tick_ms) {
            return None;
        }

        let ticks = (elapsed / self.tick_ms).floor();
        if ticks > self.max_multiplier {
            // Stalled: drop the backlog instead of replaying it later.
            self.last_ms = Some(now_ms);
            return Some(self.max_multiplier);
        }
        self.last_ms = Some(last + ticks * self.tick_ms);
        Some(ticks)
    }
}
