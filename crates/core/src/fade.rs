//! Fade-in of the translucent overlay drawn over every frame.
//!
//! The overlay starts almost transparent (long trails) and becomes more opaque
//! in fixed steps until it reaches its limit.

use crate::types::{ALPHA_LIMIT, FADE_ADJUSTMENT, FADE_RATE_TICKS, STARTING_ALPHA};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeIn {
    alpha: u8,
    limit: u8,
    step: u8,
    every: u32,
    ticks: u32,
}

impl Default for FadeIn {
    fn default() -> Self {
        Self::new(STARTING_ALPHA, ALPHA_LIMIT, FADE_ADJUSTMENT, FADE_RATE_TICKS)
    }
}

impl FadeIn {
    pub fn new(start: u8, limit: u8, step: u8, every: u32) -> Self {
        Self {
            alpha: start.min(limit),
            limit,
            step,
            every: every.max(1),
            ticks: 0,
        }
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn is_done(&self) -> bool {
        self.alpha >= self.limit
    }

    /// Count one tick; raise alpha by `step` every `every` ticks, capped at `limit`.
    pub fn tick(&mut self) {
        if self.is_done() {
            return;
        }
        self.ticks += 1;
        if self.ticks % self.every == 0 {
            self.alpha = self.alpha.saturating_add(self.step).min(self.limit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_on_schedule() {
        let mut f = FadeIn::new(10, 100, 5, 3);
        f.tick();
        f.tick();
        assert_eq!(f.alpha(), 10);
        f.tick();
        assert_eq!(f.alpha(), 15);
    }

    #[test]
    fn never_exceeds_limit() {
        let mut f = FadeIn::new(90, 100, 7, 1);
        for _ in 0..10 {
            f.tick();
        }
        assert_eq!(f.alpha(), 100);
        assert!(f.is_done());
    }

    #[test]
    fn start_above_limit_is_clamped() {
        let f = FadeIn::new(200, 100, 1, 1);
        assert_eq!(f.alpha(), 100);
    }
}
