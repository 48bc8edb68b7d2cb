//! Frame pacing: at most `fps` ticks per second.
//!
//! Time is passed in explicitly (milliseconds since an arbitrary origin) so the
//! pacing decisions are testable without sleeping.

#[derive(Debug, Clone)]
pub struct FramePacer {
    frame_ms: u64,
    next_due_ms: u64,
    started: bool,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            frame_ms: 1000 / fps.max(1) as u64,
            next_due_ms: 0,
            started: false,
        }
    }

    pub fn frame_ms(&self) -> u64 {
        self.frame_ms
    }

    /// Decide whether a tick is due at `now_ms`.
    ///
    /// The first call always ticks. After that a tick is due once per frame
    /// interval; if the loop fell behind, the schedule restarts from `now_ms`
    /// instead of bursting to catch up.
    pub fn should_tick(&mut self, now_ms: u64) -> bool {
        if !self.started {
            self.started = true;
            self.next_due_ms = now_ms + self.frame_ms;
            return true;
        }
        if now_ms < self.next_due_ms {
            return false;
        }
        if now_ms - self.next_due_ms >= self.frame_ms {
            self.next_due_ms = now_ms + self.frame_ms;
        } else {
            self.next_due_ms += self.frame_ms;
        }
        true
    }

    /// How long input polling may block before the next tick is due.
    pub fn timeout_ms(&self, now_ms: u64) -> u64 {
        if !self.started {
            return 0;
        }
        self.next_due_ms.saturating_sub(now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_ticks() {
        let mut p = FramePacer::new(10);
        assert_eq!(p.timeout_ms(0), 0);
        assert!(p.should_tick(0));
    }

    #[test]
    fn ticks_once_per_frame() {
        let mut p = FramePacer::new(10);
        assert!(p.should_tick(0));
        assert!(!p.should_tick(50));
        assert_eq!(p.timeout_ms(50), 50);
        assert!(p.should_tick(100));
        assert!(!p.should_tick(150));
        assert!(p.should_tick(205));
        // Slight lateness keeps the cadence.
        assert_eq!(p.timeout_ms(205), 95);
    }

    #[test]
    fn falling_far_behind_does_not_burst() {
        let mut p = FramePacer::new(10);
        assert!(p.should_tick(0));
        assert!(p.should_tick(1000));
        assert!(!p.should_tick(1001));
        assert_eq!(p.timeout_ms(1001), 99);
    }

    #[test]
    fn zero_fps_is_treated_as_one() {
        assert_eq!(FramePacer::new(0).frame_ms(), 1000);
    }
}
