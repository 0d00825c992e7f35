/// Tick cadence gate.
/// With an interval of zero every call is due (uncapped loop); otherwise a
/// tick is due once `interval_ms` has passed since the last one that ran.
#[derive(Debug, Clone)]
pub struct Cadence {
    interval_ms: u64,
    last_ms: Option<u64>,
}

impl Cadence {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// Returns true and records `now_ms` if a tick should run.
    pub fn due(&mut self, now_ms: u64) -> bool {
        let due = match self.last_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        };
        if due {
            self.last_ms = Some(now_ms);
        }
        due
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}

/// Elapsed-time gate used by games that step on a timer rather than every tick
/// (snake movement, tetris gravity, brick row injection).
#[derive(Debug, Clone, Copy, Default)]
pub struct Interval {
    period_ms: u64,
    last_ms: u64,
}

impl Interval {
    pub fn new(period_ms: u64, now_ms: u64) -> Self {
        Self {
            period_ms,
            last_ms: now_ms,
        }
    }

    /// Fires when more than `period_ms` has elapsed, then restarts from `now_ms`.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        self.fire_after(now_ms, self.period_ms)
    }

    /// Like [`Interval::fire`] but with a one-off period (soft drop).
    pub fn fire_after(&mut self, now_ms: u64, period_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_ms) > period_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Shorten the period by `step`, never below `floor`.
    pub fn shorten(&mut self, step: u64, floor: u64) {
        self.period_ms = self.period_ms.saturating_sub(step).max(floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncapped_cadence_always_due() {
        let mut c = Cadence::new(0);
        assert!(c.due(0));
        assert!(c.due(0));
        assert!(c.due(1));
    }

    #[test]
    fn capped_cadence_skips_early_ticks() {
        let mut c = Cadence::new(30);
        assert!(c.due(100));
        assert!(!c.due(110));
        assert!(!c.due(129));
        assert!(c.due(130));
        assert!(!c.due(140));
    }

    #[test]
    fn interval_fires_after_period() {
        let mut i = Interval::new(150, 0);
        assert!(!i.fire(100));
        assert!(!i.fire(150));
        assert!(i.fire(151));
        assert!(!i.fire(200));
        assert!(i.fire(302));
    }

    #[test]
    fn fire_after_overrides_period() {
        let mut i = Interval::new(500, 0);
        assert!(!i.fire_after(40, 50));
        assert!(i.fire_after(51, 50));
        assert!(!i.fire(400));
    }

    #[test]
    fn shorten_respects_floor() {
        let mut i = Interval::new(54, 0);
        i.shorten(2, 50);
        assert_eq!(i.period_ms(), 52);
        i.shorten(2, 50);
        i.shorten(2, 50);
        assert_eq!(i.period_ms(), 50);
    }
}
