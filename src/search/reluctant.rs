//! Reluctant doubling: stable mode restarts following the Luby sequence
//! `1, 1, 2, 1, 1, 2, 4, 1, ...` scaled by a base period.

#[derive(Debug, Clone, Default)]
pub struct Reluctant {
    /// base period in conflicts, zero disables the trigger
    period: u64,
    /// maximal period, zero means unlimited
    limit: u64,
    /// conflicts until the next trigger
    wait: u64,
    u: u64,
    v: u64,
    trigger: bool,
}

impl Reluctant {
    pub(crate) fn new(period: u64, limit: u64) -> Self {
        let mut reluctant = Self::default();
        reluctant.enable(period, limit);
        reluctant
    }

    fn enable(&mut self, period: u64, limit: u64) {
        let period = if limit > 0 { period.min(limit) } else { period };
        *self = Self { period, limit, wait: period, u: 1, v: 1, trigger: false };
    }

    /// Restarts the sequence from its beginning.
    pub(crate) fn reset(&mut self) {
        self.enable(self.period, self.limit);
    }

    /// Counts one conflict.
    pub(crate) fn tick(&mut self) {
        if self.period == 0 || self.trigger {
            return;
        }
        debug_assert!(self.wait > 0);
        self.wait -= 1;
        if self.wait > 0 {
            return;
        }
        let (mut u, mut v) = (self.u, self.v);
        if u & u.wrapping_neg() == v {
            u += 1;
            v = 1;
        } else {
            v *= 2;
        }
        let mut wait = v * self.period;
        if self.limit > 0 && wait > self.limit {
            u = 1;
            v = 1;
            wait = self.period;
        }
        self.trigger = true;
        self.wait = wait;
        self.u = u;
        self.v = v;
    }

    /// Returns whether a restart is due and consumes the trigger.
    pub(crate) fn triggered(&mut self) -> bool {
        std::mem::take(&mut self.trigger)
    }
}
