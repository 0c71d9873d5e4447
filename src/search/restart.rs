//! Restart policy: when to restart and what to do when restarting.

use super::{reluctant::Reluctant, report::RestartEvent, Mode, Search};
use tracing::{debug, trace};

/// Leaves are only reinforced during the first conflicts of the search.
pub(crate) const REINFORCE_CONFLICT_LIMIT: u64 = 20_000;

/// Every restart with a count divisible by this skips leaf reinforcement.
pub(crate) const REINFORCE_SKIP_INTERVAL: u64 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    /// no restart fires before this many conflicts
    pub conflicts: u64,
}

/// Decides whether a restart is due, one implementation per search mode.
pub(crate) trait RestartTrigger {
    fn triggered(&mut self) -> bool;
}

/// Focused mode: restart once the fast glue average exceeds the slow one by a margin.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GlueTrigger {
    pub(crate) fast: f64,
    pub(crate) slow: f64,
    pub(crate) margin: f64,
}

impl RestartTrigger for GlueTrigger {
    fn triggered(&mut self) -> bool {
        let limit = self.margin * self.slow;
        trace!(
            "restart glue limit {limit} = {:.02} * {} (slow glue) {} {} (fast glue)",
            self.margin,
            self.slow,
            match limit.partial_cmp(&self.fast) {
                Some(std::cmp::Ordering::Greater) => '>',
                Some(std::cmp::Ordering::Equal) => '=',
                _ => '<',
            },
            self.fast
        );
        limit <= self.fast
    }
}

/// Stable mode: restart whenever the reluctant doubling sequence says so.
#[derive(Debug)]
pub(crate) struct ReluctantTrigger<'a>(pub(crate) &'a mut Reluctant);

impl RestartTrigger for ReluctantTrigger<'_> {
    fn triggered(&mut self) -> bool {
        self.0.triggered()
    }
}

/// `log10(n + 9)`, grows slowly and equals 1 for `n = 1`.
#[allow(clippy::cast_precision_loss)]
fn logn(count: u64) -> f64 {
    assert!(count > 0);
    ((count + 9) as f64).log10()
}

/// Number of conflicts until the next focused mode restart after `restarts` restarts.
pub(crate) fn focused_restart_delta(restarts: u64, interval: u64) -> u64 {
    let mut delta = interval;
    if restarts > 0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let growth = (logn(restarts) - 1.0) as u64;
        delta += growth;
    }
    delta
}

/// Whether leaves are reinforced before the restart with number `restarts`.
pub(crate) fn should_reinforce(conflicts: u64, restarts: u64, mode: Mode) -> bool {
    conflicts < REINFORCE_CONFLICT_LIMIT
        && restarts % REINFORCE_SKIP_INTERVAL != 0
        && mode == Mode::Stable
}

impl Search {
    /// Returns whether the search should restart now.
    ///
    /// In stable mode this consumes the trigger of the reluctant doubling sequence.
    pub fn restarting(&mut self) -> bool {
        assert!(self.unassigned() > 0, "restart check with all variables assigned");
        if !self.options.restart {
            return false;
        }
        if self.trail.decision_level().is_root() {
            return false;
        }
        if self.stats.conflicts < self.limits.conflicts {
            return false;
        }
        match self.mode {
            Mode::Stable => ReluctantTrigger(&mut self.reluctant).triggered(),
            Mode::Focused => GlueTrigger {
                fast: self.averages.fast(),
                slow: self.averages.slow(),
                margin: self.options.margin(),
            }
            .triggered(),
        }
    }

    pub(crate) fn update_focused_restart_limit(&mut self) {
        assert_eq!(self.mode, Mode::Focused);
        let delta =
            focused_restart_delta(self.stats.restarts.restarts, self.options.restart_interval);
        self.limits.conflicts = self.stats.conflicts + delta;
        trace!(
            "focused restart limit at {} after {} conflicts",
            self.limits.conflicts,
            delta
        );
    }

    /// Restarts the search, keeping the decision levels that trail reuse allows.
    pub fn restart(&mut self) {
        let level = self.trail.decision_level();
        let restarts = &mut self.stats.restarts;
        restarts.restarts += 1;
        restarts.levels += level.as_usize() as u64;
        match self.mode {
            Mode::Stable => restarts.stable += 1,
            Mode::Focused => restarts.focused += 1,
        }

        // reasons are only valid before backtracking
        if self.options.reinforce_leaves
            && should_reinforce(self.stats.conflicts, self.stats.restarts.restarts, self.mode)
        {
            self.reinforce_leaves();
        }

        let reused = self.reuse_trail();
        trace!(
            "restarting after {} conflicts (limit {})",
            self.stats.conflicts,
            self.limits.conflicts
        );
        debug!("restarting to level {reused}");
        self.backtrack_to(reused);
        self.leaf_mark = self.trail.len();
        if self.mode == Mode::Focused {
            self.update_focused_restart_limit();
        }

        self.report.report(&RestartEvent {
            restarts: self.stats.restarts.restarts,
            conflicts: self.stats.conflicts,
            decisions: self.stats.decisions,
            mode: self.mode,
            level,
            reused,
            limit: self.limits.conflicts,
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn glue_trigger_fires() {
        let mut trigger = GlueTrigger { fast: 5.0, slow: 4.0, margin: 1.1 };
        assert!(trigger.triggered());
    }

    #[test]
    fn glue_trigger_withheld() {
        let mut trigger = GlueTrigger { fast: 4.0, slow: 4.0, margin: 1.1 };
        assert!(!trigger.triggered());
    }

    #[test]
    fn glue_trigger_on_equality() {
        let mut trigger = GlueTrigger { fast: 2.0, slow: 2.0, margin: 1.0 };
        assert!(trigger.triggered());
    }

    #[test]
    fn reluctant_trigger_queries_once() {
        let mut reluctant = Reluctant::new(1, 0);
        reluctant.tick();
        assert!(ReluctantTrigger(&mut reluctant).triggered());
        assert!(!ReluctantTrigger(&mut reluctant).triggered());
    }

    #[test]
    fn first_deltas() {
        assert_eq!(focused_restart_delta(0, 1), 1);
        assert_eq!(focused_restart_delta(1, 1), 1);
        assert_eq!(focused_restart_delta(90, 1), 1);
        assert_eq!(focused_restart_delta(92, 1), 2);
        assert_eq!(focused_restart_delta(992, 3), 5);
    }

    #[test]
    fn reinforcement_gating() {
        assert!(should_reinforce(19_999, 11, Mode::Stable));
        assert!(!should_reinforce(20_001, 11, Mode::Stable));
        assert!(!should_reinforce(20_000, 11, Mode::Stable));
        assert!(!should_reinforce(1, 20, Mode::Stable));
        assert!(!should_reinforce(1, 11, Mode::Focused));
    }

    proptest! {
        #[test]
        fn delta_is_monotone(restarts in 0u64..1_000_000, interval in 1u64..1000) {
            let delta = focused_restart_delta(restarts, interval);
            prop_assert!(delta >= interval);
            prop_assert!(focused_restart_delta(restarts + 1, interval) >= delta);
        }
    }
}
