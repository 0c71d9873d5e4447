//! Trail reuse: keep the decisions a restart would repeat anyway.
//!
//! The decision routine always picks the unassigned variable with the highest
//! priority. Every decision whose variable has a strictly higher priority than
//! the variable picked next would be taken again after a restart, so the
//! levels opened by a prefix of such decisions survive the restart.

use super::{
    assignment::Assignment,
    order::DecisionOrder,
    trail::{DecLvl, Trail},
    Mode, Search,
};
use tracing::{debug, trace};

/// Largest level such that every decision up to it dominates the next decision.
pub(crate) fn matching_level<O: DecisionOrder>(
    trail: &Trail,
    assignment: &Assignment,
    order: &O,
) -> DecLvl {
    let next = order
        .next_decision_variable(assignment)
        .expect("trail reuse requires an unassigned variable");
    let limit = order.priority(next);
    trace!("next decision variable {next} with priority {limit:?}");
    let level = trail.decision_level();
    let mut res = DecLvl::ROOT;
    while res < level {
        let decision = trail.decision(res.successor());
        if order.priority(decision.var()) <= limit {
            break;
        }
        res = res.successor();
    }
    res
}

impl Search {
    /// Decision level to backtrack to on restart.
    pub fn reuse_trail(&mut self) -> DecLvl {
        assert!(!self.trail.decision_level().is_root());
        assert!(!self.trail.is_empty());

        if !self.options.restart_reuse_trail {
            return DecLvl::ROOT;
        }

        let res = match self.mode {
            Mode::Stable => matching_level(&self.trail, &self.assignment, &self.vsids),
            Mode::Focused => matching_level(&self.trail, &self.assignment, &self.queue),
        };
        trace!("matching trail level {res}");

        if res.is_root() {
            debug!("restart does not reuse the trail");
        } else {
            self.stats.restarts.reused_trails += 1;
            self.stats.restarts.reused_levels += res.as_usize() as u64;
            debug!("restart reuses trail at decision level {res}");
        }
        res
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{config::Options, literal::Var};
    use proptest::prelude::*;

    /// A stable mode search where variable `i` has been bumped `bumps[i]` times.
    fn stable_search(bumps: &[u32]) -> Search {
        let mut search = Search::new(Options::default()).unwrap();
        let _ = search.new_variables(bumps.len().try_into().unwrap());
        search.set_mode(Mode::Stable);
        for (idx, &count) in bumps.iter().enumerate() {
            let var = Var::from_index(idx.try_into().unwrap());
            for _ in 0..count {
                search.vsids.bump(var);
            }
        }
        search
    }

    #[test]
    fn keeps_dominating_prefix() {
        // decide variables with activity 5, 4, 1 while variable 3 (activity 2) is next
        let mut search = stable_search(&[5, 4, 1, 2, 0]);
        for idx in [0, 1, 2] {
            search.decide(Var::from_index(idx).positive());
        }
        assert_eq!(search.next_decision_variable(), Some(Var::from_index(3)));
        assert_eq!(search.reuse_trail(), DecLvl::new(2));
        assert_eq!(search.stats().restarts.reused_trails, 1);
        assert_eq!(search.stats().restarts.reused_levels, 2);
    }

    #[test]
    fn equal_priority_is_not_kept() {
        let mut search = stable_search(&[3, 3, 0]);
        search.decide(Var::from_index(0).positive());
        assert_eq!(search.next_decision_variable(), Some(Var::from_index(1)));
        assert_eq!(search.reuse_trail(), DecLvl::ROOT);
        assert_eq!(search.stats().restarts.reused_trails, 0);
    }

    #[test]
    fn disabled_reuse() {
        let options = Options { restart_reuse_trail: false, ..Options::default() };
        let mut search = Search::new(options).unwrap();
        let _ = search.new_variables(3);
        search.decide(Var::from_index(2).positive());
        assert_eq!(search.reuse_trail(), DecLvl::ROOT);
    }

    #[test]
    fn focused_uses_stamps() {
        let mut search = Search::new(Options::default()).unwrap();
        let _ = search.new_variables(4);
        // initial stamps follow the variable index, highest index is decided first
        search.decide(Var::from_index(3).positive());
        search.decide(Var::from_index(1).positive());
        // next is variable 2, whose stamp is larger than the one of variable 1
        assert_eq!(search.next_decision_variable(), Some(Var::from_index(2)));
        assert_eq!(search.reuse_trail(), DecLvl::new(1));
    }

    #[derive(Debug, Clone)]
    enum Step {
        Decide,
        Bump(u32),
        Backtrack(usize),
    }

    fn step(vars: u32) -> impl Strategy<Value = Step> {
        prop_oneof![
            2 => Just(Step::Decide),
            2 => (0..vars).prop_map(Step::Bump),
            1 => any::<usize>().prop_map(Step::Backtrack),
        ]
    }

    proptest! {
        #[test]
        fn reuse_bound(
            bumps in proptest::collection::vec(0u32..6, 2..12),
            decisions in 1usize..11,
        ) {
            let mut search = stable_search(&bumps);
            let decisions = decisions.min(bumps.len() - 1);
            for idx in 0..decisions {
                search.decide(Var::from_index(idx.try_into().unwrap()).negative());
            }
            let next = search.next_decision_variable().unwrap();
            let limit = search.vsids.score(next);
            let res = search.reuse_trail();
            prop_assert!(res <= search.decision_level());
            // every kept decision dominates, the first dropped one does not
            for lvl in 1..=res.as_usize() {
                let decision = search.trail().decision(DecLvl::new(lvl));
                prop_assert!(search.vsids.score(decision.var()) > limit);
            }
            if res < search.decision_level() {
                let decision = search.trail().decision(res.successor());
                prop_assert!(search.vsids.score(decision.var()) <= limit);
            }
        }

        #[test]
        fn focused_reuse_bound(
            (vars, steps) in (2u32..10)
                .prop_flat_map(|vars| (Just(vars), proptest::collection::vec(step(vars), 1..60))),
        ) {
            let mut search = Search::new(Options::default()).unwrap();
            let _ = search.new_variables(vars);
            for step in steps {
                match step {
                    Step::Decide => {
                        if let Some(var) = search.next_decision_variable() {
                            search.decide(var.negative());
                        }
                    }
                    Step::Bump(idx) => search.queue.bump(Var::from_index(idx)),
                    Step::Backtrack(lvl) => {
                        let level = lvl % (search.decision_level().as_usize() + 1);
                        search.backtrack_to(DecLvl::new(level));
                    }
                }

                // stamps are unique, the cursor has to find the newest unassigned variable
                let newest = (0..vars)
                    .map(Var::from_index)
                    .filter(|&var| !search.assignment().is_assigned(var))
                    .max_by_key(|&var| search.queue.stamp(var));
                prop_assert_eq!(search.next_decision_variable(), newest);

                let Some(next) = newest else { continue };
                if search.decision_level().is_root() {
                    continue;
                }
                let limit = search.queue.stamp(next);
                let res = search.reuse_trail();
                for lvl in 1..=res.as_usize() {
                    let decision = search.trail().decision(DecLvl::new(lvl));
                    prop_assert!(search.queue.stamp(decision.var()) > limit);
                }
                if res < search.decision_level() {
                    let decision = search.trail().decision(res.successor());
                    prop_assert!(search.queue.stamp(decision.var()) <= limit);
                }
            }
        }
    }
}
