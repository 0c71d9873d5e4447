//! Leaf reinforcement.
//!
//! A leaf of the implication graph is a trail literal that does not justify
//! any other assignment on the trail. Bumping leaves biases decisions towards
//! variables whose values tend to be consequences rather than causes.

use super::{
    assignment::{Assignment, Flags, Reason},
    order::DecisionOrder,
    Mode, Search,
};
use crate::{clause::arena::Arena, config::LeafScope, datastructure::VarVec, literal::Lit};
use tracing::{debug, trace};

/// Marks the leaves among `lits`, bumps them in `order` and returns their number.
///
/// `promote` has to be empty and is empty again on return.
pub(crate) fn reinforce<O: DecisionOrder>(
    lits: &[Lit],
    assignment: &Assignment,
    arena: &Arena,
    flags: &mut VarVec<Flags>,
    promote: &mut Vec<Lit>,
    order: &mut O,
) -> usize {
    // every flag has to be set before antecedents are cleared
    for &lit in lits {
        debug_assert_eq!(assignment.lit_value(lit), Some(true));
        flags[lit.var()].leaf = true;
    }

    for &lit in lits {
        match assignment.reason(lit.var()).expect("trail literals are assigned") {
            Reason::Decision | Reason::Unit => {}
            Reason::Binary(other) => flags[other.var()].leaf = false,
            Reason::Clause(cref) => {
                let clause = &arena[cref];
                assert!(clause.len() > 1, "reason clause {cref} is a unit");
                for &other in clause.iter().filter(|&&other| other != lit) {
                    debug_assert_ne!(other, !lit);
                    flags[other.var()].leaf = false;
                }
            }
        }
    }

    assert!(promote.is_empty());
    promote.extend(lits.iter().copied().filter(|lit| flags[lit.var()].leaf));
    for lit in promote.iter() {
        trace!("promote leaf {lit}");
        order.bump(lit.var());
    }
    let promoted = promote.len();
    promote.clear();
    promoted
}

impl Search {
    /// Bumps the leaves of the implication graph on the trail in the order of
    /// the current mode. Returns the number of bumped variables.
    pub fn reinforce_leaves(&mut self) -> usize {
        let start = match self.options.leaf_scope {
            LeafScope::Trail => 0,
            LeafScope::SinceRestart => self.leaf_mark.min(self.trail.len()),
        };
        let lits = &self.trail.lits()[start..];
        let promoted = match self.mode {
            Mode::Stable => reinforce(
                lits,
                &self.assignment,
                &self.arena,
                &mut self.flags,
                &mut self.promote,
                &mut self.vsids,
            ),
            Mode::Focused => reinforce(
                lits,
                &self.assignment,
                &self.arena,
                &mut self.flags,
                &mut self.promote,
                &mut self.queue,
            ),
        };
        self.stats.leaves.reinforcements += 1;
        self.stats.leaves.promoted += promoted as u64;
        debug!("reinforced {promoted} leaves of {} trail literals", lits.len());
        promoted
    }
}
