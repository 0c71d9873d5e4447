//! Variable-move-to-front queue used for decisions in focused mode.
//!
//! Variables are kept in a doubly linked list ordered by their bump stamp,
//! the most recently bumped variable is the last one. The search cursor
//! points to a variable such that every variable after it is assigned.

use super::{assignment::Assignment, order::DecisionOrder};
use crate::{datastructure::VarVec, literal::Var};

#[derive(Debug, Clone, Copy, Default)]
struct Link {
    prev: Option<Var>,
    next: Option<Var>,
    stamp: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Queue {
    links: VarVec<Link>,
    first: Option<Var>,
    last: Option<Var>,
    /// last stamp handed out
    stamp: u64,
    search: Option<Var>,
}

impl Queue {
    /// New variables are enqueued in index order.
    pub(crate) fn set_var_count(&mut self, count: usize) {
        let old_count = self.links.var_count();
        self.links.set_var_count(count);
        for idx in old_count..count {
            let var = Var::from_index(idx.try_into().expect("variable index fits into u32"));
            self.enqueue(var);
            self.search = Some(var);
        }
    }

    pub fn stamp(&self, var: Var) -> u64 {
        self.links[var].stamp
    }

    /// Notifies the queue that `var` became unassigned.
    pub(crate) fn unassigned(&mut self, var: Var) {
        let stamp = self.links[var].stamp;
        if self.search.map_or(true, |search| self.links[search].stamp < stamp) {
            self.search = Some(var);
        }
    }

    fn enqueue(&mut self, var: Var) {
        self.stamp += 1;
        let link = &mut self.links[var];
        link.prev = self.last;
        link.next = None;
        link.stamp = self.stamp;
        match self.last {
            Some(last) => self.links[last].next = Some(var),
            None => self.first = Some(var),
        }
        self.last = Some(var);
    }

    fn dequeue(&mut self, var: Var) {
        let Link { prev, next, .. } = self.links[var];
        match prev {
            Some(prev) => self.links[prev].next = next,
            None => self.first = next,
        }
        match next {
            Some(next) => self.links[next].prev = prev,
            None => self.last = prev,
        }
    }

    /// Variables from the oldest to the most recently bumped one.
    #[cfg(test)]
    fn iter(&self) -> impl Iterator<Item = Var> + '_ {
        std::iter::successors(self.first, |&var| self.links[var].next)
    }
}

impl DecisionOrder for Queue {
    type Priority = u64;

    fn next_decision_variable(&self, assignment: &Assignment) -> Option<Var> {
        std::iter::successors(self.search, |&var| self.links[var].prev)
            .find(|&var| !assignment.is_assigned(var))
    }

    fn priority(&self, var: Var) -> Self::Priority {
        self.stamp(var)
    }

    /// Moves `var` to the end of the queue with a fresh stamp.
    fn bump(&mut self, var: Var) {
        if self.last == Some(var) {
            return;
        }
        self.dequeue(var);
        self.enqueue(var);
        // every variable after `var` is assigned trivially
        self.search = Some(var);
    }
}
