use super::trail::DecLvl;
use crate::{
    clause::arena::ClauseRef,
    datastructure::VarVec,
    literal::{Lit, Var},
};

/// Why a variable got its value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Reason {
    Decision,
    Unit,
    /// Implied by a binary clause, holds the other (false) literal of the clause.
    Binary(Lit),
    /// Implied by a clause in the arena, every other literal of it is false.
    Clause(ClauseRef),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Assigned {
    pub(crate) value: bool,
    pub(crate) level: DecLvl,
    pub(crate) reason: Reason,
}

impl Assigned {
    pub fn value(&self) -> bool {
        self.value
    }

    pub fn level(&self) -> DecLvl {
        self.level
    }

    pub fn reason(&self) -> Reason {
        self.reason
    }
}

#[derive(Debug, Clone, Default)]
pub struct Assignment {
    assignment: VarVec<Option<Assigned>>,
}

impl Assignment {
    pub(crate) fn set_var_count(&mut self, count: usize) {
        self.assignment.set_var_count(count);
    }

    pub(crate) fn assign(&mut self, lit: Lit, level: DecLvl, reason: Reason) {
        let old_value =
            self.assignment[lit.var()].replace(Assigned { value: lit.is_positive(), level, reason });
        assert!(old_value.is_none(), "variable {} is assigned twice", lit.var());
    }

    pub(crate) fn unassign(&mut self, var: Var) {
        let old_value = self.assignment[var].take();
        assert!(old_value.is_some());
    }

    pub fn is_assigned(&self, var: Var) -> bool {
        self.assignment[var].is_some()
    }

    /// Value of `lit` under the current assignment, `None` if unassigned.
    pub fn lit_value(&self, lit: Lit) -> Option<bool> {
        self.assignment[lit.var()].map(|assigned| assigned.value == lit.is_positive())
    }

    pub fn reason(&self, var: Var) -> Option<Reason> {
        self.assignment[var].map(|assigned| assigned.reason)
    }
}

impl std::ops::Index<Var> for Assignment {
    type Output = Option<Assigned>;

    fn index(&self, index: Var) -> &Self::Output {
        &self.assignment[index]
    }
}

/// Per variable scratch bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Flags {
    /// not an antecedent of any other assignment, only valid during leaf reinforcement
    pub(crate) leaf: bool,
}
