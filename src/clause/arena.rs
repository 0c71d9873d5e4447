//! Clause arena
//!
//! Clauses are appended and never moved, a [`ClauseRef`] stays valid for the
//! lifetime of the arena.

use super::Clause;
use crate::literal::Lit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClauseRef(usize);

impl std::fmt::Display for ClauseRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Arena {
    clauses: Vec<Clause>,
}

impl Arena {
    pub(crate) fn add(&mut self, clause: &[Lit]) -> ClauseRef {
        let idx = self.clauses.len();
        self.clauses.push(Clause::new(clause));
        ClauseRef(idx)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl std::ops::Index<ClauseRef> for Arena {
    type Output = Clause;

    fn index(&self, cref: ClauseRef) -> &Self::Output {
        assert!(cref.0 < self.clauses.len(), "clause reference {cref} outside of arena");
        &self.clauses[cref.0]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn references_are_stable() {
        let mut arena = Arena::default();
        let first = arena.add(&[Lit::from_dimacs(1), Lit::from_dimacs(-2)]);
        let second = arena.add(&[Lit::from_dimacs(2), Lit::from_dimacs(3), Lit::from_dimacs(-4)]);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena[first].lits(), &[Lit::from_dimacs(1), Lit::from_dimacs(-2)]);
        assert_eq!(arena[second].to_string(), "2 3 -4 0");
    }

    #[test]
    #[should_panic(expected = "outside of arena")]
    fn out_of_bounds() {
        let arena = Arena::default();
        let _ = &arena[ClauseRef(0)];
    }
}
