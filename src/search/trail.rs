use crate::literal::Lit;

#[derive(Debug, Clone, Default)]
pub struct Trail {
    /// List of assignments in chronological order
    trail: Vec<Lit>,
    /// Indices into trail marking the decision levels
    decisions: Vec<usize>,
}

/// A decision level, level 0 is the root level without a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecLvl(usize);

impl Trail {
    pub(crate) fn push(&mut self, lit: Lit) {
        self.trail.push(lit);
    }

    pub fn decision_level(&self) -> DecLvl {
        DecLvl(self.decisions.len())
    }

    pub(crate) fn add_decision(&mut self, lit: Lit) {
        let trail_idx = self.trail.len();
        self.trail.push(lit);
        self.decisions.push(trail_idx);
    }

    /// The decision literal that opened `lvl`.
    pub fn decision(&self, lvl: DecLvl) -> Lit {
        assert!(!lvl.is_root(), "the root level has no decision");
        self.trail[self.decisions[lvl.0 - 1]]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lit> + DoubleEndedIterator {
        self.trail.iter()
    }

    pub fn lits(&self) -> &[Lit] {
        &self.trail
    }

    /// Removes every literal above `lvl`, calling `callback` on them in
    /// reverse assignment order.
    pub(crate) fn backtrack_to<F>(&mut self, lvl: DecLvl, callback: F)
    where
        F: FnMut(Lit),
    {
        if lvl >= self.decision_level() {
            return;
        }
        let trail_idx = self.decisions[lvl.0];
        self.decisions.truncate(lvl.0);
        self.trail[trail_idx..].iter().copied().rev().for_each(callback);
        self.trail.truncate(trail_idx);
    }

    pub fn len(&self) -> usize {
        self.trail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }
}

impl DecLvl {
    pub const ROOT: DecLvl = DecLvl(0);

    pub fn new(lvl: usize) -> Self {
        Self(lvl)
    }

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }

    pub fn successor(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for DecLvl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
