//! VSIDS branching heuristics

use super::{assignment::Assignment, order::DecisionOrder};
use crate::{datastructure::heap::VarHeap, literal::Var};
use ordered_float::NotNan;

const BUMP_INITIAL: f64 = 1.0;
const DECAY_INITIAL: f64 = 0.95;
const RESCALE_LIMIT: f64 = f64::MAX / 16.0;

/// Activity scores, the heap only contains unassigned variables.
#[derive(Debug, Clone)]
pub struct Vsids {
    heap: VarHeap<NotNan<f64>>,
    /// the value used for bumping activity values
    bump: NotNan<f64>,
    /// The decay factor
    decay: NotNan<f64>,
}

impl Default for Vsids {
    fn default() -> Self {
        Self {
            heap: VarHeap::default(),
            bump: NotNan::new(BUMP_INITIAL).unwrap(),
            decay: NotNan::new(DECAY_INITIAL).unwrap(),
        }
    }
}

impl Vsids {
    pub(crate) fn set_var_count(&mut self, count: usize) {
        self.heap.set_var_count(count);
    }

    /// Returns the variable with the highest activity score.
    pub fn peek(&self) -> Option<Var> {
        self.heap.peek()
    }

    pub fn score(&self, var: Var) -> f64 {
        *self.heap.get_value(var)
    }

    /// Decay all variable activities.
    pub(crate) fn decay(&mut self) {
        self.bump /= self.decay;
        if *self.bump >= RESCALE_LIMIT {
            self.rescale();
        }
    }

    /// Rescale activities to prevent overflow
    fn rescale(&mut self) {
        let rescale_factor = RESCALE_LIMIT.recip();
        self.heap.rescale(NotNan::new(rescale_factor).unwrap());
        self.bump *= rescale_factor;
    }

    /// Adds the provided variable to the heap.
    pub(crate) fn add(&mut self, var: Var) {
        self.heap.add(var);
    }

    /// Removes the provided variable from the heap.
    pub(crate) fn remove(&mut self, var: Var) {
        self.heap.remove(var);
    }

    /// Number of variables in the heap.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, var: Var) -> bool {
        self.heap.contains(var)
    }
}

impl DecisionOrder for Vsids {
    type Priority = NotNan<f64>;

    fn next_decision_variable(&self, assignment: &Assignment) -> Option<Var> {
        let var = self.peek()?;
        debug_assert!(!assignment.is_assigned(var), "assigned variable {var} in heap");
        Some(var)
    }

    fn priority(&self, var: Var) -> Self::Priority {
        self.heap.get_value(var)
    }

    /// Increase activity score for the provided variable.
    fn bump(&mut self, var: Var) {
        let new_value = self.heap.update_value(var, |old| old + self.bump);
        if *new_value >= RESCALE_LIMIT {
            self.rescale();
        }
    }
}
