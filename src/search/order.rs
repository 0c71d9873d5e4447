//! Decision orders, the priority structures the decision routine picks from.

use super::assignment::Assignment;
use crate::literal::Var;

/// A variable order used to pick the next decision variable.
///
/// Implemented by [`super::vsids::Vsids`] (stable mode) and
/// [`super::queue::Queue`] (focused mode).
pub trait DecisionOrder {
    type Priority: PartialOrd + Copy + std::fmt::Debug;

    /// The unassigned variable with the highest priority, without side effects.
    fn next_decision_variable(&self, assignment: &Assignment) -> Option<Var>;

    fn priority(&self, var: Var) -> Self::Priority;

    /// Increases the priority of `var`.
    fn bump(&mut self, var: Var);
}
