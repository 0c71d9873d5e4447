//! A priority heap for variables.

use super::VarVec;
use crate::literal::Var;

/// Binary max-heap over variables with values stored for every variable,
/// including those that are currently not contained in the heap.
#[derive(Debug, Default, Clone)]
pub(crate) struct VarHeap<T> {
    /// The value for each variable
    values: VarVec<T>,
    /// The binary max-heap containing the variables
    heap: Vec<Var>,
    /// The positions of the variables in the heap
    positions: VarVec<Option<usize>>,
}

impl<T> VarHeap<T>
where
    T: Default + Copy + Ord,
{
    pub(crate) fn set_var_count(&mut self, count: usize) {
        self.values.set_var_count(count);
        self.positions.set_var_count(count);
    }

    /// Returns the variable with the highest value.
    pub(crate) fn peek(&self) -> Option<Var> {
        self.heap.first().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    /// Applies `update_fn` to the value of `var` and restores the heap order.
    /// Returns the new value.
    pub(crate) fn update_value<F>(&mut self, var: Var, update_fn: F) -> T
    where
        F: FnOnce(T) -> T,
    {
        let orig_value = self.values[var];
        let new_value = update_fn(orig_value);
        self.values[var] = new_value;
        if let Some(pos) = self.positions[var] {
            if new_value >= orig_value {
                self.sift_up(pos);
            } else {
                self.sift_down(pos);
            }
        }
        new_value
    }

    pub(crate) fn get_value(&self, var: Var) -> T {
        self.values[var]
    }

    /// Adds the provided variable to the heap, keeping its stored value.
    pub(crate) fn add(&mut self, var: Var) {
        if self.positions[var].is_some() {
            return;
        }
        let pos = self.heap.len();
        self.heap.push(var);
        self.positions[var] = Some(pos);
        self.sift_up(pos);
    }

    /// Removes the provided variable from the heap.
    pub(crate) fn remove(&mut self, var: Var) {
        let Some(pos) = self.positions[var].take() else {
            return;
        };
        self.heap.swap_remove(pos);
        if pos >= self.heap.len() {
            // removed the last element, nothing moved
            return;
        }
        let moved_var = self.heap[pos];
        self.positions[moved_var] = Some(pos);
        // the moved variable came from a leaf, it may belong above or below `pos`
        self.sift_up(pos);
        if let Some(pos) = self.positions[moved_var] {
            self.sift_down(pos);
        }
    }

    pub(crate) fn contains(&self, var: Var) -> bool {
        self.positions[var].is_some()
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.values[self.heap[pos]] <= self.values[self.heap[parent]] {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        loop {
            let mut largest = pos;
            for child in [2 * pos + 1, 2 * pos + 2] {
                if child < self.heap.len()
                    && self.values[self.heap[child]] > self.values[self.heap[largest]]
                {
                    largest = child;
                }
            }
            if largest == pos {
                return;
            }
            self.swap(pos, largest);
            pos = largest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        let var_a = self.heap[a];
        let var_b = self.heap[b];
        self.heap.swap(a, b);
        self.positions[var_a] = Some(b);
        self.positions[var_b] = Some(a);
    }
}

impl<T> VarHeap<T>
where
    T: Default + Copy + Ord + std::ops::MulAssign,
{
    /// Rescaling values does not change the relative order in the heap.
    pub(crate) fn rescale(&mut self, rescale_factor: T) {
        self.values.values_mut().for_each(|value| {
            *value *= rescale_factor;
        });
    }
}
