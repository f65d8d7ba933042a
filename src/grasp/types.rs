//! Core types for GRASP: the solution entity and the evaluator contract.

use std::fmt;

/// A set of selected elements together with its cached cost.
///
/// Elements are indices into the evaluator's domain `[0, domain_size)`.
/// They are kept in insertion order and are unique.
///
/// The cost is only ever changed through [`Solution::insert`],
/// [`Solution::remove`] and [`Solution::exchange`], each of which
/// re-evaluates the whole solution with the supplied [`Evaluator`], so the
/// cached value never goes stale.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    elements: Vec<usize>,
    selected: Vec<bool>,
    cost: f64,
}

impl Solution {
    /// Creates an empty solution over a domain of `domain_size` elements.
    ///
    /// The cost starts at `0.0`; callers that need the evaluator's view of
    /// the empty set should use [`Evaluator::empty_solution`].
    pub fn empty(domain_size: usize) -> Self {
        Self {
            elements: Vec::new(),
            selected: vec![false; domain_size],
            cost: 0.0,
        }
    }

    /// Selected elements in insertion order.
    pub fn elements(&self) -> &[usize] {
        &self.elements
    }

    /// Cost of the current selection.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of selected elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Size of the underlying domain.
    pub fn domain_size(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if `element` is selected.
    #[inline]
    pub fn contains(&self, element: usize) -> bool {
        self.selected.get(element).copied().unwrap_or(false)
    }

    /// Adds `element` and re-evaluates the cost.
    ///
    /// Selecting an element that is already present leaves the solution
    /// unchanged.
    pub fn insert<E: Evaluator + ?Sized>(&mut self, element: usize, evaluator: &E) {
        if self.push(element) {
            self.cost = evaluator.evaluate(self);
        }
    }

    /// Drops `element` and re-evaluates the cost.
    pub fn remove<E: Evaluator + ?Sized>(&mut self, element: usize, evaluator: &E) {
        if self.pull(element) {
            self.cost = evaluator.evaluate(self);
        }
    }

    /// Swaps `element_out` for `element_in` and re-evaluates once.
    ///
    /// Exchanging an element with itself is a no-op.
    pub fn exchange<E: Evaluator + ?Sized>(
        &mut self,
        element_in: usize,
        element_out: usize,
        evaluator: &E,
    ) {
        if element_in == element_out {
            return;
        }
        let removed = self.pull(element_out);
        let added = self.push(element_in);
        if removed || added {
            self.cost = evaluator.evaluate(self);
        }
    }

    /// Recomputes the cached cost from scratch.
    pub fn refresh<E: Evaluator + ?Sized>(&mut self, evaluator: &E) {
        self.cost = evaluator.evaluate(self);
    }

    fn push(&mut self, element: usize) -> bool {
        if element >= self.selected.len() || self.selected[element] {
            return false;
        }
        self.selected[element] = true;
        self.elements.push(element);
        true
    }

    fn pull(&mut self, element: usize) -> bool {
        if !self.contains(element) {
            return false;
        }
        self.selected[element] = false;
        self.elements.retain(|&e| e != element);
        true
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Solution: cost=[{}], size=[{}], elements={:?}",
            self.cost,
            self.elements.len(),
            self.elements
        )
    }
}

/// Objective function consumed by the GRASP engine.
///
/// All costs are minimized. A maximization objective must negate its
/// values before they reach the engine (see [`crate::qbf::QbfInverse`]).
///
/// The delta methods must agree with [`Evaluator::evaluate`]: applying a
/// move and re-evaluating must change the cost by exactly the reported
/// delta, up to floating-point noise.
///
/// # Examples
///
/// ```
/// use u_grasp::grasp::{Evaluator, Solution};
///
/// /// Each selected element contributes its weight; minimizing picks negatives.
/// struct Weights(Vec<f64>);
///
/// impl Evaluator for Weights {
///     fn domain_size(&self) -> usize { self.0.len() }
///     fn evaluate(&self, s: &Solution) -> f64 {
///         s.elements().iter().map(|&e| self.0[e]).sum()
///     }
///     fn insertion_cost(&self, e: usize, s: &Solution) -> f64 {
///         if s.contains(e) { 0.0 } else { self.0[e] }
///     }
///     fn removal_cost(&self, e: usize, s: &Solution) -> f64 {
///         if s.contains(e) { -self.0[e] } else { 0.0 }
///     }
///     fn exchange_cost(&self, i: usize, o: usize, s: &Solution) -> f64 {
///         self.insertion_cost(i, s) + self.removal_cost(o, s)
///     }
/// }
///
/// let w = Weights(vec![1.0, -2.0]);
/// let mut s = w.empty_solution();
/// s.insert(1, &w);
/// assert_eq!(s.cost(), -2.0);
/// ```
pub trait Evaluator: Send + Sync {
    /// Number of elements in the domain.
    fn domain_size(&self) -> usize;

    /// Computes the cost of `solution` from scratch.
    fn evaluate(&self, solution: &Solution) -> f64;

    /// Cost change from adding `element` to `solution`.
    fn insertion_cost(&self, element: usize, solution: &Solution) -> f64;

    /// Cost change from dropping `element` from `solution`.
    fn removal_cost(&self, element: usize, solution: &Solution) -> f64;

    /// Cost change from adding `element_in` and dropping `element_out`.
    fn exchange_cost(&self, element_in: usize, element_out: usize, solution: &Solution) -> f64;

    /// Creates an evaluated empty solution.
    fn empty_solution(&self) -> Solution {
        let mut solution = Solution::empty(self.domain_size());
        solution.refresh(self);
        solution
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Small evaluators shared by the unit tests of the sibling modules.

    use super::{Evaluator, Solution};

    /// Linear objective: each selected element adds its weight.
    pub struct Linear(pub Vec<f64>);

    impl Evaluator for Linear {
        fn domain_size(&self) -> usize {
            self.0.len()
        }

        fn evaluate(&self, solution: &Solution) -> f64 {
            solution.elements().iter().map(|&e| self.0[e]).sum()
        }

        fn insertion_cost(&self, element: usize, solution: &Solution) -> f64 {
            if solution.contains(element) {
                0.0
            } else {
                self.0[element]
            }
        }

        fn removal_cost(&self, element: usize, solution: &Solution) -> f64 {
            if solution.contains(element) {
                -self.0[element]
            } else {
                0.0
            }
        }

        fn exchange_cost(&self, element_in: usize, element_out: usize, solution: &Solution) -> f64 {
            if element_in == element_out {
                return 0.0;
            }
            self.insertion_cost(element_in, solution) + self.removal_cost(element_out, solution)
        }
    }
}
