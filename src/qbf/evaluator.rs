//! Minimization view of a QBF.

use super::instance::QbfInstance;
use crate::grasp::{Evaluator, Solution};

/// Evaluates `-f(x)` so that maximizing a QBF becomes minimization.
///
/// # Examples
///
/// ```
/// use u_grasp::grasp::Evaluator;
/// use u_grasp::qbf::{QbfInstance, QbfInverse};
///
/// let eval = QbfInverse::new("2\n3 -1\n2".parse::<QbfInstance>().unwrap());
/// let mut s = eval.empty_solution();
/// assert_eq!(eval.insertion_cost(0, &s), -3.0);
/// s.insert(0, &eval);
/// assert_eq!(s.cost(), -3.0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QbfInverse {
    instance: QbfInstance,
}

impl QbfInverse {
    pub fn new(instance: QbfInstance) -> Self {
        Self { instance }
    }

    /// The underlying instance.
    pub fn instance(&self) -> &QbfInstance {
        &self.instance
    }

    /// Gain in `f` from variable `i` given the other selected variables:
    /// `a_ii + sum_{j in S, j != i} (a_ij + a_ji)`.
    fn contribution(&self, i: usize, solution: &Solution) -> f64 {
        let a = &self.instance;
        a.coefficient(i, i)
            + solution
                .elements()
                .iter()
                .filter(|&&j| j != i)
                .map(|&j| a.coefficient(i, j) + a.coefficient(j, i))
                .sum::<f64>()
    }
}

impl Evaluator for QbfInverse {
    fn domain_size(&self) -> usize {
        self.instance.size()
    }

    fn evaluate(&self, solution: &Solution) -> f64 {
        -self.instance.value(solution.elements())
    }

    fn insertion_cost(&self, element: usize, solution: &Solution) -> f64 {
        if solution.contains(element) {
            0.0
        } else {
            -self.contribution(element, solution)
        }
    }

    fn removal_cost(&self, element: usize, solution: &Solution) -> f64 {
        if solution.contains(element) {
            self.contribution(element, solution)
        } else {
            0.0
        }
    }

    fn exchange_cost(&self, element_in: usize, element_out: usize, solution: &Solution) -> f64 {
        if element_in == element_out {
            return 0.0;
        }
        if solution.contains(element_in) {
            return self.removal_cost(element_out, solution);
        }
        if !solution.contains(element_out) {
            return self.insertion_cost(element_in, solution);
        }
        let a = &self.instance;
        -self.contribution(element_in, solution)
            + self.contribution(element_out, solution)
            + (a.coefficient(element_in, element_out) + a.coefficient(element_out, element_in))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn sample() -> QbfInverse {
        QbfInverse::new("3\n1 2 -3\n-1 4\n2\n".parse().unwrap())
    }

    fn solution_with(eval: &QbfInverse, elements: &[usize]) -> Solution {
        let mut s = eval.empty_solution();
        for &e in elements {
            s.insert(e, eval);
        }
        s
    }

    #[test]
    fn test_evaluate_is_negated_value() {
        let eval = sample();
        assert_eq!(eval.empty_solution().cost(), 0.0);
        assert_eq!(solution_with(&eval, &[0, 1]).cost(), -2.0);
        assert_eq!(solution_with(&eval, &[0, 1, 2]).cost(), -5.0);
    }

    #[test]
    fn test_degenerate_moves() {
        let eval = sample();
        let s = solution_with(&eval, &[0]);
        assert_eq!(eval.insertion_cost(0, &s), 0.0);
        assert_eq!(eval.removal_cost(1, &s), 0.0);
        assert_eq!(eval.exchange_cost(0, 0, &s), 0.0);
        assert_eq!(eval.exchange_cost(0, 2, &s), 0.0);
        assert_eq!(eval.exchange_cost(1, 2, &s), eval.insertion_cost(1, &s));
    }

    #[test]
    fn test_exchange_sample() {
        // {0,1} -> {0,2}: -f goes from -2 to -(1 - 3 + 2) = 0.
        let eval = sample();
        let s = solution_with(&eval, &[0, 1]);
        assert!((eval.exchange_cost(2, 1, &s) - 2.0).abs() < 1e-10);
    }

    proptest! {
        /// Every delta equals the change observed by re-evaluating.
        #[test]
        fn prop_deltas_match_evaluate(
            seed in any::<u64>(),
            n in 2usize..10,
            mask in prop::collection::vec(any::<bool>(), 10),
            a in 0usize..10,
            b in 0usize..10,
        ) {
            let eval = QbfInverse::new(QbfInstance::random(n, 10, &mut create_rng(seed)));
            let selected: Vec<usize> = (0..n).filter(|&i| mask[i]).collect();
            let s = solution_with(&eval, &selected);
            let (a, b) = (a % n, b % n);

            let mut t = s.clone();
            t.insert(a, &eval);
            prop_assert!((t.cost() - s.cost() - eval.insertion_cost(a, &s)).abs() < 1e-9);

            let mut t = s.clone();
            t.remove(a, &eval);
            prop_assert!((t.cost() - s.cost() - eval.removal_cost(a, &s)).abs() < 1e-9);

            let mut t = s.clone();
            t.exchange(a, b, &eval);
            prop_assert!((t.cost() - s.cost() - eval.exchange_cost(a, b, &s)).abs() < 1e-9);
        }
    }
}
