//! Greedy randomized construction.
//!
//! # Algorithm
//!
//! 1. Start from the evaluator's empty solution and the full candidate list
//! 2. Repeat:
//!    a. Filter the CL against the current solution
//!    b. Stop if the CL is empty
//!    c. Evaluate the insertion delta of every candidate, tracking the
//!    lowest (`min`) and highest (`max`) delta
//!    d. RCL = candidates with `delta <= min + alpha * (max - min)`
//!    e. Insert a uniformly drawn RCL member
//!    f. Check the [`ConstructionStop`] rule
//!
//! # Reference
//!
//! Feo, T. A. & Resende, M. G. C. (1995). "Greedy Randomized Adaptive
//! Search Procedures", *Journal of Global Optimization* 6, 109-133.

use rand::Rng;

use super::candidates::CandidateRule;
use super::types::{Evaluator, Solution};

/// When the construction phase stops growing a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstructionStop {
    /// Stop as soon as an insertion fails to lower the cost, or the CL runs
    /// dry. The non-improving element stays in the solution and is left to
    /// local search.
    #[default]
    NoImprovement,

    /// Keep inserting until the CL is empty.
    Exhausted,
}

/// Builds the restricted candidate list for one construction step.
///
/// `deltas[k]` is the insertion delta of `candidates[k]`. With `alpha = 0`
/// only the candidates tied for the best delta survive; with `alpha = 1`
/// the whole list does.
pub fn restricted_candidates(candidates: &[usize], deltas: &[f64], alpha: f64) -> Vec<usize> {
    debug_assert_eq!(candidates.len(), deltas.len());

    let (min, max) = deltas
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &d| {
            (lo.min(d), hi.max(d))
        });
    // alpha = 0 must stay greedy even when an infinite delta makes the
    // spread infinite (0 * inf = NaN).
    let threshold = if alpha == 0.0 {
        min
    } else {
        min + alpha * (max - min)
    };

    let rcl: Vec<usize> = candidates
        .iter()
        .zip(deltas)
        .filter(|&(_, &d)| d <= threshold)
        .map(|(&c, _)| c)
        .collect();

    // NaN deltas can leave the threshold unsatisfiable.
    if rcl.is_empty() {
        candidates.to_vec()
    } else {
        rcl
    }
}

/// Grows a solution greedily-randomly with greediness `alpha`.
///
/// The returned solution is feasible with respect to `rule` and its cost is
/// fresh.
pub fn construct<E, C, R>(
    evaluator: &E,
    rule: &C,
    alpha: f64,
    stop: ConstructionStop,
    rng: &mut R,
) -> Solution
where
    E: Evaluator + ?Sized,
    C: CandidateRule + ?Sized,
    R: Rng,
{
    let mut solution = evaluator.empty_solution();
    let mut candidates = rule.make_candidate_list(evaluator.domain_size());
    let mut deltas = Vec::with_capacity(candidates.len());

    loop {
        candidates = rule.update_candidate_list(&solution, &candidates);
        if candidates.is_empty() {
            break;
        }

        deltas.clear();
        deltas.extend(
            candidates
                .iter()
                .map(|&c| evaluator.insertion_cost(c, &solution)),
        );

        let rcl = restricted_candidates(&candidates, &deltas, alpha);
        let chosen = rcl[rng.random_range(0..rcl.len())];

        let before = solution.cost();
        candidates.retain(|&c| c != chosen);
        solution.insert(chosen, evaluator);

        tracing::trace!(
            element = chosen,
            rcl = rcl.len(),
            cl = candidates.len(),
            cost = solution.cost(),
            "construction step"
        );

        if stop == ConstructionStop::NoImprovement && solution.cost() >= before {
            break;
        }
    }

    solution
}
