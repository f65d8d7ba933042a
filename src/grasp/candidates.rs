//! Candidate lists and the ternary exclusion constraints that filter them.

use super::error::GraspError;
use super::types::Solution;

/// Decides which elements may currently enter a solution.
///
/// This is the problem-specific capability the engine is parameterized
/// over. The candidate list (CL) it produces must never contain an element
/// that is already selected or whose insertion would violate a constraint.
pub trait CandidateRule: Send + Sync {
    /// Builds the initial candidate list for an empty solution.
    fn make_candidate_list(&self, domain_size: usize) -> Vec<usize> {
        (0..domain_size).collect()
    }

    /// Derives the new CL from `candidates` against the current `solution`.
    ///
    /// The result is a subset of `candidates`, in the same order.
    fn update_candidate_list(&self, solution: &Solution, candidates: &[usize]) -> Vec<usize>;

    /// Checks that the rule is consistent with a domain of `domain_size`
    /// elements. Called once before a run starts.
    fn validate(&self, _domain_size: usize) -> Result<(), GraspError> {
        Ok(())
    }
}

/// Every unselected element is a candidate.
///
/// Used by problems without exclusion constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconstrained;

impl CandidateRule for Unconstrained {
    fn update_candidate_list(&self, solution: &Solution, candidates: &[usize]) -> Vec<usize> {
        candidates
            .iter()
            .copied()
            .filter(|&c| !solution.contains(c))
            .collect()
    }
}

/// Static table of ternary exclusion constraints.
///
/// Each triple `{a, b, c}` forbids selecting all three elements: once two of
/// them are in the solution the triple is *saturated* and its third member
/// leaves the candidate list.
///
/// Triples are addressed by their position in the table. Per-run
/// bookkeeping (how many members of each triple are selected) is a plain
/// array indexed by that position.
///
/// # Examples
///
/// ```
/// use u_grasp::grasp::{CandidateRule, Evaluator, Solution, TripleTable};
///
/// let table = TripleTable::new(vec![[0, 1, 2]], 4).unwrap();
/// let mut s = Solution::empty(4);
/// # struct Zero;
/// # impl Evaluator for Zero {
/// #     fn domain_size(&self) -> usize { 4 }
/// #     fn evaluate(&self, _: &Solution) -> f64 { 0.0 }
/// #     fn insertion_cost(&self, _: usize, _: &Solution) -> f64 { 0.0 }
/// #     fn removal_cost(&self, _: usize, _: &Solution) -> f64 { 0.0 }
/// #     fn exchange_cost(&self, _: usize, _: usize, _: &Solution) -> f64 { 0.0 }
/// # }
/// s.insert(0, &Zero);
/// s.insert(2, &Zero);
///
/// let cl = table.update_candidate_list(&s, &[0, 1, 2, 3]);
/// assert_eq!(cl, vec![3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripleTable {
    triples: Vec<[usize; 3]>,
    incidence: Vec<Vec<usize>>,
}

impl TripleTable {
    /// Builds a table over a domain of `domain_size` elements.
    ///
    /// # Errors
    ///
    /// Returns [`GraspError::InvalidTriple`] if a triple repeats an element
    /// or references one outside the domain.
    pub fn new(triples: Vec<[usize; 3]>, domain_size: usize) -> Result<Self, GraspError> {
        check_triples(&triples, domain_size)?;

        let mut incidence = vec![Vec::new(); domain_size];
        for (t, triple) in triples.iter().enumerate() {
            for &e in triple {
                incidence[e].push(t);
            }
        }

        Ok(Self { triples, incidence })
    }

    /// All triples, in table order.
    pub fn triples(&self) -> &[[usize; 3]] {
        &self.triples
    }

    /// Number of triples.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns `true` if the table holds no constraint.
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Positions of the triples that contain `element`.
    pub fn containing(&self, element: usize) -> &[usize] {
        self.incidence
            .get(element)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of selected members of each triple, indexed by triple position.
    pub fn fill_counts(&self, solution: &Solution) -> Vec<u8> {
        let mut fill = vec![0u8; self.triples.len()];
        for &e in solution.elements() {
            for &t in self.containing(e) {
                fill[t] = fill[t].saturating_add(1);
            }
        }
        fill
    }

    /// Returns `true` if no triple has all three members selected.
    pub fn is_feasible(&self, solution: &Solution) -> bool {
        self.fill_counts(solution).iter().all(|&n| n < 3)
    }
}

impl CandidateRule for TripleTable {
    fn update_candidate_list(&self, solution: &Solution, candidates: &[usize]) -> Vec<usize> {
        let fill = self.fill_counts(solution);
        candidates
            .iter()
            .copied()
            .filter(|&c| !solution.contains(c))
            .filter(|&c| self.containing(c).iter().all(|&t| fill[t] != 2))
            .collect()
    }

    fn validate(&self, domain_size: usize) -> Result<(), GraspError> {
        check_triples(&self.triples, domain_size)
    }
}

fn check_triples(triples: &[[usize; 3]], domain_size: usize) -> Result<(), GraspError> {
    for (index, &triple) in triples.iter().enumerate() {
        let [a, b, c] = triple;
        let in_domain = triple.iter().all(|&e| e < domain_size);
        if !in_domain || a == b || b == c || a == c {
            return Err(GraspError::InvalidTriple {
                index,
                triple,
                domain_size,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grasp::types::testing::Linear;
    use crate::grasp::types::Evaluator;
    use proptest::prelude::*;

    fn solution_with(eval: &Linear, elements: &[usize]) -> Solution {
        let mut s = eval.empty_solution();
        for &e in elements {
            s.insert(e, eval);
        }
        s
    }

    #[test]
    fn test_unconstrained_drops_selected() {
        let eval = Linear(vec![0.0; 5]);
        let s = solution_with(&eval, &[1, 3]);
        let cl = Unconstrained.update_candidate_list(&s, &[0, 1, 2, 3, 4]);
        assert_eq!(cl, vec![0, 2, 4]);
    }

    #[test]
    fn test_make_candidate_list_is_full_domain() {
        assert_eq!(Unconstrained.make_candidate_list(4), vec![0, 1, 2, 3]);
        let table = TripleTable::new(vec![[0, 1, 2]], 3).unwrap();
        assert_eq!(table.make_candidate_list(3), vec![0, 1, 2]);
    }

    #[test]
    fn test_rejects_repeated_element() {
        let err = TripleTable::new(vec![[0, 1, 2], [3, 3, 1]], 4).unwrap_err();
        assert_eq!(
            err,
            GraspError::InvalidTriple {
                index: 1,
                triple: [3, 3, 1],
                domain_size: 4
            }
        );
    }

    #[test]
    fn test_rejects_out_of_domain() {
        assert!(TripleTable::new(vec![[0, 1, 5]], 5).is_err());
    }

    #[test]
    fn test_validate_against_smaller_domain() {
        let table = TripleTable::new(vec![[0, 1, 4]], 5).unwrap();
        assert!(table.validate(5).is_ok());
        assert!(table.validate(4).is_err());
    }

    #[test]
    fn test_single_member_does_not_saturate() {
        let eval = Linear(vec![0.0; 3]);
        let table = TripleTable::new(vec![[0, 1, 2]], 3).unwrap();
        let s = solution_with(&eval, &[0]);
        assert_eq!(table.update_candidate_list(&s, &[0, 1, 2]), vec![1, 2]);
    }

    #[test]
    fn test_saturated_triple_excludes_third_member() {
        let eval = Linear(vec![0.0; 3]);
        let table = TripleTable::new(vec![[0, 1, 2]], 3).unwrap();
        let s = solution_with(&eval, &[2, 0]);
        assert!(table.update_candidate_list(&s, &[0, 1, 2]).is_empty());
        assert_eq!(table.fill_counts(&s), vec![2]);
    }

    #[test]
    fn test_overlapping_triples() {
        // {0,1,2} saturated by 0 and 1; {1,3,4} holds only 1.
        let eval = Linear(vec![0.0; 6]);
        let table = TripleTable::new(vec![[0, 1, 2], [1, 3, 4]], 6).unwrap();
        let s = solution_with(&eval, &[0, 1]);
        let cl = table.update_candidate_list(&s, &[0, 1, 2, 3, 4, 5]);
        assert_eq!(cl, vec![3, 4, 5]);
        assert_eq!(table.fill_counts(&s), vec![2, 1]);
    }

    #[test]
    fn test_result_is_subset_of_old_list() {
        let eval = Linear(vec![0.0; 6]);
        let table = TripleTable::new(vec![[0, 1, 2]], 6).unwrap();
        let s = eval.empty_solution();
        assert_eq!(table.update_candidate_list(&s, &[5, 2]), vec![5, 2]);
    }

    #[test]
    fn test_is_feasible() {
        let table = TripleTable::new(vec![[0, 1, 2]], 3).unwrap();
        let eval = Linear(vec![0.0; 3]);
        assert!(table.is_feasible(&solution_with(&eval, &[0, 1])));
        assert!(!table.is_feasible(&solution_with(&eval, &[0, 1, 2])));
    }

    proptest! {
        /// Growing a solution only from the filtered CL never completes a triple.
        #[test]
        fn prop_filtered_growth_stays_feasible(
            n in 3usize..20,
            raw in prop::collection::vec((0usize..20, 0usize..20, 0usize..20), 0..30),
            picks in prop::collection::vec(0usize..1000, 1..20),
        ) {
            let triples: Vec<[usize; 3]> = raw
                .into_iter()
                .map(|(a, b, c)| [a % n, b % n, c % n])
                .filter(|&[a, b, c]| a != b && b != c && a != c)
                .collect();
            let table = TripleTable::new(triples, n).unwrap();
            let eval = Linear(vec![0.0; n]);
            let mut s = eval.empty_solution();
            let mut cl = table.make_candidate_list(n);

            for pick in picks {
                cl = table.update_candidate_list(&s, &cl);
                if cl.is_empty() {
                    break;
                }
                let e = cl[pick % cl.len()];
                s.insert(e, &eval);
                prop_assert!(table.is_feasible(&s));
            }
        }
    }
}
